//! # Rules Configuration
//!
//! Squad-size bounds and formation availability per match format.
//!
//! ## Usage
//! ```rust
//! use lineup_core::config::RulesConfig;
//!
//! let rules = RulesConfig::default();
//! let strict = RulesConfig::strict();
//! assert!(strict.five_v_five.max_squad_size < rules.five_v_five.max_squad_size);
//! ```
//!
//! A rules file (JSON or YAML) can be supplied through `LINEUP_RULES_PATH`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

use crate::error::{LineupError, Result};
use crate::formation;
use crate::models::{FormationId, MatchFormat};

pub const RULES_PATH_ENV: &str = "LINEUP_RULES_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRules {
    pub min_squad_size: usize,
    pub max_squad_size: usize,
    pub formations: Vec<FormationId>,
    #[serde(default)]
    pub allow_pairs: bool,
}

impl FormatRules {
    fn five_v_five() -> Self {
        Self {
            min_squad_size: 5,
            max_squad_size: 15,
            formations: vec![FormationId::F22, FormationId::F121],
            allow_pairs: true,
        }
    }

    fn seven_v_seven() -> Self {
        Self {
            min_squad_size: 7,
            max_squad_size: 15,
            formations: vec![FormationId::F222, FormationId::F231],
            allow_pairs: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub five_v_five: FormatRules,
    pub seven_v_seven: FormatRules,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            five_v_five: FormatRules::five_v_five(),
            seven_v_seven: FormatRules::seven_v_seven(),
        }
    }
}

impl RulesConfig {
    /// League-style caps on squad size.
    pub fn strict() -> Self {
        let mut cfg = Self::default();
        cfg.five_v_five.max_squad_size = 10;
        cfg.seven_v_seven.max_squad_size = 12;
        cfg
    }

    pub fn for_format(&self, format: MatchFormat) -> &FormatRules {
        match format {
            MatchFormat::FiveVFive => &self.five_v_five,
            MatchFormat::SevenVSeven => &self.seven_v_seven,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for format in [MatchFormat::FiveVFive, MatchFormat::SevenVSeven] {
            let rules = self.for_format(format);
            let on_pitch = format.field_player_count() + 1;
            if rules.min_squad_size < on_pitch {
                return Err(LineupError::Config(format!(
                    "{format}: min_squad_size {} is below the {on_pitch} players on the pitch",
                    rules.min_squad_size
                )));
            }
            if rules.min_squad_size > rules.max_squad_size {
                return Err(LineupError::Config(format!(
                    "{format}: min_squad_size {} exceeds max_squad_size {}",
                    rules.min_squad_size, rules.max_squad_size
                )));
            }
            let largest = on_pitch + formation::MAX_SUBSTITUTE_SLOTS;
            if rules.max_squad_size > largest {
                return Err(LineupError::Config(format!(
                    "{format}: max_squad_size {} exceeds the supported {largest}",
                    rules.max_squad_size
                )));
            }
            if rules.formations.is_empty() {
                return Err(LineupError::Config(format!("{format}: no formations allowed")));
            }
        }
        Ok(())
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LineupError::Config(format!("failed to read {}: {e}", path.display())))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(LineupError::Config(format!(
                "unsupported rules file extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    /// Rules from `LINEUP_RULES_PATH`, or defaults when it is unset or blank.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(RULES_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::from_path(path).map_err(|e| {
            tracing::warn!(env = RULES_PATH_ENV, path, error = %e, "rejected rules file");
            e
        })
    }
}
