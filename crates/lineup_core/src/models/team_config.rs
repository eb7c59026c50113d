use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::RulesConfig;
use crate::error::{LineupError, Result};
use crate::formation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    #[serde(rename = "5v5")]
    FiveVFive,
    #[serde(rename = "7v7")]
    SevenVSeven,
}

impl MatchFormat {
    pub fn code(&self) -> &'static str {
        match self {
            MatchFormat::FiveVFive => "5v5",
            MatchFormat::SevenVSeven => "7v7",
        }
    }

    /// Outfield players on the pitch, goalie excluded.
    pub fn field_player_count(&self) -> usize {
        match self {
            MatchFormat::FiveVFive => 4,
            MatchFormat::SevenVSeven => 6,
        }
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationId {
    #[serde(rename = "2-2")]
    F22,
    #[serde(rename = "1-2-1")]
    F121,
    #[serde(rename = "2-2-2")]
    F222,
    #[serde(rename = "2-3-1")]
    F231,
}

impl FormationId {
    /// Canonical formation code string (e.g., "1-2-1").
    pub fn code(&self) -> &'static str {
        match self {
            FormationId::F22 => "2-2",
            FormationId::F121 => "1-2-1",
            FormationId::F222 => "2-2-2",
            FormationId::F231 => "2-3-1",
        }
    }
}

impl fmt::Display for FormationId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionType {
    Individual,
    Pairs,
}

impl SubstitutionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubstitutionType::Individual => "individual",
            SubstitutionType::Pairs => "pairs",
        }
    }
}

impl fmt::Display for SubstitutionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubstitutionType {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(SubstitutionType::Individual),
            "pairs" => Ok(SubstitutionType::Pairs),
            _ => Err(LineupError::InvalidSubstitutionType(s.to_string())),
        }
    }
}

/// What happens to a pair's defender/attacker split when it comes back on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairRoleRotation {
    #[default]
    Keep,
    Swap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamConfig {
    pub format: MatchFormat,
    pub squad_size: usize,
    pub formation_id: FormationId,
    pub substitution_type: SubstitutionType,
    /// Only read in pairs mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair_role_rotation: Option<PairRoleRotation>,
}

impl TeamConfig {
    pub fn individual(format: MatchFormat, squad_size: usize, formation_id: FormationId) -> Self {
        Self {
            format,
            squad_size,
            formation_id,
            substitution_type: SubstitutionType::Individual,
            pair_role_rotation: None,
        }
    }

    /// The only pairs layout: 5v5, 2-2, three pairs plus a goalie.
    pub fn pairs(rotation: PairRoleRotation) -> Self {
        Self {
            format: MatchFormat::FiveVFive,
            squad_size: formation::PAIRS_SQUAD_SIZE,
            formation_id: FormationId::F22,
            substitution_type: SubstitutionType::Pairs,
            pair_role_rotation: Some(rotation),
        }
    }

    pub fn role_rotation(&self) -> PairRoleRotation {
        self.pair_role_rotation.unwrap_or_default()
    }

    pub fn is_pairs(&self) -> bool {
        self.substitution_type == SubstitutionType::Pairs
    }

    /// Check squad bounds, formation availability and the pairs layout.
    pub fn validate(&self, rules: &RulesConfig) -> Result<()> {
        let format_rules = rules.for_format(self.format);
        if self.squad_size < format_rules.min_squad_size
            || self.squad_size > format_rules.max_squad_size
        {
            return Err(LineupError::InvalidConfiguration(format!(
                "{} squad must have {}-{} players, got {}",
                self.format,
                format_rules.min_squad_size,
                format_rules.max_squad_size,
                self.squad_size
            )));
        }

        if !format_rules.formations.contains(&self.formation_id) {
            return Err(LineupError::UnknownFormation {
                formation: self.formation_id,
                format: self.format,
                squad_size: self.squad_size,
            });
        }

        if self.is_pairs() {
            if !format_rules.allow_pairs {
                return Err(LineupError::InvalidConfiguration(format!(
                    "pairs substitution is not available for {}",
                    self.format
                )));
            }
            if self.squad_size != formation::PAIRS_SQUAD_SIZE {
                return Err(LineupError::InvalidConfiguration(format!(
                    "pairs substitution needs exactly {} players, got {}",
                    formation::PAIRS_SQUAD_SIZE,
                    self.squad_size
                )));
            }
        }

        // Catalog lookup also rejects a formation registered for another format.
        formation::layout(self)?;

        Ok(())
    }
}
