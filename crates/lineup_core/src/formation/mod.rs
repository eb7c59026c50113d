//! # Formation Catalog
//!
//! Static formation definitions: which position keys a formation puts on the
//! field, which substitute slots a squad size yields, and the role each key
//! credits time to.
//!
//! ```rust
//! use lineup_core::formation;
//! use lineup_core::models::{FormationId, MatchFormat, TeamConfig};
//!
//! let config = TeamConfig::individual(MatchFormat::FiveVFive, 7, FormationId::F121);
//! let subs = formation::get_substitute_positions(&config).unwrap();
//! assert_eq!(subs.len(), 2);
//! ```

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::{LineupError, Result};
use crate::models::{FormationId, MatchFormat, PositionKey, Role, TeamConfig};

/// Three defender/attacker pairs plus a goalie.
pub const PAIRS_SQUAD_SIZE: usize = 7;

/// Deactivating a player needs somebody left on the bench.
pub const MIN_SUBSTITUTES_FOR_INACTIVE: usize = 2;

/// Substitute slot numbers are carried in a `u8`.
pub const MAX_SUBSTITUTE_SLOTS: usize = u8::MAX as usize;

pub const PAIR_FIELD_KEYS: [PositionKey; 2] = [PositionKey::LeftPair, PositionKey::RightPair];

static FIELD_LAYOUTS: Lazy<HashMap<(MatchFormat, FormationId), Vec<PositionKey>>> = Lazy::new(|| {
    use PositionKey::*;

    let mut layouts = HashMap::new();
    layouts.insert(
        (MatchFormat::FiveVFive, FormationId::F22),
        vec![LeftDefender, RightDefender, LeftAttacker, RightAttacker],
    );
    layouts.insert(
        (MatchFormat::FiveVFive, FormationId::F121),
        vec![Defender, Left, Right, Attacker],
    );
    layouts.insert(
        (MatchFormat::SevenVSeven, FormationId::F222),
        vec![
            LeftDefender,
            RightDefender,
            LeftMidfielder,
            RightMidfielder,
            LeftAttacker,
            RightAttacker,
        ],
    );
    layouts.insert(
        (MatchFormat::SevenVSeven, FormationId::F231),
        vec![
            LeftDefender,
            RightDefender,
            LeftMidfielder,
            CenterMidfielder,
            RightMidfielder,
            Attacker,
        ],
    );
    layouts
});

/// Resolved positions for one team configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub field_positions: Vec<PositionKey>,
    pub substitute_positions: Vec<PositionKey>,
}

impl Layout {
    pub fn is_field_position(&self, key: PositionKey) -> bool {
        self.field_positions.contains(&key)
    }

    pub fn substitute_count(&self) -> usize {
        self.substitute_positions.len()
    }
}

fn unknown(config: &TeamConfig) -> LineupError {
    LineupError::UnknownFormation {
        formation: config.formation_id,
        format: config.format,
        squad_size: config.squad_size,
    }
}

/// Look up the layout for `config`.
pub fn layout(config: &TeamConfig) -> Result<Layout> {
    if config.is_pairs() {
        if config.format != MatchFormat::FiveVFive
            || config.formation_id != FormationId::F22
            || config.squad_size != PAIRS_SQUAD_SIZE
        {
            return Err(unknown(config));
        }
        return Ok(Layout {
            field_positions: PAIR_FIELD_KEYS.to_vec(),
            substitute_positions: vec![PositionKey::SubPair],
        });
    }

    let field = FIELD_LAYOUTS
        .get(&(config.format, config.formation_id))
        .ok_or_else(|| unknown(config))?;

    // Outfield plus goalie must fit in the squad.
    let on_pitch = field.len() + 1;
    if config.squad_size < on_pitch {
        return Err(unknown(config));
    }

    let substitute_positions = (1..=config.squad_size - on_pitch)
        .map(|n| {
            u8::try_from(n).map(PositionKey::Substitute).map_err(|_| {
                LineupError::InvalidConfiguration(format!(
                    "squad of {} leaves more than {} substitute slots",
                    config.squad_size,
                    MAX_SUBSTITUTE_SLOTS
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Layout { field_positions: field.clone(), substitute_positions })
}

pub fn get_field_positions(config: &TeamConfig) -> Result<Vec<PositionKey>> {
    Ok(layout(config)?.field_positions)
}

pub fn get_substitute_positions(config: &TeamConfig) -> Result<Vec<PositionKey>> {
    Ok(layout(config)?.substitute_positions)
}

/// Role credited while holding `key`. Pair keys have no single role.
pub fn get_position_role(key: PositionKey) -> Result<Role> {
    use PositionKey::*;

    match key {
        Goalie => Ok(Role::Goalie),
        LeftDefender | RightDefender | Defender => Ok(Role::Defender),
        Left | Right | LeftMidfielder | CenterMidfielder | RightMidfielder => Ok(Role::Midfielder),
        LeftAttacker | RightAttacker | Attacker => Ok(Role::Attacker),
        Substitute(_) => Ok(Role::Substitute),
        LeftPair | RightPair | SubPair => Err(LineupError::position(key)),
    }
}

/// Temporarily deactivating players needs individual mode and a bench of two.
pub fn supports_inactive(config: &TeamConfig) -> bool {
    if config.is_pairs() {
        return false;
    }
    layout(config)
        .map(|l| l.substitute_count() >= MIN_SUBSTITUTES_FOR_INACTIVE)
        .unwrap_or(false)
}
