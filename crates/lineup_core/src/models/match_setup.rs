//! Match Setup
//!
//! Squad selection and starting placement handed over by the configuration
//! screens. Everything here is input; `GameState::from_setup` validates it.

use serde::{Deserialize, Serialize};

use crate::error::{LineupError, Result};
use crate::formation;

use super::formation::{FormationKind, PlayerPair};
use super::player::PlayerId;
use super::position::PositionKey;
use super::team_config::TeamConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadPlayer {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
}

impl SquadPlayer {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

impl From<&str> for SquadPlayer {
    fn from(id: &str) -> Self {
        Self::new(id, id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSetup {
    pub team_config: TeamConfig,
    pub squad: Vec<SquadPlayer>,
    pub goalie: PlayerId,
    /// Starting placement of everyone except the goalie
    pub lineup: FormationKind,
    /// Substitutes sitting out from kickoff
    #[serde(default)]
    pub inactive: Vec<PlayerId>,
}

impl MatchSetup {
    /// Fill the formation in catalog order with the non-goalie players in
    /// squad order: field positions first, then substitute slots. Pairs take
    /// defender then attacker for `leftPair`, `rightPair`, `subPair`.
    pub fn in_squad_order(
        team_config: TeamConfig,
        squad: Vec<SquadPlayer>,
        goalie: impl Into<PlayerId>,
    ) -> Result<Self> {
        let goalie = goalie.into();
        if !squad.iter().any(|p| p.id == goalie) {
            return Err(LineupError::PlayerNotInSquad { player_id: goalie });
        }

        let layout = formation::layout(&team_config)?;
        let outfield: Vec<PlayerId> =
            squad.iter().filter(|p| p.id != goalie).map(|p| p.id.clone()).collect();

        let lineup = if team_config.is_pairs() {
            let keys = all_keys(&layout);
            if outfield.len() != keys.len() * 2 {
                return Err(mismatch(keys.len() * 2, outfield.len()));
            }
            FormationKind::Pairs {
                pairs: keys
                    .into_iter()
                    .zip(outfield.chunks(2))
                    .map(|(key, ids)| (key, PlayerPair::new(ids[0].clone(), ids[1].clone())))
                    .collect(),
            }
        } else {
            let keys = all_keys(&layout);
            if outfield.len() != keys.len() {
                return Err(mismatch(keys.len(), outfield.len()));
            }
            FormationKind::Individual { positions: keys.into_iter().zip(outfield).collect() }
        };

        Ok(Self { team_config, squad, goalie, lineup, inactive: Vec::new() })
    }

    pub fn with_inactive(
        mut self,
        inactive: impl IntoIterator<Item = impl Into<PlayerId>>,
    ) -> Self {
        self.inactive = inactive.into_iter().map(Into::into).collect();
        self
    }

    pub fn squad_member(&self, id: &str) -> Option<&SquadPlayer> {
        self.squad.iter().find(|p| p.id == id)
    }
}

fn all_keys(layout: &formation::Layout) -> Vec<PositionKey> {
    layout.field_positions.iter().chain(&layout.substitute_positions).copied().collect()
}

fn mismatch(expected: usize, found: usize) -> LineupError {
    LineupError::InvalidConfiguration(format!(
        "lineup needs {expected} outfield players, squad provides {found}"
    ))
}
