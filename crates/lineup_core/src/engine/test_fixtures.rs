//! Shared snapshots for engine tests.
//!
//! Squads are lettered `a`, `b`, `c`… in placement order; the last letter
//! keeps goal.

use crate::config::RulesConfig;
use crate::engine::GameState;
use crate::models::{
    FormationId, MatchFormat, MatchSetup, PairRoleRotation, SquadPlayer, TeamConfig,
};

pub const LETTERS: [&str; 15] =
    ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o"];

pub fn squad(ids: &[&str]) -> Vec<SquadPlayer> {
    ids.iter().map(|id| SquadPlayer::from(*id)).collect()
}

pub fn setup_for(config: TeamConfig) -> MatchSetup {
    let ids = &LETTERS[..config.squad_size];
    let goalie = ids[ids.len() - 1];
    MatchSetup::in_squad_order(config, squad(ids), goalie).unwrap()
}

/// 5v5 `2-2`, individual substitutions.
pub fn individual_state(squad_size: usize) -> GameState {
    let config = TeamConfig::individual(MatchFormat::FiveVFive, squad_size, FormationId::F22);
    GameState::from_setup(&setup_for(config), &RulesConfig::default()).unwrap()
}

/// 5v5 pairs: `a`/`b` left, `c`/`d` right, `e`/`f` waiting, `g` in goal.
pub fn pairs_state(rotation: PairRoleRotation) -> GameState {
    GameState::from_setup(&setup_for(TeamConfig::pairs(rotation)), &RulesConfig::default()).unwrap()
}
