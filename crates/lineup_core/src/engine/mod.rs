//! Rotation engine: queue, stint accounting, substitutions and the
//! operations the match screen drives.

pub mod actions;
pub mod game_state;
pub mod operations;
pub mod rotation_queue;
pub mod stint;
pub mod substitutions;

#[cfg(test)]
pub(crate) mod test_fixtures;
#[cfg(test)]
mod proptest_gen;

pub use actions::{apply_action, GameAction};
pub use game_state::GameState;
pub use operations::{
    calculate_clock_pause, calculate_clock_resume, calculate_goalie_switch,
    calculate_pair_position_swap, calculate_player_toggle_inactive, calculate_position_switch,
    calculate_set_next_substitute, calculate_set_next_to_sub_out, calculate_undo, match_summary,
};
pub use rotation_queue::RotationQueue;
pub use substitutions::calculate_substitution;
