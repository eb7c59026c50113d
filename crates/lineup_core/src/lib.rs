//! # lineup_core - Youth Match Lineup Rotation Engine
//!
//! Tracks who is on the field during a small-sided youth match, decides who
//! comes off next, and accounts every player's playing time by role.
//!
//! ## Features
//! - Fair-play rotation queue with an inactive segment for resting players
//! - Individual and pairs substitution for 5v5 and 7v7
//! - Per-role stint accounting with a pausable match clock
//! - Immutable snapshots: every operation returns a new `GameState`
//! - JSON API for host UIs

// Re-exported operation names mirror the screen controls that trigger them
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod formation;
pub mod models;

// Re-export main API functions
pub use api::{apply_action_json, match_summary_json, start_game_json, ApiError, ApiResponse};
pub use config::RulesConfig;
pub use engine::{
    apply_action, calculate_clock_pause, calculate_clock_resume, calculate_goalie_switch,
    calculate_pair_position_swap, calculate_player_toggle_inactive, calculate_position_switch,
    calculate_set_next_substitute, calculate_set_next_to_sub_out, calculate_substitution,
    calculate_undo, match_summary, GameAction, GameState, RotationQueue,
};
pub use error::{LineupError, Result};

// Re-export model types
pub use models::{
    Formation, FormationId, FormationKind, MatchFormat, MatchSetup, PairRoleRotation, Player,
    PlayerId, PlayerPair, PlayerStats, PlayerStatus, PlayerTimeSummary, PositionKey, Role,
    SquadPlayer, SubstitutionType, TeamConfig,
};
