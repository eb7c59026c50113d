//! End-of-match playing time, in the shape handed to match recording.

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerStats};
use super::position::PlayerStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTimeSummary {
    pub player_id: PlayerId,
    pub name: String,
    pub started_match_as: PlayerStatus,
    pub time_on_field_seconds: u64,
    pub time_as_defender_seconds: u64,
    pub time_as_midfielder_seconds: u64,
    pub time_as_attacker_seconds: u64,
    pub time_as_goalie_seconds: u64,
    pub time_as_substitute_seconds: u64,
}

impl PlayerTimeSummary {
    pub fn from_stats(
        player_id: PlayerId,
        name: String,
        started_match_as: PlayerStatus,
        stats: &PlayerStats,
    ) -> Self {
        Self {
            player_id,
            name,
            started_match_as,
            time_on_field_seconds: stats.time_on_field_seconds,
            time_as_defender_seconds: stats.time_as_defender_seconds,
            time_as_midfielder_seconds: stats.time_as_midfielder_seconds,
            time_as_attacker_seconds: stats.time_as_attacker_seconds,
            time_as_goalie_seconds: stats.time_as_goalie_seconds,
            time_as_substitute_seconds: stats.time_as_substitute_seconds,
        }
    }

    /// Share of tracked time spent on the field, 0.0 when nothing was tracked.
    pub fn field_share(&self) -> f64 {
        let total = self.time_on_field_seconds + self.time_as_substitute_seconds;
        if total == 0 {
            return 0.0;
        }
        self.time_on_field_seconds as f64 / total as f64
    }
}
