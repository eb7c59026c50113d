use serde::{Deserialize, Serialize};

use super::position::{PlayerStatus, PositionKey, Role};

pub type PlayerId = String;

/// Accumulated seconds per role. `time_on_field_seconds` covers every
/// non-substitute role, goalie included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub time_on_field_seconds: u64,
    pub time_as_defender_seconds: u64,
    pub time_as_attacker_seconds: u64,
    pub time_as_midfielder_seconds: u64,
    pub time_as_goalie_seconds: u64,
    pub time_as_substitute_seconds: u64,
}

impl PlayerStats {
    /// Credit `seconds` to `role`.
    pub fn credit(&mut self, role: Role, seconds: u64) {
        match role {
            Role::Defender => self.time_as_defender_seconds += seconds,
            Role::Midfielder => self.time_as_midfielder_seconds += seconds,
            Role::Attacker => self.time_as_attacker_seconds += seconds,
            Role::Goalie => self.time_as_goalie_seconds += seconds,
            Role::Substitute => self.time_as_substitute_seconds += seconds,
        }
        if role.is_on_field() {
            self.time_on_field_seconds += seconds;
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.time_on_field_seconds + self.time_as_substitute_seconds
    }
}

/// Match-time player record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    /// Display name, defaults to the id
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stats: PlayerStats,
    pub current_status: PlayerStatus,
    pub current_position: Option<PositionKey>,
    pub current_role: Role,
    #[serde(default)]
    pub is_inactive: bool,
    /// Epoch milliseconds; `None` while the match clock is paused.
    pub last_stint_start_ms: Option<i64>,
    pub started_match_as: PlayerStatus,
}

impl Player {
    pub fn new(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        status: PlayerStatus,
        position: Option<PositionKey>,
        role: Role,
    ) -> Self {
        let id = id.into();
        let mut name = name.into();
        if name.is_empty() {
            name = id.clone();
        }
        Self {
            id,
            name,
            stats: PlayerStats::default(),
            current_status: status,
            current_position: position,
            current_role: role,
            is_inactive: false,
            last_stint_start_ms: None,
            started_match_as: status,
        }
    }

    pub fn is_on_field(&self) -> bool {
        self.current_status == PlayerStatus::OnField
    }

    pub fn is_goalie(&self) -> bool {
        self.current_status == PlayerStatus::Goalie
    }

    pub fn is_substitute(&self) -> bool {
        self.current_status == PlayerStatus::Substitute
    }

    /// Active substitute: eligible to come on.
    pub fn is_available_substitute(&self) -> bool {
        self.is_substitute() && !self.is_inactive
    }
}
