use thiserror::Error;

use crate::models::{FormationId, MatchFormat, PositionKey};

pub type Result<T> = std::result::Result<T, LineupError>;

/// Engine failures. Every variant is a local validation failure raised before
/// any new snapshot exists, so the caller's last good state stays valid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineupError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Formation {formation} is not registered for {format} with {squad_size} players")]
    UnknownFormation { formation: FormationId, format: MatchFormat, squad_size: usize },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid rotation queue: {0}")]
    InvalidQueueComposition(String),

    #[error("Player {player_id} is not at the expected place in the active rotation")]
    PlayerNotInActiveQueue { player_id: String },

    #[error("Player {player_id} is already inactive")]
    PlayerAlreadyInactive { player_id: String },

    #[error("Player {player_id} is not inactive")]
    PlayerNotInactive { player_id: String },

    #[error("Not enough active players to rotate: need {required}, have {available}")]
    InsufficientActivePlayers { required: usize, available: usize },

    #[error("Substitution type {0} is not supported here")]
    InvalidSubstitutionType(String),

    #[error("Inactive players are not supported for this team setup")]
    InactiveUnsupported,

    #[error("Player {player_id} holds a position and cannot be deactivated")]
    CannotDeactivateFieldPlayer { player_id: String },

    #[error("Player {player_id} is not in the squad")]
    PlayerNotInSquad { player_id: String },

    #[error("Player {player_id} is inactive")]
    PlayerInactive { player_id: String },

    #[error("Player {player_id} is not on the field")]
    PlayerNotOnField { player_id: String },

    #[error("Player {player_id} is not an active substitute")]
    NotASubstitute { player_id: String },

    #[error("Inconsistent game state: {0}")]
    InvalidState(String),

    #[error("Rules config error: {0}")]
    Config(String),
}

impl LineupError {
    pub(crate) fn position(key: PositionKey) -> Self {
        LineupError::InvalidPosition { position: key.to_string() }
    }

    /// Stable machine-readable code for host integrations.
    pub fn code(&self) -> &'static str {
        match self {
            LineupError::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            LineupError::UnknownFormation { .. } => "UNKNOWN_FORMATION",
            LineupError::InvalidPosition { .. } => "INVALID_POSITION",
            LineupError::InvalidQueueComposition(_) => "INVALID_QUEUE_COMPOSITION",
            LineupError::PlayerNotInActiveQueue { .. } => "PLAYER_NOT_IN_ACTIVE_QUEUE",
            LineupError::PlayerAlreadyInactive { .. } => "PLAYER_ALREADY_INACTIVE",
            LineupError::PlayerNotInactive { .. } => "PLAYER_NOT_INACTIVE",
            LineupError::InsufficientActivePlayers { .. } => "INSUFFICIENT_ACTIVE_PLAYERS",
            LineupError::InvalidSubstitutionType(_) => "INVALID_SUBSTITUTION_TYPE",
            LineupError::InactiveUnsupported => "INACTIVE_UNSUPPORTED",
            LineupError::CannotDeactivateFieldPlayer { .. } => "CANNOT_DEACTIVATE_FIELD_PLAYER",
            LineupError::PlayerNotInSquad { .. } => "PLAYER_NOT_IN_SQUAD",
            LineupError::PlayerInactive { .. } => "PLAYER_INACTIVE",
            LineupError::PlayerNotOnField { .. } => "PLAYER_NOT_ON_FIELD",
            LineupError::NotASubstitute { .. } => "NOT_A_SUBSTITUTE",
            LineupError::InvalidState(_) => "INVALID_STATE",
            LineupError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether the failure stems from the request itself rather than from the
    /// snapshot or environment it was applied to.
    pub fn is_caller_fault(&self) -> bool {
        !matches!(self, LineupError::InvalidState(_) | LineupError::Config(_))
    }
}

impl From<serde_json::Error> for LineupError {
    fn from(err: serde_json::Error) -> Self {
        LineupError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for LineupError {
    fn from(err: serde_yaml::Error) -> Self {
        LineupError::Config(err.to_string())
    }
}
