pub mod formation;
pub mod match_setup;
pub mod match_summary;
pub mod player;
pub mod position;
pub mod team_config;

pub use formation::{Formation, FormationKind, Placement, PlayerPair};
pub use match_setup::{MatchSetup, SquadPlayer};
pub use match_summary::PlayerTimeSummary;
pub use player::{Player, PlayerId, PlayerStats};
pub use position::{PairMember, PlayerStatus, PositionKey, Role};
pub use team_config::{FormationId, MatchFormat, PairRoleRotation, SubstitutionType, TeamConfig};
