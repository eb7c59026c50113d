//! String-in, string-out entry points for host integrations.

pub mod game_json;

pub use game_json::*;
