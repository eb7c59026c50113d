//! JSON API for match-screen operations
//!
//! Every function takes JSON text and returns an `ApiResponse` as JSON text,
//! so a host UI can drive the engine without linking against its types.
//! Incoming snapshots are validated before any operation runs on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::RulesConfig;
use crate::engine::{apply_action, match_summary, GameAction, GameState};
use crate::error::LineupError;
use crate::models::{MatchSetup, PlayerTimeSummary};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string() }
    }
}

impl From<LineupError> for ApiError {
    fn from(err: LineupError) -> Self {
        Self::new(err.code(), &err.to_string())
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// One operation against the caller's current snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub schema_version: Option<String>,
    pub state: GameState,
    pub action: GameAction,
}

fn respond<T: Serialize>(result: Result<T, ApiError>) -> String {
    let response = match result {
        Ok(data) => ApiResponse::success(data),
        Err(error) => {
            error!("Lineup request failed: {} ({})", error.message, error.code);
            ApiResponse::error(error)
        }
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

fn parse<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T, ApiError> {
    serde_json::from_str(json)
        .map_err(|e| ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e)))
}

fn check_schema(version: Option<&str>) -> Result<(), ApiError> {
    match version {
        None => Ok(()),
        Some(v) if v == API_VERSION => Ok(()),
        Some(v) => Err(ApiError::new(
            "UNSUPPORTED_SCHEMA",
            &format!("Unsupported schema version {v}, expected {API_VERSION}"),
        )),
    }
}

/// Build the kickoff snapshot from a `MatchSetup` with default rules.
///
/// # Returns
/// JSON string containing `ApiResponse<GameState>`
pub fn start_game_json(setup_json: &str) -> String {
    start_game_json_with_rules(setup_json, &RulesConfig::default())
}

pub fn start_game_json_with_rules(setup_json: &str, rules: &RulesConfig) -> String {
    debug!("Processing start game request");
    respond(parse::<MatchSetup>(setup_json).and_then(|setup| {
        GameState::from_setup(&setup, rules).map_err(ApiError::from)
    }))
}

/// Apply one `GameAction`.
///
/// # Arguments
/// * `request_json` - JSON string containing `ActionRequest`
///
/// # Returns
/// JSON string containing `ApiResponse<GameState>`; on failure the caller
/// keeps the snapshot it sent.
pub fn apply_action_json(request_json: &str) -> String {
    let result = parse::<ActionRequest>(request_json).and_then(|request| {
        check_schema(request.schema_version.as_deref())?;
        request.state.validate()?;
        debug!("Applying {}", request.action.name());
        Ok(apply_action(&request.state, &request.action)?)
    });
    respond(result)
}

/// Per-player playing time at `now_ms`, for match recording.
///
/// # Arguments
/// * `state_json` - JSON string containing a `GameState`
/// * `now_ms` - epoch milliseconds; an open stint is credited up to this instant
///
/// # Returns
/// JSON string containing `ApiResponse<Vec<PlayerTimeSummary>>`
pub fn match_summary_json(state_json: &str, now_ms: i64) -> String {
    let result = parse::<GameState>(state_json).and_then(|state| {
        state.validate()?;
        Ok::<Vec<PlayerTimeSummary>, ApiError>(match_summary(&state, now_ms))
    });
    respond(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculate_clock_resume;
    use crate::engine::test_fixtures::individual_state;
    use serde_json::{json, Value};

    fn parse_response(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success("test_data");
        assert!(response.success);
        assert_eq!(response.data, Some("test_data"));
        assert!(response.error.is_none());
        assert_eq!(response.schema_version, API_VERSION);
    }

    #[test]
    fn test_start_game_json_workflow() {
        let setup = json!({
            "teamConfig": {
                "format": "5v5",
                "squadSize": 6,
                "formationId": "2-2",
                "substitutionType": "individual"
            },
            "squad": [{"id": "a"}, {"id": "b"}, {"id": "c"}, {"id": "d"}, {"id": "e"}, {"id": "f"}],
            "goalie": "f",
            "lineup": {
                "kind": "individual",
                "positions": {
                    "leftDefender": "a",
                    "rightDefender": "b",
                    "leftAttacker": "c",
                    "rightAttacker": "d",
                    "substitute_1": "e"
                }
            }
        });
        let response = parse_response(&start_game_json(&setup.to_string()));
        assert_eq!(response["success"], true);
        assert_eq!(response["schemaVersion"], API_VERSION);
        assert_eq!(response["data"]["nextPlayerIdToSubOut"], "a");
        assert_eq!(response["data"]["clockPaused"], true);
    }

    #[test]
    fn test_start_game_json_reports_engine_errors() {
        let setup = json!({
            "teamConfig": {
                "format": "7v7",
                "squadSize": 6,
                "formationId": "2-2",
                "substitutionType": "individual"
            },
            "squad": [],
            "goalie": "x",
            "lineup": {"kind": "individual", "positions": {}}
        });
        let response = parse_response(&start_game_json(&setup.to_string()));
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "INVALID_CONFIGURATION");

        let response = parse_response(&start_game_json("{not json"));
        assert_eq!(response["error"]["code"], "INVALID_JSON");
    }

    #[test]
    fn test_apply_action_json_round_trip() {
        let state = individual_state(6);
        let request = json!({
            "schemaVersion": "v1",
            "state": state,
            "action": {"type": "substitution", "nowMs": 0}
        });
        let response = parse_response(&apply_action_json(&request.to_string()));
        assert_eq!(response["success"], true);

        let next: GameState = serde_json::from_value(response["data"].clone()).unwrap();
        assert_eq!(next.rotation_queue.to_vec(), vec!["b", "c", "d", "e", "a"]);
    }

    #[test]
    fn test_apply_action_json_errors() {
        let state = individual_state(6);
        let request = json!({
            "schemaVersion": "v9",
            "state": state,
            "action": {"type": "substitution", "nowMs": 0}
        });
        let response = parse_response(&apply_action_json(&request.to_string()));
        assert_eq!(response["error"]["code"], "UNSUPPORTED_SCHEMA");

        let request = json!({
            "state": state,
            "action": {"type": "toggleInactive", "playerId": "e", "nowMs": 0}
        });
        let response = parse_response(&apply_action_json(&request.to_string()));
        assert_eq!(response["error"]["code"], "INACTIVE_UNSUPPORTED");

        let mut broken = state.clone();
        broken.clock_paused = false;
        let request = json!({"state": broken, "action": {"type": "substitution", "nowMs": 0}});
        let response = parse_response(&apply_action_json(&request.to_string()));
        assert_eq!(response["error"]["code"], "INVALID_STATE");
    }

    #[test]
    fn test_match_summary_json() {
        let state = individual_state(6);
        let state_json = serde_json::to_string(&state).unwrap();
        let response = parse_response(&match_summary_json(&state_json, 1000));
        let rows = response["data"].as_array().unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0]["playerId"], "a");
        assert_eq!(rows[0]["startedMatchAs"], "on_field");
        assert_eq!(rows[0]["timeOnFieldSeconds"], 0);
    }

    #[test]
    fn test_match_summary_json_credits_open_stints() {
        let running = calculate_clock_resume(&individual_state(6), 0).unwrap();
        let state_json = serde_json::to_string(&running).unwrap();
        let response = parse_response(&match_summary_json(&state_json, 90_500));
        let rows = response["data"].as_array().unwrap();
        assert_eq!(rows[0]["timeOnFieldSeconds"], 90);
        assert_eq!(rows[4]["timeAsSubstituteSeconds"], 90);

        let response = parse_response(&match_summary_json("{not json", 0));
        assert_eq!(response["error"]["code"], "INVALID_JSON");
    }
}
