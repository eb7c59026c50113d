//! One user-facing control, one action.

use serde::{Deserialize, Serialize};

use super::game_state::GameState;
use super::operations::*;
use super::substitutions::calculate_substitution;
use crate::error::Result;
use crate::models::{PlayerId, PositionKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameAction {
    Substitution { now_ms: i64 },
    PositionSwitch { position_a: PositionKey, position_b: PositionKey, now_ms: i64 },
    GoalieSwitch { new_goalie_id: PlayerId, now_ms: i64 },
    ToggleInactive { player_id: PlayerId, now_ms: i64 },
    PairPositionSwap { pair_key: PositionKey, now_ms: i64 },
    SetNextToSubOut { player_id: PlayerId },
    SetNextSubstitute { player_id: PlayerId },
    PauseClock { now_ms: i64 },
    ResumeClock { now_ms: i64 },
    /// Restore a snapshot the caller kept
    Undo { previous: Box<GameState> },
}

impl GameAction {
    pub fn name(&self) -> &'static str {
        match self {
            GameAction::Substitution { .. } => "substitution",
            GameAction::PositionSwitch { .. } => "positionSwitch",
            GameAction::GoalieSwitch { .. } => "goalieSwitch",
            GameAction::ToggleInactive { .. } => "toggleInactive",
            GameAction::PairPositionSwap { .. } => "pairPositionSwap",
            GameAction::SetNextToSubOut { .. } => "setNextToSubOut",
            GameAction::SetNextSubstitute { .. } => "setNextSubstitute",
            GameAction::PauseClock { .. } => "pauseClock",
            GameAction::ResumeClock { .. } => "resumeClock",
            GameAction::Undo { .. } => "undo",
        }
    }
}

/// Dispatch `action` against `state`.
pub fn apply_action(state: &GameState, action: &GameAction) -> Result<GameState> {
    match action {
        GameAction::Substitution { now_ms } => calculate_substitution(state, *now_ms),
        GameAction::PositionSwitch { position_a, position_b, now_ms } => {
            calculate_position_switch(state, *position_a, *position_b, *now_ms)
        }
        GameAction::GoalieSwitch { new_goalie_id, now_ms } => {
            calculate_goalie_switch(state, new_goalie_id, *now_ms)
        }
        GameAction::ToggleInactive { player_id, now_ms } => {
            calculate_player_toggle_inactive(state, player_id, *now_ms)
        }
        GameAction::PairPositionSwap { pair_key, now_ms } => {
            calculate_pair_position_swap(state, *pair_key, *now_ms)
        }
        GameAction::SetNextToSubOut { player_id } => {
            calculate_set_next_to_sub_out(state, player_id)
        }
        GameAction::SetNextSubstitute { player_id } => {
            calculate_set_next_substitute(state, player_id)
        }
        GameAction::PauseClock { now_ms } => calculate_clock_pause(state, *now_ms),
        GameAction::ResumeClock { now_ms } => calculate_clock_resume(state, *now_ms),
        GameAction::Undo { previous } => {
            previous.validate()?;
            Ok(calculate_undo(state, previous))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::individual_state;

    #[test]
    fn test_action_json_shape() {
        let json = r#"{"type":"positionSwitch","positionA":"leftDefender",
            "positionB":"substitute_1","nowMs":5}"#;
        let action: GameAction = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            GameAction::PositionSwitch {
                position_a: PositionKey::LeftDefender,
                position_b: PositionKey::Substitute(1),
                now_ms: 5,
            }
        );
        assert_eq!(action.name(), "positionSwitch");

        let json = serde_json::to_value(GameAction::SetNextToSubOut { player_id: "a".into() })
            .unwrap();
        assert_eq!(json, serde_json::json!({"type": "setNextToSubOut", "playerId": "a"}));
    }

    #[test]
    fn test_apply_action_dispatches() {
        let state = individual_state(6);
        let via_action = apply_action(&state, &GameAction::Substitution { now_ms: 0 }).unwrap();
        assert_eq!(via_action, calculate_substitution(&state, 0).unwrap());

        let undo = GameAction::Undo { previous: Box::new(state.clone()) };
        let undone = apply_action(&via_action, &undo).unwrap();
        assert_eq!(undone, state);
    }

    #[test]
    fn test_undo_rejects_broken_snapshot() {
        let state = individual_state(6);
        let mut broken = state.clone();
        broken.rotation_queue = Default::default();
        let undo = GameAction::Undo { previous: Box::new(broken) };
        let err = apply_action(&state, &undo).unwrap_err();
        assert_eq!(err.code(), "INVALID_STATE");
    }
}
