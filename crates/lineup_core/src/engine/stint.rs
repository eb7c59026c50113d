//! Stint Tracker
//!
//! Pure time accounting. A stint is the interval a player spends in one
//! status/role; closing it credits the elapsed whole seconds to the matching
//! accumulator. Pause handling belongs to the caller: while the clock is
//! paused no stint is open and these functions must not be called.

use crate::models::{Player, PlayerStatus, PositionKey, Role};

const MS_PER_SECOND: i64 = 1000;

/// Whole seconds between `start_ms` and `now_ms`.
///
/// Never negative; a missing start counts as zero. Fractions are truncated.
pub fn stint_duration(now_ms: i64, start_ms: Option<i64>) -> u64 {
    match start_ms {
        Some(start) => (now_ms.saturating_sub(start).max(0) / MS_PER_SECOND) as u64,
        None => 0,
    }
}

/// Credit the running stint to `current_role` and clear its start.
pub fn close_stint(player: &Player, now_ms: i64) -> Player {
    let mut updated = player.clone();
    let seconds = stint_duration(now_ms, player.last_stint_start_ms);
    updated.stats.credit(player.current_role, seconds);
    updated.last_stint_start_ms = None;
    updated
}

pub fn open_stint(player: &Player, now_ms: i64) -> Player {
    let mut updated = player.clone();
    updated.last_stint_start_ms = Some(now_ms);
    updated
}

/// New placement for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub status: PlayerStatus,
    pub position: Option<PositionKey>,
    pub role: Role,
}

impl Assignment {
    pub fn goalie() -> Self {
        Self {
            status: PlayerStatus::Goalie,
            position: Some(PositionKey::Goalie),
            role: Role::Goalie,
        }
    }

    pub fn field(position: PositionKey, role: Role) -> Self {
        Self { status: PlayerStatus::OnField, position: Some(position), role }
    }

    pub fn substitute() -> Self {
        Self { status: PlayerStatus::Substitute, position: None, role: Role::Substitute }
    }
}

/// Move a player into `assignment`.
///
/// The stint closes and reopens only when status or role actually changes
/// and the clock is running (`now_ms` is `Some`). Returns whether it did.
pub fn transition(player: &Player, assignment: Assignment, now_ms: Option<i64>) -> (Player, bool) {
    let changed =
        player.current_status != assignment.status || player.current_role != assignment.role;

    let mut updated = match now_ms {
        Some(now) if changed && !player.is_inactive => close_stint(player, now),
        _ => player.clone(),
    };

    updated.current_status = assignment.status;
    updated.current_position = assignment.position;
    updated.current_role = assignment.role;

    if let Some(now) = now_ms {
        if changed && !updated.is_inactive {
            updated = open_stint(&updated, now);
        }
    }

    (updated, changed)
}

/// Seconds `player` would have if its running stint closed at `now_ms`.
pub fn projected_stats(player: &Player, now_ms: i64) -> crate::models::PlayerStats {
    close_stint(player, now_ms).stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defender() -> Player {
        Player::new(
            "ava",
            "Ava",
            PlayerStatus::OnField,
            Some(PositionKey::LeftDefender),
            Role::Defender,
        )
    }

    #[test]
    fn test_duration_is_truncated_and_non_negative() {
        assert_eq!(stint_duration(10_999, Some(1_000)), 9);
        assert_eq!(stint_duration(1_000, Some(5_000)), 0);
        assert_eq!(stint_duration(1_000, None), 0);
        assert_eq!(stint_duration(61_000, Some(1_000)), 60);
    }

    #[test]
    fn test_close_credits_role_and_field_time() {
        let p = open_stint(&defender(), 0);
        let closed = close_stint(&p, 90_500);
        assert_eq!(closed.stats.time_as_defender_seconds, 90);
        assert_eq!(closed.stats.time_on_field_seconds, 90);
        assert_eq!(closed.stats.time_as_substitute_seconds, 0);
        assert_eq!(closed.last_stint_start_ms, None);
        // input untouched
        assert_eq!(p.stats.time_as_defender_seconds, 0);
    }

    #[test]
    fn test_close_substitute_not_on_field() {
        let p = Player::new("ben", "", PlayerStatus::Substitute, None, Role::Substitute);
        let closed = close_stint(&open_stint(&p, 1_000), 31_000);
        assert_eq!(closed.stats.time_as_substitute_seconds, 30);
        assert_eq!(closed.stats.time_on_field_seconds, 0);
    }

    #[test]
    fn test_transition_reopens_on_role_change() {
        let p = open_stint(&defender(), 0);
        let (moved, changed) = transition(&p, Assignment::substitute(), Some(45_000));
        assert!(changed);
        assert_eq!(moved.stats.time_as_defender_seconds, 45);
        assert_eq!(moved.last_stint_start_ms, Some(45_000));
        assert_eq!(moved.current_position, None);
        assert_eq!(moved.current_role, Role::Substitute);
    }

    #[test]
    fn test_transition_same_role_keeps_stint() {
        let p = open_stint(&defender(), 0);
        let (moved, changed) = transition(
            &p,
            Assignment::field(PositionKey::RightDefender, Role::Defender),
            Some(45_000),
        );
        assert!(!changed);
        assert_eq!(moved.last_stint_start_ms, Some(0));
        assert_eq!(moved.current_position, Some(PositionKey::RightDefender));
        assert_eq!(moved.stats.time_on_field_seconds, 0);
    }

    #[test]
    fn test_transition_while_paused_skips_accounting() {
        let p = defender();
        let (moved, changed) = transition(&p, Assignment::goalie(), None);
        assert!(changed);
        assert_eq!(moved.last_stint_start_ms, None);
        assert_eq!(moved.stats, p.stats);
        assert_eq!(moved.current_status, PlayerStatus::Goalie);
    }

    #[test]
    fn test_projected_stats_includes_running_stint() {
        let p = open_stint(&defender(), 10_000);
        let stats = projected_stats(&p, 70_000);
        assert_eq!(stats.time_on_field_seconds, 60);
        assert_eq!(p.stats.time_on_field_seconds, 0);
    }
}
