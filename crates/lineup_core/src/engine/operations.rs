//! Game State Engine
//!
//! Manual overrides and match-clock control. Every function takes the
//! current snapshot by reference and returns a fresh one; see
//! [`calculate_substitution`](super::substitutions::calculate_substitution)
//! for the rotation itself.

use tracing::debug;

use super::game_state::GameState;
use super::stint;
use crate::error::{LineupError, Result};
use crate::formation;
use crate::models::{FormationKind, Placement, PlayerId, PlayerTimeSummary, PositionKey};

fn field_key(state: &GameState, key: PositionKey) -> Result<PositionKey> {
    if state.layout()?.is_field_position(key) {
        Ok(key)
    } else {
        Err(LineupError::position(key))
    }
}

/// Swap the occupants of two field positions. Pairs move as a unit.
pub fn calculate_position_switch(
    state: &GameState,
    position_a: PositionKey,
    position_b: PositionKey,
    now_ms: i64,
) -> Result<GameState> {
    let a = field_key(state, position_a)?;
    let b = field_key(state, position_b)?;
    if a == b {
        return Err(LineupError::position(b));
    }

    let mut next = state.clone();
    let moved: Vec<PlayerId> = match &mut next.formation.kind {
        FormationKind::Individual { positions } => {
            let first = positions.get(&a).cloned().ok_or_else(|| LineupError::position(a))?;
            let second = positions.get(&b).cloned().ok_or_else(|| LineupError::position(b))?;
            positions.insert(a, second.clone());
            positions.insert(b, first.clone());
            vec![first, second]
        }
        FormationKind::Pairs { pairs } => {
            let first = pairs.get(&a).cloned().ok_or_else(|| LineupError::position(a))?;
            let second = pairs.get(&b).cloned().ok_or_else(|| LineupError::position(b))?;
            let moved = vec![
                first.defender.clone(),
                first.attacker.clone(),
                second.defender.clone(),
                second.attacker.clone(),
            ];
            pairs.insert(a, second);
            pairs.insert(b, first);
            moved
        }
    };

    next.settle(&moved, state.clock_time(now_ms))?;
    next.refresh_rotation_hints();
    next.players_to_highlight = moved;
    debug!("Position switch {} <-> {}", a, b);
    Ok(next)
}

/// Put `new_goalie_id` in goal. The outgoing goalie takes over the new
/// goalie's placement and rotation slot.
pub fn calculate_goalie_switch(
    state: &GameState,
    new_goalie_id: &str,
    now_ms: i64,
) -> Result<GameState> {
    let incoming = state.player(new_goalie_id)?;
    if incoming.is_goalie() {
        return Err(LineupError::InvalidConfiguration(format!(
            "player {new_goalie_id} is already the goalie"
        )));
    }
    if incoming.is_inactive {
        return Err(LineupError::PlayerInactive { player_id: new_goalie_id.to_string() });
    }

    let placement = state.formation.locate(new_goalie_id).ok_or_else(|| {
        LineupError::InvalidState(format!("player {new_goalie_id} has no position"))
    })?;
    let old_goalie = state.goalie().clone();
    let new_goalie = incoming.id.clone();

    let mut next = state.clone();
    next.formation.place(Placement::Goalie, new_goalie.clone());
    next.formation.place(placement, old_goalie.clone());
    next.rotation_queue.replace(&new_goalie, old_goalie.clone())?;

    let moved = vec![old_goalie, new_goalie];
    next.settle(&moved, state.clock_time(now_ms))?;
    next.refresh_rotation_hints();
    next.players_to_highlight = moved;
    debug!("Goalie switch: {:?}", next.players_to_highlight);
    Ok(next)
}

/// Move a substitute out of or back into the rotation.
pub fn calculate_player_toggle_inactive(
    state: &GameState,
    player_id: &str,
    now_ms: i64,
) -> Result<GameState> {
    if !formation::supports_inactive(&state.team_config) {
        return Err(LineupError::InactiveUnsupported);
    }
    let player = state.player(player_id)?;
    if !player.is_substitute() {
        return Err(LineupError::CannotDeactivateFieldPlayer { player_id: player_id.to_string() });
    }

    let now = state.clock_time(now_ms);
    let mut next = state.clone();
    let updated = if player.is_inactive {
        next.rotation_queue.reactivate_player(player_id)?;
        let mut p = player.clone();
        p.is_inactive = false;
        match now {
            Some(now) => stint::open_stint(&p, now),
            None => p,
        }
    } else {
        if state.available_substitutes().len() <= 1 {
            return Err(LineupError::InsufficientActivePlayers {
                required: state.field_players_in_rotation().len() + 1,
                available: state.rotation_queue.active().len() - 1,
            });
        }
        next.rotation_queue.deactivate_player(player_id)?;
        let mut p = match now {
            Some(now) => stint::close_stint(player, now),
            None => player.clone(),
        };
        p.is_inactive = true;
        p
    };

    let activated = !updated.is_inactive;
    next.all_players.insert(updated.id.clone(), updated);
    next.sync_substitute_slots()?;
    next.refresh_rotation_hints();
    next.players_to_highlight = vec![player_id.to_string()];
    debug!("Player {} active: {}", player_id, activated);
    Ok(next)
}

/// Defender and attacker of one field pair trade roles.
pub fn calculate_pair_position_swap(
    state: &GameState,
    pair_key: PositionKey,
    now_ms: i64,
) -> Result<GameState> {
    if !state.formation.is_pairs() {
        return Err(LineupError::InvalidSubstitutionType(
            state.team_config.substitution_type.to_string(),
        ));
    }
    let key = field_key(state, pair_key)?;

    let mut next = state.clone();
    let moved = match &mut next.formation.kind {
        FormationKind::Pairs { pairs } => {
            let pair = pairs.get_mut(&key).ok_or_else(|| LineupError::position(key))?;
            *pair = pair.flipped();
            vec![pair.defender.clone(), pair.attacker.clone()]
        }
        FormationKind::Individual { .. } => return Err(LineupError::position(key)),
    };

    next.settle(&moved, state.clock_time(now_ms))?;
    next.refresh_rotation_hints();
    next.players_to_highlight = moved;
    debug!("Pair role swap at {}", key);
    Ok(next)
}

/// Make a field player (pairs: their whole pair) the next to come off.
pub fn calculate_set_next_to_sub_out(state: &GameState, player_id: &str) -> Result<GameState> {
    let player = state.player(player_id)?;
    if !player.is_on_field() {
        return Err(LineupError::PlayerNotOnField { player_id: player_id.to_string() });
    }

    let mut next = state.clone();
    let pair = state.formation.pair_key_of(player_id).and_then(|k| state.formation.pair_at(k));
    let moved = match pair {
        Some(pair) => {
            next.rotation_queue.move_to_front(&pair.attacker)?;
            next.rotation_queue.move_to_front(&pair.defender)?;
            vec![pair.defender.clone(), pair.attacker.clone()]
        }
        None => {
            next.rotation_queue.move_to_front(player_id)?;
            vec![player_id.to_string()]
        }
    };

    next.refresh_rotation_hints();
    next.players_to_highlight = moved;
    debug!("Next off: {}", player_id);
    Ok(next)
}

/// Make an active substitute the next to come on.
pub fn calculate_set_next_substitute(state: &GameState, player_id: &str) -> Result<GameState> {
    if state.formation.is_pairs() {
        return Err(LineupError::InvalidSubstitutionType(
            state.team_config.substitution_type.to_string(),
        ));
    }
    if !state.player(player_id)?.is_available_substitute() {
        return Err(LineupError::NotASubstitute { player_id: player_id.to_string() });
    }

    let first_substitute = state.field_players_in_rotation().len();
    let mut next = state.clone();
    next.rotation_queue.move_to(player_id, first_substitute)?;
    next.sync_substitute_slots()?;
    next.refresh_rotation_hints();
    next.players_to_highlight = vec![player_id.to_string()];
    debug!("Next on: {}", player_id);
    Ok(next)
}

/// Stop the match clock, crediting every running stint. Pausing a paused
/// clock returns the snapshot unchanged.
pub fn calculate_clock_pause(state: &GameState, now_ms: i64) -> Result<GameState> {
    let mut next = state.clone();
    next.players_to_highlight.clear();
    if state.clock_paused {
        return Ok(next);
    }

    for player in next.all_players.values_mut() {
        if !player.is_inactive {
            *player = stint::close_stint(player, now_ms);
        }
    }
    next.clock_paused = true;
    debug!("Clock paused at {}", now_ms);
    Ok(next)
}

/// Restart the match clock. The first resume is kickoff.
pub fn calculate_clock_resume(state: &GameState, now_ms: i64) -> Result<GameState> {
    let mut next = state.clone();
    next.players_to_highlight.clear();
    if !state.clock_paused {
        return Ok(next);
    }

    for player in next.all_players.values_mut() {
        if !player.is_inactive {
            *player = stint::open_stint(player, now_ms);
        }
    }
    next.clock_paused = false;
    debug!("Clock resumed at {}", now_ms);
    Ok(next)
}

/// The engine keeps no history: undo hands back the snapshot the caller
/// retained before the last operation.
pub fn calculate_undo(_current: &GameState, previous: &GameState) -> GameState {
    debug!("Undo");
    previous.clone()
}

/// Per-player seconds so far, counting any stint still running at `now_ms`.
pub fn match_summary(state: &GameState, now_ms: i64) -> Vec<PlayerTimeSummary> {
    state
        .all_players
        .values()
        .map(|player| {
            let stats = match state.clock_time(now_ms) {
                Some(now) if player.last_stint_start_ms.is_some() => {
                    stint::projected_stats(player, now)
                }
                _ => player.stats.clone(),
            };
            PlayerTimeSummary::from_stats(
                player.id.clone(),
                player.name.clone(),
                player.started_match_as,
                &stats,
            )
        })
        .collect()
}
