//! Substitution Manager
//!
//! Computes the formation and queue delta for one substitution.
//!
//! ## Topologies
//! - **Individual**: the queue front leaves the field, `substitute_1` takes
//!   the vacated position, every other active substitute moves up one slot
//!   and the outgoing player waits in the last active slot.
//! - **Pairs**: the field pair holding the queue front swaps wholesale with
//!   `subPair`; with `swap` rotation the incoming pair flips
//!   defender/attacker relative to its last stint.

use std::collections::BTreeMap;
use tracing::debug;

use super::game_state::GameState;
use crate::error::{LineupError, Result};
use crate::models::{
    FormationKind, PairRoleRotation, Placement, PlayerId, PlayerPair, PositionKey, SubstitutionType,
};

pub fn calculate_substitution(state: &GameState, now_ms: i64) -> Result<GameState> {
    let next = match (&state.formation.kind, state.team_config.substitution_type) {
        (FormationKind::Individual { positions }, SubstitutionType::Individual) => {
            individual_substitution(state, positions, now_ms)
        }
        (FormationKind::Pairs { pairs }, SubstitutionType::Pairs) => {
            pairs_substitution(state, pairs, now_ms)
        }
        _ => Err(LineupError::InvalidSubstitutionType(
            state.team_config.substitution_type.to_string(),
        )),
    }?;
    debug!("Substitution: {:?}", next.players_to_highlight);
    Ok(next)
}

fn insufficient(state: &GameState) -> LineupError {
    let field = state.field_players_in_rotation().len();
    LineupError::InsufficientActivePlayers {
        required: field + 1,
        available: state.rotation_queue.active().len(),
    }
}

fn individual_substitution(
    state: &GameState,
    positions: &BTreeMap<PositionKey, PlayerId>,
    now_ms: i64,
) -> Result<GameState> {
    if state.available_substitutes().is_empty() {
        return Err(insufficient(state));
    }

    let incoming = positions
        .get(&PositionKey::Substitute(1))
        .cloned()
        .ok_or_else(|| insufficient(state))?;
    if !state.player(&incoming)?.is_available_substitute() {
        return Err(LineupError::InvalidState(format!(
            "substitute_1 holds {incoming}, who cannot come on"
        )));
    }

    let outgoing = state
        .field_players_in_rotation()
        .first()
        .map(|id| (*id).clone())
        .ok_or_else(|| insufficient(state))?;
    let vacated = state.player(&outgoing)?.current_position.ok_or_else(|| {
        LineupError::InvalidState(format!("field player {outgoing} has no position"))
    })?;

    let mut next = state.clone();
    next.rotation_queue.rotate_player(&outgoing)?;
    next.formation.place(Placement::Position(vacated), incoming.clone());
    next.formation.place(Placement::Position(PositionKey::Substitute(1)), outgoing.clone());
    next.sync_substitute_slots()?;

    let moved = vec![outgoing, incoming];
    next.settle(&moved, state.clock_time(now_ms))?;
    next.refresh_rotation_hints();
    next.players_to_highlight = moved;
    Ok(next)
}

fn pairs_substitution(
    state: &GameState,
    pairs: &BTreeMap<PositionKey, PlayerPair>,
    now_ms: i64,
) -> Result<GameState> {
    let front = state.rotation_queue.front().cloned().ok_or_else(|| insufficient(state))?;
    let out_key = state
        .formation
        .pair_key_of(&front)
        .filter(|key| *key != PositionKey::SubPair)
        .ok_or_else(|| {
            LineupError::InvalidState(format!("queue front {front} is not in a field pair"))
        })?;

    let outgoing = pairs
        .get(&out_key)
        .cloned()
        .ok_or_else(|| LineupError::position(out_key))?;
    let waiting = pairs
        .get(&PositionKey::SubPair)
        .cloned()
        .ok_or_else(|| insufficient(state))?;

    let partner = if outgoing.defender == front {
        outgoing.attacker.clone()
    } else {
        outgoing.defender.clone()
    };

    let incoming = match state.team_config.role_rotation() {
        PairRoleRotation::Swap => waiting.flipped(),
        PairRoleRotation::Keep => waiting.clone(),
    };

    let mut next = state.clone();
    next.rotation_queue.rotate_player(&front)?;
    next.rotation_queue.rotate_player(&partner)?;
    if let FormationKind::Pairs { pairs } = &mut next.formation.kind {
        pairs.insert(out_key, incoming);
        pairs.insert(PositionKey::SubPair, outgoing.clone());
    }

    let moved = vec![outgoing.defender, outgoing.attacker, waiting.defender, waiting.attacker];
    next.settle(&moved, state.clock_time(now_ms))?;
    next.refresh_rotation_hints();
    next.players_to_highlight = moved;
    Ok(next)
}
