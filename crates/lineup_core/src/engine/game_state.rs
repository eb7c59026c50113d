//! Game State
//!
//! The immutable match snapshot every engine operation consumes and returns.
//! Operations clone, edit the clone, and hand it back; the input is never
//! touched, so a failed operation leaves the caller's snapshot as it was.
//!
//! ## Structural rules kept by every operation
//! - the active queue reads `[field players…, active substitutes…]`, so its
//!   front is always the next player off
//! - individual substitute slots follow queue order (active first, inactive
//!   last), so `substitute_1` is always the next player on
//! - pair partners sit next to each other in the queue

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::rotation_queue::RotationQueue;
use super::stint::{self, Assignment};
use crate::config::RulesConfig;
use crate::error::{LineupError, Result};
use crate::formation::{self, Layout};
use crate::models::{
    Formation, FormationKind, MatchSetup, Placement, Player, PlayerId, PositionKey,
    SubstitutionType, TeamConfig,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub team_config: TeamConfig,
    pub formation: Formation,
    pub all_players: BTreeMap<PlayerId, Player>,
    pub rotation_queue: RotationQueue,
    pub next_player_id_to_sub_out: Option<PlayerId>,
    /// Individual mode with two or more substitute slots only
    pub next_next_player_id_to_sub_out: Option<PlayerId>,
    /// Pairs mode only
    #[serde(default)]
    pub next_pair_to_sub_out: Option<PositionKey>,
    /// Ids moved by the last operation, for the caller's animations
    #[serde(default)]
    pub players_to_highlight: Vec<PlayerId>,
    pub clock_paused: bool,
}

fn invalid(msg: impl Into<String>) -> LineupError {
    LineupError::InvalidState(msg.into())
}

/// Status, position and role implied by a formation placement.
pub(crate) fn assignment_for(placement: Placement) -> Result<Assignment> {
    Ok(match placement {
        Placement::Goalie => Assignment::goalie(),
        Placement::Position(key) if key.is_substitute_slot() => Assignment::substitute(),
        Placement::Position(key) => Assignment::field(key, formation::get_position_role(key)?),
        Placement::PairMember(PositionKey::SubPair, _) => Assignment::substitute(),
        Placement::PairMember(key, member) => Assignment::field(key, member.role()),
    })
}

/// Initial rotation order: field positions in catalog order, then substitutes.
fn initial_queue_order(formation: &Formation, layout: &Layout) -> Vec<PlayerId> {
    let keys = layout.field_positions.iter().chain(&layout.substitute_positions);
    match &formation.kind {
        FormationKind::Individual { positions } => {
            keys.filter_map(|k| positions.get(k).cloned()).collect()
        }
        FormationKind::Pairs { pairs } => keys
            .filter_map(|k| pairs.get(k))
            .flat_map(|pair| [pair.defender.clone(), pair.attacker.clone()])
            .collect(),
    }
}

fn lineup_keys(kind: &FormationKind) -> BTreeSet<PositionKey> {
    match kind {
        FormationKind::Individual { positions } => positions.keys().copied().collect(),
        FormationKind::Pairs { pairs } => pairs.keys().copied().collect(),
    }
}

fn check_lineup_shape(config: &TeamConfig, kind: &FormationKind, layout: &Layout) -> Result<()> {
    let kind_matches = matches!(
        (kind, config.substitution_type),
        (FormationKind::Individual { .. }, SubstitutionType::Individual)
            | (FormationKind::Pairs { .. }, SubstitutionType::Pairs)
    );
    if !kind_matches {
        return Err(LineupError::InvalidSubstitutionType(config.substitution_type.to_string()));
    }

    let expected: BTreeSet<PositionKey> =
        layout.field_positions.iter().chain(&layout.substitute_positions).copied().collect();
    let actual = lineup_keys(kind);

    if let Some(stray) = actual.difference(&expected).next() {
        return Err(LineupError::position(*stray));
    }
    if let Some(missing) = expected.difference(&actual).next() {
        return Err(LineupError::InvalidConfiguration(format!("position {missing} is not filled")));
    }
    Ok(())
}

impl GameState {
    /// Build the kickoff snapshot. The clock starts paused; resuming it opens
    /// everyone's first stint.
    pub fn from_setup(setup: &MatchSetup, rules: &RulesConfig) -> Result<Self> {
        let config = &setup.team_config;
        config.validate(rules)?;

        if setup.squad.len() != config.squad_size {
            return Err(LineupError::InvalidConfiguration(format!(
                "squad size is {} but {} players were selected",
                config.squad_size,
                setup.squad.len()
            )));
        }

        let mut squad_ids = HashSet::with_capacity(setup.squad.len());
        for p in &setup.squad {
            if !squad_ids.insert(p.id.as_str()) {
                return Err(LineupError::InvalidConfiguration(format!(
                    "player {} selected twice",
                    p.id
                )));
            }
        }
        if !squad_ids.contains(setup.goalie.as_str()) {
            return Err(LineupError::PlayerNotInSquad { player_id: setup.goalie.clone() });
        }

        let layout = formation::layout(config)?;
        check_lineup_shape(config, &setup.lineup, &layout)?;
        let formation = Formation { goalie: setup.goalie.clone(), kind: setup.lineup.clone() };

        let placed = formation.player_ids();
        let mut seen = HashSet::with_capacity(placed.len());
        for id in &placed {
            if !squad_ids.contains(id.as_str()) {
                return Err(LineupError::PlayerNotInSquad { player_id: (*id).clone() });
            }
            if !seen.insert(id.as_str()) {
                return Err(LineupError::InvalidConfiguration(format!(
                    "player {id} placed more than once"
                )));
            }
        }

        if !setup.inactive.is_empty() {
            if !formation::supports_inactive(config) {
                return Err(LineupError::InactiveUnsupported);
            }
            let distinct: HashSet<&str> = setup.inactive.iter().map(String::as_str).collect();
            for id in &distinct {
                match formation.locate(id) {
                    None => {
                        return Err(LineupError::PlayerNotInSquad { player_id: id.to_string() })
                    }
                    Some(Placement::Position(key)) if key.is_substitute_slot() => {}
                    Some(_) => {
                        return Err(LineupError::CannotDeactivateFieldPlayer {
                            player_id: id.to_string(),
                        })
                    }
                }
            }
            if distinct.len() >= layout.substitute_count() {
                return Err(LineupError::InsufficientActivePlayers {
                    required: layout.field_positions.len() + 1,
                    available: layout.field_positions.len() + layout.substitute_count()
                        - distinct.len(),
                });
            }
        }

        let mut all_players = BTreeMap::new();
        for member in &setup.squad {
            let placement = formation
                .locate(&member.id)
                .ok_or_else(|| invalid(format!("player {} has no position", member.id)))?;
            let a = assignment_for(placement)?;
            let mut player =
                Player::new(member.id.clone(), member.name.clone(), a.status, a.position, a.role);
            player.is_inactive = setup.inactive.contains(&member.id);
            all_players.insert(member.id.clone(), player);
        }

        let order = initial_queue_order(&formation, &layout);
        let rotation_queue =
            RotationQueue::initialize(&order, &setup.inactive, config.squad_size - 1)?;

        let mut state = Self {
            team_config: config.clone(),
            formation,
            all_players,
            rotation_queue,
            next_player_id_to_sub_out: None,
            next_next_player_id_to_sub_out: None,
            next_pair_to_sub_out: None,
            players_to_highlight: Vec::new(),
            clock_paused: true,
        };
        state.sync_substitute_slots()?;
        state.refresh_rotation_hints();
        state.validate()?;
        Ok(state)
    }

    pub fn layout(&self) -> Result<Layout> {
        formation::layout(&self.team_config)
    }

    pub fn player(&self, id: &str) -> Result<&Player> {
        self.all_players
            .get(id)
            .ok_or_else(|| LineupError::PlayerNotInSquad { player_id: id.to_string() })
    }

    pub fn goalie(&self) -> &PlayerId {
        &self.formation.goalie
    }

    /// `Some(now_ms)` while the clock runs; paused snapshots skip accounting.
    pub fn clock_time(&self, now_ms: i64) -> Option<i64> {
        (!self.clock_paused).then_some(now_ms)
    }

    /// Field players in rotation order (next off first).
    pub fn field_players_in_rotation(&self) -> Vec<&PlayerId> {
        self.rotation_queue
            .active()
            .iter()
            .filter(|id| self.all_players.get(id.as_str()).is_some_and(|p| p.is_on_field()))
            .collect()
    }

    /// Active substitutes in the order they come on.
    pub fn available_substitutes(&self) -> Vec<&PlayerId> {
        self.rotation_queue
            .active()
            .iter()
            .filter(|id| {
                self.all_players.get(id.as_str()).is_some_and(|p| p.is_available_substitute())
            })
            .collect()
    }

    fn substitute_slot_count(&self) -> usize {
        match &self.formation.kind {
            FormationKind::Individual { positions } => {
                positions.keys().filter(|k| k.is_substitute_slot()).count()
            }
            FormationKind::Pairs { .. } => 1,
        }
    }

    /// Re-derive status, position and role of `ids` from the formation,
    /// closing and reopening stints where the role changed.
    pub(crate) fn settle(&mut self, ids: &[PlayerId], now: Option<i64>) -> Result<()> {
        for id in ids {
            let placement = self
                .formation
                .locate(id)
                .ok_or_else(|| invalid(format!("player {id} has no position")))?;
            let assignment = assignment_for(placement)?;
            let player = self.player(id)?;
            let (updated, _) = stint::transition(player, assignment, now);
            self.all_players.insert(id.clone(), updated);
        }
        Ok(())
    }

    /// Reorder individual substitute slots to follow the rotation queue.
    pub(crate) fn sync_substitute_slots(&mut self) -> Result<()> {
        let queue = &self.rotation_queue;
        let FormationKind::Individual { positions } = &mut self.formation.kind else {
            return Ok(());
        };

        let slots: Vec<PositionKey> =
            positions.keys().filter(|k| k.is_substitute_slot()).copied().collect();
        let waiting: HashSet<&PlayerId> =
            slots.iter().filter_map(|k| positions.get(k)).collect();
        let ordered: Vec<PlayerId> =
            queue.to_vec().into_iter().filter(|id| waiting.contains(id)).collect();

        if ordered.len() != slots.len() {
            return Err(invalid("substitute slots and rotation queue disagree"));
        }
        for (key, id) in slots.into_iter().zip(ordered) {
            positions.insert(key, id);
        }
        Ok(())
    }

    /// Recompute the next-off hints from the queue.
    pub(crate) fn refresh_rotation_hints(&mut self) {
        let field = self.field_players_in_rotation();
        let next = field.first().map(|id| (*id).clone());
        let next_next = field.get(1).map(|id| (*id).clone());

        match self.formation.kind {
            FormationKind::Individual { .. } => {
                self.next_next_player_id_to_sub_out =
                    if self.substitute_slot_count() >= 2 { next_next } else { None };
                self.next_pair_to_sub_out = None;
            }
            FormationKind::Pairs { .. } => {
                self.next_next_player_id_to_sub_out = None;
                self.next_pair_to_sub_out =
                    next.as_deref().and_then(|id| self.formation.pair_key_of(id));
            }
        }
        self.next_player_id_to_sub_out = next;
    }

    /// Check every structural invariant of the snapshot.
    pub fn validate(&self) -> Result<()> {
        let config = &self.team_config;
        let layout = self.layout()?;
        check_lineup_shape(config, &self.formation.kind, &layout)
            .map_err(|e| invalid(e.to_string()))?;

        let placed = self.formation.player_ids();
        let mut seen = HashSet::with_capacity(placed.len());
        for id in &placed {
            if !seen.insert(id.as_str()) {
                return Err(invalid(format!("player {id} holds two positions")));
            }
        }
        if placed.len() != config.squad_size || self.all_players.len() != config.squad_size {
            return Err(invalid(format!(
                "expected {} players, formation has {} and roster {}",
                config.squad_size,
                placed.len(),
                self.all_players.len()
            )));
        }

        for (id, player) in &self.all_players {
            if &player.id != id {
                return Err(invalid(format!("roster key {id} holds player {}", player.id)));
            }
            let placement = self
                .formation
                .locate(id)
                .ok_or_else(|| invalid(format!("player {id} has no position")))?;
            let expected = assignment_for(placement)?;
            if player.current_status != expected.status
                || player.current_position != expected.position
                || player.current_role != expected.role
            {
                return Err(invalid(format!("player {id} disagrees with the formation")));
            }
            if player.is_inactive != self.rotation_queue.is_inactive(id) {
                return Err(invalid(format!("player {id} inactive flag disagrees with the queue")));
            }
            if player.is_inactive && !player.is_substitute() {
                return Err(invalid(format!("inactive player {id} holds a position")));
            }
            let expect_open = !self.clock_paused && !player.is_inactive;
            if player.last_stint_start_ms.is_some() != expect_open {
                return Err(invalid(format!("player {id} stint state disagrees with the clock")));
            }
        }

        // Queue conservation: every non-goalie exactly once.
        let queued = self.rotation_queue.to_vec();
        let distinct: HashSet<&str> = queued.iter().map(String::as_str).collect();
        if queued.len() != config.squad_size.saturating_sub(1) || distinct.len() != queued.len() {
            return Err(invalid("rotation queue does not hold each outfield player once"));
        }
        if distinct.contains(self.formation.goalie.as_str()) {
            return Err(invalid("goalie is in the rotation queue"));
        }

        let mut seen_substitute = false;
        for id in self.rotation_queue.active() {
            let on_field = self.player(id)?.is_on_field();
            if on_field && seen_substitute {
                return Err(invalid(format!("field player {id} queued behind a substitute")));
            }
            seen_substitute |= !on_field;
        }

        match &self.formation.kind {
            FormationKind::Individual { positions } => {
                let slot_order: Vec<&PlayerId> = positions
                    .iter()
                    .filter(|(k, _)| k.is_substitute_slot())
                    .map(|(_, id)| id)
                    .collect();
                let queue_order: Vec<&PlayerId> = queued
                    .iter()
                    .filter(|id| {
                        self.all_players.get(id.as_str()).is_some_and(|p| p.is_substitute())
                    })
                    .collect();
                if slot_order != queue_order {
                    return Err(invalid("substitute slots are out of rotation order"));
                }
            }
            FormationKind::Pairs { pairs } => {
                let active = self.rotation_queue.active();
                for (key, pair) in pairs {
                    let d = active.iter().position(|p| *p == pair.defender);
                    let a = active.iter().position(|p| *p == pair.attacker);
                    match (d, a) {
                        (Some(d), Some(a)) if d.abs_diff(a) == 1 => {}
                        _ => return Err(invalid(format!("{key} partners are split in the queue"))),
                    }
                }
            }
        }

        Ok(())
    }
}
