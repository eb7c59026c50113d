//! Rotation Queue
//!
//! Substitution priority as an ordered list of player ids, split into an
//! active segment (eligible to rotate) and an inactive segment. Order is the
//! only fairness signal: the front of the active segment goes off next and
//! returns to the back of the line.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{LineupError, Result};
use crate::models::PlayerId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationQueue {
    active: Vec<PlayerId>,
    #[serde(default)]
    inactive: Vec<PlayerId>,
}

impl RotationQueue {
    /// Partition `player_ids` (priority order) into active and inactive
    /// segments. Inactive ids keep their relative order from `player_ids`.
    pub fn initialize(
        player_ids: &[PlayerId],
        initial_inactive: &[PlayerId],
        expected_len: usize,
    ) -> Result<Self> {
        if player_ids.len() != expected_len {
            return Err(LineupError::InvalidQueueComposition(format!(
                "expected {} players, got {}",
                expected_len,
                player_ids.len()
            )));
        }

        let mut seen = HashSet::with_capacity(player_ids.len());
        for id in player_ids {
            if !seen.insert(id.as_str()) {
                return Err(LineupError::InvalidQueueComposition(format!(
                    "player {id} appears more than once"
                )));
            }
        }

        if let Some(stray) = initial_inactive.iter().find(|id| !seen.contains(id.as_str())) {
            return Err(LineupError::InvalidQueueComposition(format!(
                "inactive player {stray} is not in the queue"
            )));
        }

        let (inactive, active): (Vec<PlayerId>, Vec<PlayerId>) = player_ids
            .iter()
            .cloned()
            .partition(|id| initial_inactive.contains(id));

        Ok(Self { active, inactive })
    }

    pub fn active(&self) -> &[PlayerId] {
        &self.active
    }

    pub fn inactive(&self) -> &[PlayerId] {
        &self.inactive
    }

    pub fn front(&self) -> Option<&PlayerId> {
        self.active.first()
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.inactive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.is_active(id) || self.is_inactive(id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|p| p == id)
    }

    pub fn is_inactive(&self, id: &str) -> bool {
        self.inactive.iter().any(|p| p == id)
    }

    pub fn active_index_of(&self, id: &str) -> Option<usize> {
        self.active.iter().position(|p| p == id)
    }

    /// Send the player at the front of the active segment to its back.
    pub fn rotate_player(&mut self, outgoing_id: &str) -> Result<()> {
        match self.active.first() {
            Some(front) if front == outgoing_id => {
                let id = self.active.remove(0);
                self.active.push(id);
                Ok(())
            }
            _ => Err(LineupError::PlayerNotInActiveQueue { player_id: outgoing_id.to_string() }),
        }
    }

    pub fn deactivate_player(&mut self, id: &str) -> Result<()> {
        if self.is_inactive(id) {
            return Err(LineupError::PlayerAlreadyInactive { player_id: id.to_string() });
        }
        let idx = self
            .active_index_of(id)
            .ok_or_else(|| LineupError::PlayerNotInActiveQueue { player_id: id.to_string() })?;
        let id = self.active.remove(idx);
        self.inactive.push(id);
        Ok(())
    }

    /// Reactivated players queue up behind everyone already waiting.
    pub fn reactivate_player(&mut self, id: &str) -> Result<()> {
        let idx = self
            .inactive
            .iter()
            .position(|p| p == id)
            .ok_or_else(|| LineupError::PlayerNotInactive { player_id: id.to_string() })?;
        let id = self.inactive.remove(idx);
        self.active.push(id);
        Ok(())
    }

    /// Move an active player to `index` within the active segment.
    pub fn move_to(&mut self, id: &str, index: usize) -> Result<()> {
        let idx = self
            .active_index_of(id)
            .ok_or_else(|| LineupError::PlayerNotInActiveQueue { player_id: id.to_string() })?;
        let id = self.active.remove(idx);
        let index = index.min(self.active.len());
        self.active.insert(index, id);
        Ok(())
    }

    pub fn move_to_front(&mut self, id: &str) -> Result<()> {
        self.move_to(id, 0)
    }

    /// Put `incoming` where `outgoing` stood, in whichever segment.
    pub fn replace(&mut self, outgoing: &str, incoming: PlayerId) -> Result<()> {
        if self.contains(&incoming) {
            return Err(LineupError::InvalidQueueComposition(format!(
                "player {incoming} is already queued"
            )));
        }
        let slot = self
            .active
            .iter_mut()
            .chain(self.inactive.iter_mut())
            .find(|p| p.as_str() == outgoing)
            .ok_or_else(|| LineupError::PlayerNotInActiveQueue {
                player_id: outgoing.to_string(),
            })?;
        *slot = incoming;
        Ok(())
    }

    /// Active segment followed by the inactive one.
    pub fn to_vec(&self) -> Vec<PlayerId> {
        self.active.iter().chain(self.inactive.iter()).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn queue(names: &[&str]) -> RotationQueue {
        RotationQueue::initialize(&ids(names), &[], names.len()).unwrap()
    }

    #[test]
    fn test_initialize_partitions_inactive() {
        let q = RotationQueue::initialize(&ids(&["a", "b", "c", "d"]), &ids(&["c", "a"]), 4)
            .unwrap();
        assert_eq!(q.active(), ids(&["b", "d"]).as_slice());
        assert_eq!(q.inactive(), ids(&["a", "c"]).as_slice());
        assert_eq!(q.to_vec(), ids(&["b", "d", "a", "c"]));
    }

    #[test]
    fn test_initialize_rejects_duplicates_and_wrong_size() {
        let err = RotationQueue::initialize(&ids(&["a", "a"]), &[], 2).unwrap_err();
        assert!(matches!(err, LineupError::InvalidQueueComposition(_)));
        let err = RotationQueue::initialize(&ids(&["a", "b"]), &[], 3).unwrap_err();
        assert!(matches!(err, LineupError::InvalidQueueComposition(_)));
        let err = RotationQueue::initialize(&ids(&["a", "b"]), &ids(&["z"]), 2).unwrap_err();
        assert!(matches!(err, LineupError::InvalidQueueComposition(_)));
    }

    #[test]
    fn test_rotate_front_to_back() {
        let mut q = queue(&["a", "b", "c", "d", "e"]);
        q.rotate_player("a").unwrap();
        assert_eq!(q.to_vec(), ids(&["b", "c", "d", "e", "a"]));
    }

    #[test]
    fn test_rotate_requires_front() {
        let mut q = queue(&["a", "b", "c"]);
        let err = q.rotate_player("b").unwrap_err();
        assert_eq!(err, LineupError::PlayerNotInActiveQueue { player_id: "b".into() });
        assert_eq!(q.to_vec(), ids(&["a", "b", "c"]));
    }

    #[test]
    fn test_full_cycle_restores_order() {
        let mut q = queue(&["a", "b", "c", "d", "e"]);
        for _ in 0..5 {
            let front = q.front().unwrap().clone();
            q.rotate_player(&front).unwrap();
        }
        assert_eq!(q.to_vec(), ids(&["a", "b", "c", "d", "e"]));
    }

    #[test]
    fn test_deactivate_then_reactivate_goes_to_back() {
        let mut q = queue(&["a", "b", "c", "d", "e"]);
        q.deactivate_player("a").unwrap();
        assert_eq!(q.active(), ids(&["b", "c", "d", "e"]).as_slice());
        assert_eq!(q.inactive(), ids(&["a"]).as_slice());

        let err = q.deactivate_player("a").unwrap_err();
        assert_eq!(err, LineupError::PlayerAlreadyInactive { player_id: "a".into() });

        q.reactivate_player("a").unwrap();
        assert_eq!(q.to_vec(), ids(&["b", "c", "d", "e", "a"]));

        let err = q.reactivate_player("a").unwrap_err();
        assert_eq!(err, LineupError::PlayerNotInactive { player_id: "a".into() });
    }

    #[test]
    fn test_move_and_replace() {
        let mut q = queue(&["a", "b", "c", "d"]);
        q.move_to_front("c").unwrap();
        assert_eq!(q.to_vec(), ids(&["c", "a", "b", "d"]));
        q.move_to("c", 10).unwrap();
        assert_eq!(q.to_vec(), ids(&["a", "b", "d", "c"]));

        q.replace("b", "gk".into()).unwrap();
        assert_eq!(q.to_vec(), ids(&["a", "gk", "d", "c"]));
        assert!(q.replace("a", "d".into()).is_err());
        assert!(q.replace("zz", "new".into()).is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let q = RotationQueue::initialize(&ids(&["a", "b"]), &ids(&["b"]), 2).unwrap();
        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(v, serde_json::json!({"active": ["a"], "inactive": ["b"]}));
    }
}
