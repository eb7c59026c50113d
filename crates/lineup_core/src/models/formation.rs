//! Formation instance: who stands where.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::player::PlayerId;
use super::position::{PairMember, PositionKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPair {
    pub defender: PlayerId,
    pub attacker: PlayerId,
}

impl PlayerPair {
    pub fn new(defender: impl Into<PlayerId>, attacker: impl Into<PlayerId>) -> Self {
        Self { defender: defender.into(), attacker: attacker.into() }
    }

    pub fn member_mut(&mut self, member: PairMember) -> &mut PlayerId {
        match member {
            PairMember::Defender => &mut self.defender,
            PairMember::Attacker => &mut self.attacker,
        }
    }

    pub fn member_of(&self, player_id: &str) -> Option<PairMember> {
        if self.defender == player_id {
            Some(PairMember::Defender)
        } else if self.attacker == player_id {
            Some(PairMember::Attacker)
        } else {
            None
        }
    }

    /// Defender and attacker trade places.
    pub fn flipped(&self) -> Self {
        Self { defender: self.attacker.clone(), attacker: self.defender.clone() }
    }

    pub fn ids(&self) -> [&PlayerId; 2] {
        [&self.defender, &self.attacker]
    }
}

/// Substitution topology of the lineup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormationKind {
    /// Field positions and `substitute_N` slots, one player each
    Individual { positions: BTreeMap<PositionKey, PlayerId> },
    /// `leftPair`/`rightPair` on the field, `subPair` waiting
    Pairs { pairs: BTreeMap<PositionKey, PlayerPair> },
}

/// Where a player sits inside a formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Goalie,
    Position(PositionKey),
    PairMember(PositionKey, PairMember),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    pub goalie: PlayerId,
    #[serde(flatten)]
    pub kind: FormationKind,
}

impl Formation {
    pub fn individual(
        goalie: impl Into<PlayerId>,
        positions: impl IntoIterator<Item = (PositionKey, PlayerId)>,
    ) -> Self {
        Self {
            goalie: goalie.into(),
            kind: FormationKind::Individual { positions: positions.into_iter().collect() },
        }
    }

    pub fn pairs(
        goalie: impl Into<PlayerId>,
        pairs: impl IntoIterator<Item = (PositionKey, PlayerPair)>,
    ) -> Self {
        Self {
            goalie: goalie.into(),
            kind: FormationKind::Pairs { pairs: pairs.into_iter().collect() },
        }
    }

    pub fn is_pairs(&self) -> bool {
        matches!(self.kind, FormationKind::Pairs { .. })
    }

    /// Occupant of an individual slot.
    pub fn player_at(&self, key: PositionKey) -> Option<&PlayerId> {
        if key == PositionKey::Goalie {
            return Some(&self.goalie);
        }
        match &self.kind {
            FormationKind::Individual { positions } => positions.get(&key),
            FormationKind::Pairs { .. } => None,
        }
    }

    pub fn pair_at(&self, key: PositionKey) -> Option<&PlayerPair> {
        match &self.kind {
            FormationKind::Pairs { pairs } => pairs.get(&key),
            FormationKind::Individual { .. } => None,
        }
    }

    pub fn locate(&self, player_id: &str) -> Option<Placement> {
        if self.goalie == player_id {
            return Some(Placement::Goalie);
        }
        match &self.kind {
            FormationKind::Individual { positions } => positions
                .iter()
                .find(|(_, id)| id.as_str() == player_id)
                .map(|(key, _)| Placement::Position(*key)),
            FormationKind::Pairs { pairs } => pairs.iter().find_map(|(key, pair)| {
                pair.member_of(player_id).map(|m| Placement::PairMember(*key, m))
            }),
        }
    }

    /// Key of the pair containing `player_id`.
    pub fn pair_key_of(&self, player_id: &str) -> Option<PositionKey> {
        match self.locate(player_id)? {
            Placement::PairMember(key, _) => Some(key),
            _ => None,
        }
    }

    /// Every placed id, goalie first, in key order.
    pub fn player_ids(&self) -> Vec<&PlayerId> {
        let mut ids = vec![&self.goalie];
        match &self.kind {
            FormationKind::Individual { positions } => ids.extend(positions.values()),
            FormationKind::Pairs { pairs } => {
                for pair in pairs.values() {
                    ids.extend(pair.ids());
                }
            }
        }
        ids
    }

    /// Put `player_id` at `placement`, returning whoever was there.
    pub(crate) fn place(&mut self, placement: Placement, player_id: PlayerId) -> Option<PlayerId> {
        match (placement, &mut self.kind) {
            (Placement::Goalie, _) => Some(std::mem::replace(&mut self.goalie, player_id)),
            (Placement::Position(key), FormationKind::Individual { positions }) => {
                positions.insert(key, player_id)
            }
            (Placement::PairMember(key, member), FormationKind::Pairs { pairs }) => pairs
                .get_mut(&key)
                .map(|pair| std::mem::replace(pair.member_mut(member), player_id)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual() -> Formation {
        Formation::individual(
            "gk",
            [
                (PositionKey::LeftDefender, "a".to_string()),
                (PositionKey::RightDefender, "b".to_string()),
                (PositionKey::Substitute(1), "c".to_string()),
            ],
        )
    }

    #[test]
    fn test_locate_individual() {
        let f = individual();
        assert_eq!(f.locate("gk"), Some(Placement::Goalie));
        assert_eq!(f.locate("c"), Some(Placement::Position(PositionKey::Substitute(1))));
        assert_eq!(f.locate("zz"), None);
        assert_eq!(f.player_at(PositionKey::RightDefender).map(String::as_str), Some("b"));
    }

    #[test]
    fn test_locate_pairs() {
        let f = Formation::pairs(
            "gk",
            [
                (PositionKey::LeftPair, PlayerPair::new("a", "b")),
                (PositionKey::SubPair, PlayerPair::new("e", "f")),
            ],
        );
        assert_eq!(
            f.locate("f"),
            Some(Placement::PairMember(PositionKey::SubPair, PairMember::Attacker))
        );
        assert_eq!(f.pair_key_of("a"), Some(PositionKey::LeftPair));
        assert_eq!(f.player_ids().len(), 5);
    }

    #[test]
    fn test_place_returns_previous_occupant() {
        let mut f = individual();
        let prev = f.place(Placement::Position(PositionKey::LeftDefender), "c".into());
        assert_eq!(prev.as_deref(), Some("a"));
        let prev = f.place(Placement::Goalie, "a".into());
        assert_eq!(prev.as_deref(), Some("gk"));
    }

    #[test]
    fn test_flipped_pair() {
        let pair = PlayerPair::new("e", "f");
        assert_eq!(pair.flipped(), PlayerPair::new("f", "e"));
    }

    #[test]
    fn test_formation_json_is_tagged() {
        let v = serde_json::to_value(individual()).unwrap();
        assert_eq!(v["kind"], "individual");
        assert_eq!(v["goalie"], "gk");
        assert_eq!(v["positions"]["substitute_1"], "c");

        let back: Formation = serde_json::from_value(v).unwrap();
        assert_eq!(back, individual());
    }
}
