//! Position keys, roles and player status.
//!
//! Position keys travel over the wire as the camelCase strings the UI layer
//! uses (`leftDefender`, `substitute_2`, `subPair`, ...), so they also work as
//! JSON object keys inside a formation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LineupError;

/// A formation slot. `Substitute(n)` is 1-based (`substitute_1` is next on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PositionKey {
    Goalie,
    LeftDefender,
    RightDefender,
    Defender,
    Left,
    Right,
    LeftMidfielder,
    CenterMidfielder,
    RightMidfielder,
    LeftAttacker,
    RightAttacker,
    Attacker,
    LeftPair,
    RightPair,
    SubPair,
    Substitute(u8),
}

impl PositionKey {
    pub fn is_substitute_slot(&self) -> bool {
        matches!(self, PositionKey::Substitute(_) | PositionKey::SubPair)
    }

    pub fn as_str(&self) -> std::borrow::Cow<'static, str> {
        let name = match self {
            PositionKey::Goalie => "goalie",
            PositionKey::LeftDefender => "leftDefender",
            PositionKey::RightDefender => "rightDefender",
            PositionKey::Defender => "defender",
            PositionKey::Left => "left",
            PositionKey::Right => "right",
            PositionKey::LeftMidfielder => "leftMidfielder",
            PositionKey::CenterMidfielder => "centerMidfielder",
            PositionKey::RightMidfielder => "rightMidfielder",
            PositionKey::LeftAttacker => "leftAttacker",
            PositionKey::RightAttacker => "rightAttacker",
            PositionKey::Attacker => "attacker",
            PositionKey::LeftPair => "leftPair",
            PositionKey::RightPair => "rightPair",
            PositionKey::SubPair => "subPair",
            PositionKey::Substitute(n) => return format!("substitute_{n}").into(),
        };
        name.into()
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl FromStr for PositionKey {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "goalie" => PositionKey::Goalie,
            "leftDefender" => PositionKey::LeftDefender,
            "rightDefender" => PositionKey::RightDefender,
            "defender" => PositionKey::Defender,
            "left" => PositionKey::Left,
            "right" => PositionKey::Right,
            "leftMidfielder" => PositionKey::LeftMidfielder,
            "centerMidfielder" => PositionKey::CenterMidfielder,
            "rightMidfielder" => PositionKey::RightMidfielder,
            "leftAttacker" => PositionKey::LeftAttacker,
            "rightAttacker" => PositionKey::RightAttacker,
            "attacker" => PositionKey::Attacker,
            "leftPair" => PositionKey::LeftPair,
            "rightPair" => PositionKey::RightPair,
            "subPair" => PositionKey::SubPair,
            other => {
                let n = other
                    .strip_prefix("substitute_")
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| *n >= 1);
                match n {
                    Some(n) => PositionKey::Substitute(n),
                    None => return Err(LineupError::InvalidPosition { position: s.to_string() }),
                }
            }
        };
        Ok(key)
    }
}

impl TryFrom<String> for PositionKey {
    type Error = LineupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PositionKey> for String {
    fn from(key: PositionKey) -> String {
        key.as_str().into_owned()
    }
}

/// Role a player's current stint is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Defender,
    Midfielder,
    Attacker,
    Goalie,
    Substitute,
}

impl Role {
    pub fn is_on_field(&self) -> bool {
        !matches!(self, Role::Substitute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    OnField,
    Substitute,
    Goalie,
}

/// Member slot inside a defender/attacker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairMember {
    Defender,
    Attacker,
}

impl PairMember {
    pub fn role(&self) -> Role {
        match self {
            PairMember::Defender => Role::Defender,
            PairMember::Attacker => Role::Attacker,
        }
    }
}
