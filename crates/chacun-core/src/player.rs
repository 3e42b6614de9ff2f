//! Players and the markers they place on the board.
//!
//! This module contains:
//! - `PlayerColor`, the identity of a player
//! - `Occupant`, a pawn or hut sitting on a zone
//! - The per-player supply of each occupant kind

use crate::zone::ZoneId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Player identity, one color per seat (2-5 players)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl PlayerColor {
    /// All colors, in seating order
    pub const ALL: [PlayerColor; 5] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Purple,
    ];
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerColor::Red => "Red",
            PlayerColor::Blue => "Blue",
            PlayerColor::Green => "Green",
            PlayerColor::Yellow => "Yellow",
            PlayerColor::Purple => "Purple",
        };
        f.write_str(name)
    }
}

/// Kind of marker a player can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OccupantKind {
    /// General marker: gatherer, hunter or fisher depending on the zone
    Pawn,
    /// Water-only marker, scores a whole river system
    Hut,
}

/// A marker sitting on a zone of a placed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Occupant {
    pub kind: OccupantKind,
    pub zone_id: ZoneId,
}

impl Occupant {
    /// Create a new occupant
    pub const fn new(kind: OccupantKind, zone_id: ZoneId) -> Self {
        Self { kind, zone_id }
    }

    /// Create a pawn on the given zone
    pub const fn pawn(zone_id: ZoneId) -> Self {
        Self::new(OccupantKind::Pawn, zone_id)
    }

    /// Create a hut on the given zone
    pub const fn hut(zone_id: ZoneId) -> Self {
        Self::new(OccupantKind::Hut, zone_id)
    }

    /// Number of markers of the given kind each player starts with
    pub const fn occupants_count(kind: OccupantKind) -> u32 {
        match kind {
            OccupantKind::Pawn => 5,
            OccupantKind::Hut => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupant_supply() {
        assert_eq!(Occupant::occupants_count(OccupantKind::Pawn), 5);
        assert_eq!(Occupant::occupants_count(OccupantKind::Hut), 3);
    }

    #[test]
    fn test_player_colors_are_ordered() {
        let mut shuffled = vec![PlayerColor::Purple, PlayerColor::Red, PlayerColor::Green];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![PlayerColor::Red, PlayerColor::Green, PlayerColor::Purple]
        );
    }
}
