//! Zones: the atomic landscape features printed on a tile.
//!
//! A zone is a forest, meadow, river or lake fragment. Its identifier encodes
//! the tile it belongs to: `id = tile_id * 10 + local_id` with `local_id < 10`.
//!
//! Areas are built over a single category of zone. Forests, meadows and rivers
//! each form their own category; rivers and lakes together form the water
//! category (see [`Water`]).

use crate::tile::TileId;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Zone identifier, `tile_id * 10 + local_id`
pub type ZoneId = u32;

/// Number of distinct local ids on a single tile
pub const MAX_LOCAL_ZONES: u32 = 10;

/// Tile owning the zone with the given id
pub const fn tile_id(zone_id: ZoneId) -> TileId {
    zone_id / MAX_LOCAL_ZONES
}

/// Index of the zone within its tile
pub const fn local_id(zone_id: ZoneId) -> u32 {
    zone_id % MAX_LOCAL_ZONES
}

/// Rule modifier carried by a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpecialPower {
    /// Placer may take back one of their pawns
    Shaman,
    /// Placer scores the lakes of the river system immediately
    Logboat,
    /// Placer scores the animals around the trap immediately
    HuntingTrap,
    /// Majority occupants score the animals around the trap again at game end
    PitTrap,
    /// Tigers of the meadow do not eat deer
    WildFire,
    /// River system scores one point per lake at game end
    Raft,
}

/// Kind of animal found in meadows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnimalKind {
    Mammoth,
    Aurochs,
    Deer,
    Tiger,
}

impl AnimalKind {
    pub const ALL: [AnimalKind; 4] = [
        AnimalKind::Mammoth,
        AnimalKind::Aurochs,
        AnimalKind::Deer,
        AnimalKind::Tiger,
    ];
}

/// An animal drawn in a meadow, `id = zone_id * 100 + index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Animal {
    pub id: u32,
    pub kind: AnimalKind,
}

impl Animal {
    pub const fn new(id: u32, kind: AnimalKind) -> Self {
        Self { id, kind }
    }

    pub const fn zone_id(&self) -> ZoneId {
        self.id / 100
    }

    pub const fn tile_id(&self) -> TileId {
        tile_id(self.zone_id())
    }
}

/// What grows in a forest zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ForestKind {
    Plain,
    WithMenhir,
    WithMushrooms,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Forest {
    pub id: ZoneId,
    pub kind: ForestKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Meadow {
    pub id: ZoneId,
    pub animals: Vec<Animal>,
    pub special_power: Option<SpecialPower>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct River {
    pub id: ZoneId,
    pub fish_count: u32,
    /// Lake the river flows into; always on the same tile
    pub lake: Option<Lake>,
}

impl River {
    pub fn has_lake(&self) -> bool {
        self.lake.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Lake {
    pub id: ZoneId,
    pub fish_count: u32,
    pub special_power: Option<SpecialPower>,
}

/// Any zone of a tile
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    Forest(Forest),
    Meadow(Meadow),
    River(River),
    Lake(Lake),
}

impl Zone {
    pub fn id(&self) -> ZoneId {
        match self {
            Zone::Forest(f) => f.id,
            Zone::Meadow(m) => m.id,
            Zone::River(r) => r.id,
            Zone::Lake(l) => l.id,
        }
    }

    pub fn tile_id(&self) -> TileId {
        tile_id(self.id())
    }

    pub fn local_id(&self) -> u32 {
        local_id(self.id())
    }

    /// Special power of this zone; only meadows and lakes can carry one
    pub fn special_power(&self) -> Option<SpecialPower> {
        match self {
            Zone::Meadow(m) => m.special_power,
            Zone::Lake(l) => l.special_power,
            Zone::Forest(_) | Zone::River(_) => None,
        }
    }
}

impl From<Forest> for Zone {
    fn from(forest: Forest) -> Self {
        Zone::Forest(forest)
    }
}

impl From<Meadow> for Zone {
    fn from(meadow: Meadow) -> Self {
        Zone::Meadow(meadow)
    }
}

impl From<River> for Zone {
    fn from(river: River) -> Self {
        Zone::River(river)
    }
}

impl From<Lake> for Zone {
    fn from(lake: Lake) -> Self {
        Zone::Lake(lake)
    }
}

/// A zone of the water category: rivers and lakes joined into river systems
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Water {
    River(River),
    Lake(Lake),
}

impl Water {
    pub fn fish_count(&self) -> u32 {
        match self {
            Water::River(r) => r.fish_count,
            Water::Lake(l) => l.fish_count,
        }
    }
}

impl From<River> for Water {
    fn from(river: River) -> Self {
        Water::River(river)
    }
}

impl From<Lake> for Water {
    fn from(lake: Lake) -> Self {
        Water::Lake(lake)
    }
}

/// A zone type that areas can be built over
pub trait AreaZone: Clone + Debug + PartialEq + Eq + Hash + Ord {
    fn id(&self) -> ZoneId;

    fn special_power(&self) -> Option<SpecialPower> {
        None
    }

    fn tile_id(&self) -> TileId {
        tile_id(self.id())
    }
}

impl AreaZone for Forest {
    fn id(&self) -> ZoneId {
        self.id
    }
}

impl AreaZone for Meadow {
    fn id(&self) -> ZoneId {
        self.id
    }

    fn special_power(&self) -> Option<SpecialPower> {
        self.special_power
    }
}

impl AreaZone for River {
    fn id(&self) -> ZoneId {
        self.id
    }
}

impl AreaZone for Water {
    fn id(&self) -> ZoneId {
        match self {
            Water::River(r) => r.id,
            Water::Lake(l) => l.id,
        }
    }

    fn special_power(&self) -> Option<SpecialPower> {
        match self {
            Water::River(_) => None,
            Water::Lake(l) => l.special_power,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_id_encoding() {
        assert_eq!(tile_id(563), 56);
        assert_eq!(local_id(563), 3);

        let zone = Zone::Forest(Forest {
            id: 170,
            kind: ForestKind::Plain,
        });
        assert_eq!(zone.tile_id(), 17);
        assert_eq!(zone.local_id(), 0);
    }

    #[test]
    fn test_animal_ids() {
        let animal = Animal::new(56_101, AnimalKind::Deer);
        assert_eq!(animal.zone_id(), 561);
        assert_eq!(animal.tile_id(), 56);
    }

    #[test]
    fn test_special_power_only_on_meadows_and_lakes() {
        let lake = Lake {
            id: 18,
            fish_count: 2,
            special_power: Some(SpecialPower::Raft),
        };
        let river = River {
            id: 11,
            fish_count: 0,
            lake: Some(lake.clone()),
        };
        assert_eq!(Zone::Lake(lake).special_power(), Some(SpecialPower::Raft));
        assert_eq!(Zone::River(river).special_power(), None);
    }
}
