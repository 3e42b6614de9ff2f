//! Tiles, as printed in the catalog and as placed on the board.
//!
//! This module contains:
//! - `TileSide`, the content of one edge of a tile
//! - `Tile`, an immutable catalog entry
//! - `PlacedTile`, a tile bound to a position, rotation, placer and occupant

use crate::error::GameError;
use crate::grid::{Direction, Pos, Rotation};
use crate::player::{Occupant, PlayerColor};
use crate::zone::{Forest, Meadow, River, Zone, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Tile identifier, unique across the catalog
pub type TileId = u32;

/// Which deck a tile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileKind {
    /// The single tile placed at the origin
    Start,
    /// Regular tiles drawn in turn
    Normal,
    /// Bonus tiles earned by closing a forest containing a menhir
    Menhir,
}

/// Content of one side of a tile
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileSide {
    Forest(Forest),
    Meadow(Meadow),
    /// A river flanked by two meadows, listed clockwise
    River {
        meadow1: Meadow,
        river: River,
        meadow2: Meadow,
    },
}

impl TileSide {
    /// Zones touching this side, clockwise
    pub fn zones(&self) -> Vec<Zone> {
        match self {
            TileSide::Forest(f) => vec![Zone::Forest(f.clone())],
            TileSide::Meadow(m) => vec![Zone::Meadow(m.clone())],
            TileSide::River {
                meadow1,
                river,
                meadow2,
            } => vec![
                Zone::Meadow(meadow1.clone()),
                Zone::River(river.clone()),
                Zone::Meadow(meadow2.clone()),
            ],
        }
    }

    /// Whether two sides can face each other on the board
    pub fn is_same_kind_as(&self, that: &TileSide) -> bool {
        matches!(
            (self, that),
            (TileSide::Forest(_), TileSide::Forest(_))
                | (TileSide::Meadow(_), TileSide::Meadow(_))
                | (TileSide::River { .. }, TileSide::River { .. })
        )
    }
}

/// A tile from the catalog, sides listed in `Direction::ALL` order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub sides: [TileSide; 4],
}

impl Tile {
    pub fn new(id: TileId, kind: TileKind, n: TileSide, e: TileSide, s: TileSide, w: TileSide) -> Self {
        Self {
            id,
            kind,
            sides: [n, e, s, w],
        }
    }

    pub fn side(&self, direction: Direction) -> &TileSide {
        &self.sides[direction.index()]
    }

    /// Zones touching at least one side, ordered by id
    pub fn side_zones(&self) -> Vec<Zone> {
        let mut zones = BTreeMap::new();
        for side in &self.sides {
            for zone in side.zones() {
                zones.insert(zone.id(), zone);
            }
        }
        zones.into_values().collect()
    }

    /// Every zone of the tile, including lakes, ordered by id
    pub fn zones(&self) -> Vec<Zone> {
        let mut zones: BTreeMap<ZoneId, Zone> = BTreeMap::new();
        for zone in self.side_zones() {
            if let Zone::River(River {
                lake: Some(lake), ..
            }) = &zone
            {
                zones.insert(lake.id, Zone::Lake(lake.clone()));
            }
            zones.insert(zone.id(), zone);
        }
        zones.into_values().collect()
    }
}

/// A tile that has been accepted onto the board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    pub tile: Tile,
    /// Player who placed the tile, `None` only for the start tile
    pub placer: Option<PlayerColor>,
    pub rotation: Rotation,
    pub pos: Pos,
    pub occupant: Option<Occupant>,
}

impl PlacedTile {
    /// Create a placed tile without occupant
    pub fn new(tile: Tile, placer: Option<PlayerColor>, rotation: Rotation, pos: Pos) -> Self {
        Self {
            tile,
            placer,
            rotation,
            pos,
            occupant: None,
        }
    }

    pub fn id(&self) -> TileId {
        self.tile.id
    }

    pub fn kind(&self) -> TileKind {
        self.tile.kind
    }

    /// Side of the tile facing `direction` once rotated
    pub fn side(&self, direction: Direction) -> &TileSide {
        self.tile.side(direction.rotated(self.rotation.negated()))
    }

    pub fn zone_with_id(&self, id: ZoneId) -> Result<Zone, GameError> {
        self.tile
            .zones()
            .into_iter()
            .find(|z| z.id() == id)
            .ok_or(GameError::UnknownZone(id))
    }

    /// First zone (by id) carrying a special power, if any
    pub fn special_power_zone(&self) -> Option<Zone> {
        self.tile
            .zones()
            .into_iter()
            .find(|z| z.special_power().is_some())
    }

    pub fn forest_zones(&self) -> Vec<Forest> {
        self.tile
            .zones()
            .into_iter()
            .filter_map(|z| match z {
                Zone::Forest(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    pub fn meadow_zones(&self) -> Vec<Meadow> {
        self.tile
            .zones()
            .into_iter()
            .filter_map(|z| match z {
                Zone::Meadow(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn river_zones(&self) -> Vec<River> {
        self.tile
            .zones()
            .into_iter()
            .filter_map(|z| match z {
                Zone::River(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    /// Every occupant the placer could put on this tile, ignoring supply and
    /// whether the surrounding areas are already occupied
    pub fn potential_occupants(&self) -> BTreeSet<Occupant> {
        let mut occupants = BTreeSet::new();
        if self.placer.is_none() {
            return occupants;
        }

        for zone in self.tile.side_zones() {
            match &zone {
                Zone::River(river) if river.has_lake() => occupants.insert(Occupant::hut(river.id)),
                _ => occupants.insert(Occupant::pawn(zone.id())),
            };
        }
        for zone in self.tile.zones() {
            if let Zone::Lake(lake) = zone {
                occupants.insert(Occupant::hut(lake.id));
            }
        }
        occupants
    }

    pub fn with_occupant(&self, occupant: Occupant) -> Result<PlacedTile, GameError> {
        if self.occupant.is_some() {
            return Err(GameError::TileAlreadyOccupied(self.id()));
        }
        Ok(PlacedTile {
            occupant: Some(occupant),
            ..self.clone()
        })
    }

    pub fn with_no_occupant(&self) -> PlacedTile {
        PlacedTile {
            occupant: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::player::OccupantKind;
    use crate::zone::ForestKind;

    #[test]
    fn test_side_follows_rotation() {
        // River tile: forest to the north, river on east and south
        let tile = fixtures::river_bend(30);
        let placed = PlacedTile::new(tile.clone(), Some(PlayerColor::Red), Rotation::Right, Pos::new(1, 0));

        assert!(matches!(tile.side(Direction::N), TileSide::Forest(_)));
        // Rotating right moves the northern forest to the east
        assert!(matches!(placed.side(Direction::E), TileSide::Forest(_)));
        assert!(matches!(placed.side(Direction::S), TileSide::River { .. }));
        assert!(matches!(placed.side(Direction::W), TileSide::River { .. }));
    }

    #[test]
    fn test_zones_include_lakes() {
        let tile = fixtures::lake_end(40, None);
        let ids: Vec<ZoneId> = tile.zones().iter().map(Zone::id).collect();
        assert_eq!(ids, vec![400, 401, 408]);

        let side_ids: Vec<ZoneId> = tile.side_zones().iter().map(Zone::id).collect();
        assert_eq!(side_ids, vec![400, 401]);
    }

    #[test]
    fn test_potential_occupants() {
        let tile = fixtures::lake_end(40, None);
        let placed = PlacedTile::new(tile.clone(), Some(PlayerColor::Blue), Rotation::None, Pos::new(0, 1));

        let occupants = placed.potential_occupants();
        assert!(occupants.contains(&Occupant::pawn(400)));
        assert!(occupants.contains(&Occupant::hut(401)));
        assert!(occupants.contains(&Occupant::hut(408)));
        // The river ends in a lake, so it takes a hut and never a pawn
        assert!(!occupants.contains(&Occupant::pawn(401)));
        assert_eq!(occupants.len(), 3);

        let start = PlacedTile::new(tile, None, Rotation::None, Pos::ORIGIN);
        assert!(start.potential_occupants().is_empty());
    }

    #[test]
    fn test_river_without_lake_takes_pawn() {
        let placed = PlacedTile::new(fixtures::river_bend(30), Some(PlayerColor::Red), Rotation::None, Pos::new(1, 0));
        let occupants = placed.potential_occupants();
        assert!(!occupants.contains(&Occupant::new(OccupantKind::Hut, 302)));
        assert!(occupants.contains(&Occupant::new(OccupantKind::Pawn, 302)));
    }

    #[test]
    fn test_single_occupant() {
        let placed = PlacedTile::new(fixtures::forest_end(20, ForestKind::Plain), Some(PlayerColor::Red), Rotation::None, Pos::new(1, 0));
        let occupied = placed.with_occupant(Occupant::pawn(200)).unwrap();
        assert_eq!(occupied.occupant, Some(Occupant::pawn(200)));
        assert_eq!(
            occupied.with_occupant(Occupant::pawn(201)),
            Err(GameError::TileAlreadyOccupied(20))
        );
        assert_eq!(occupied.with_no_occupant().occupant, None);
        // The original value is untouched
        assert_eq!(placed.occupant, None);
    }
}
