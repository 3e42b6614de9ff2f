//! Game board: placed tiles, their zone partitions and cancelled animals.
//!
//! This module contains:
//! - The fixed-size grid of placed tiles centered on the origin
//! - Placement legality and insertion-position queries
//! - Occupant bookkeeping mirrored into the zone partitions
//!
//! A `Board` is an immutable value: every `with_*` method returns a new board
//! and leaves the receiver untouched, including when it fails.

use crate::area::Area;
use crate::error::GameError;
use crate::grid::{Direction, Pos, Rotation};
use crate::partitions::{ZonePartitions, ZonePartitionsBuilder};
use crate::player::{Occupant, OccupantKind, PlayerColor};
use crate::tile::{PlacedTile, Tile, TileId};
use crate::zone::{tile_id, Animal, AreaZone, Forest, Meadow, River, Water, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Largest absolute coordinate a tile can be placed at
pub const REACH: i32 = 12;

/// Width (and height) of the grid
const WIDTH: usize = (2 * REACH + 1) as usize;

/// Number of cells of the grid
pub const SIZE: usize = WIDTH * WIDTH;

/// The complete game board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Grid cells in row-major order, north-west corner first
    placed_tiles: Vec<Option<PlacedTile>>,
    /// Cell indices of the placed tiles, oldest first
    tile_indices: Vec<usize>,
    zone_partitions: ZonePartitions,
    cancelled_animals: BTreeSet<Animal>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            placed_tiles: vec![None; SIZE],
            tile_indices: Vec::new(),
            zone_partitions: ZonePartitions::new(),
            cancelled_animals: BTreeSet::new(),
        }
    }

    fn index_of(pos: Pos) -> Option<usize> {
        let reach = -REACH..=REACH;
        if !reach.contains(&pos.x) || !reach.contains(&pos.y) {
            return None;
        }
        Some((pos.y + REACH) as usize * WIDTH + (pos.x + REACH) as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.tile_indices.is_empty()
    }

    pub fn tile_at(&self, pos: Pos) -> Option<&PlacedTile> {
        Self::index_of(pos).and_then(|i| self.placed_tiles[i].as_ref())
    }

    pub fn tile_with_id(&self, id: TileId) -> Result<&PlacedTile, GameError> {
        self.placed_tiles()
            .find(|t| t.id() == id)
            .ok_or(GameError::UnknownTile(id))
    }

    /// Placed tiles, oldest first
    pub fn placed_tiles(&self) -> impl Iterator<Item = &PlacedTile> + '_ {
        self.tile_indices
            .iter()
            .filter_map(|&i| self.placed_tiles[i].as_ref())
    }

    /// Ids of the placed tiles, oldest first
    pub fn tile_ids(&self) -> Vec<TileId> {
        self.placed_tiles().map(PlacedTile::id).collect()
    }

    pub fn last_placed_tile(&self) -> Option<&PlacedTile> {
        self.tile_indices
            .last()
            .and_then(|&i| self.placed_tiles[i].as_ref())
    }

    pub fn zone_partitions(&self) -> &ZonePartitions {
        &self.zone_partitions
    }

    pub fn cancelled_animals(&self) -> &BTreeSet<Animal> {
        &self.cancelled_animals
    }

    /// Every occupant currently on the board
    pub fn occupants(&self) -> BTreeSet<Occupant> {
        self.placed_tiles().filter_map(|t| t.occupant).collect()
    }

    /// Occupants of the given kind placed by `player`
    pub fn occupant_count(&self, player: PlayerColor, kind: OccupantKind) -> u32 {
        self.placed_tiles()
            .filter(|t| t.placer == Some(player))
            .filter(|t| t.occupant.is_some_and(|o| o.kind == kind))
            .count() as u32
    }

    pub fn forest_area(&self, forest: &Forest) -> Result<&Area<Forest>, GameError> {
        self.zone_partitions.forests.area_containing(forest)
    }

    pub fn meadow_area(&self, meadow: &Meadow) -> Result<&Area<Meadow>, GameError> {
        self.zone_partitions.meadows.area_containing(meadow)
    }

    pub fn river_area(&self, river: &River) -> Result<&Area<River>, GameError> {
        self.zone_partitions.rivers.area_containing(river)
    }

    pub fn river_system_area(&self, water: &Water) -> Result<&Area<Water>, GameError> {
        self.zone_partitions.river_systems.area_containing(water)
    }

    pub fn meadow_areas(&self) -> &[Area<Meadow>] {
        self.zone_partitions.meadows.areas()
    }

    pub fn river_system_areas(&self) -> &[Area<Water>] {
        self.zone_partitions.river_systems.areas()
    }

    /// The part of the meadow containing `meadow` that lies on `pos` or on one
    /// of its eight surrounding cells. It keeps the meadow's occupants and is
    /// considered closed.
    pub fn adjacent_meadow(&self, pos: Pos, meadow: &Meadow) -> Result<Area<Meadow>, GameError> {
        let area = self.meadow_area(meadow)?;
        let mut zones = Vec::new();
        for zone in area.zones() {
            let zone_pos = self.tile_with_id(zone.tile_id())?.pos;
            if zone_pos.x.abs_diff(pos.x) <= 1 && zone_pos.y.abs_diff(pos.y) <= 1 {
                zones.push(zone.clone());
            }
        }
        Ok(Area::new(zones, area.occupants().iter().copied(), 0))
    }

    /// Empty cells within reach that touch at least one placed tile
    pub fn insertion_positions(&self) -> BTreeSet<Pos> {
        self.placed_tiles()
            .flat_map(|t| t.pos.neighbors())
            .filter(|&p| Self::index_of(p).is_some() && self.tile_at(p).is_none())
            .collect()
    }

    /// Forest areas containing a zone of the last tile and now closed
    pub fn forests_closed_by_last_tile(&self) -> Vec<Area<Forest>> {
        let Some(tile) = self.last_placed_tile() else {
            return Vec::new();
        };
        let mut closed: Vec<Area<Forest>> = Vec::new();
        for forest in tile.forest_zones() {
            if let Ok(area) = self.forest_area(&forest) {
                if area.is_closed() && !closed.contains(area) {
                    closed.push(area.clone());
                }
            }
        }
        closed
    }

    /// River areas containing a zone of the last tile and now closed
    pub fn rivers_closed_by_last_tile(&self) -> Vec<Area<River>> {
        let Some(tile) = self.last_placed_tile() else {
            return Vec::new();
        };
        let mut closed: Vec<Area<River>> = Vec::new();
        for river in tile.river_zones() {
            if let Ok(area) = self.river_area(&river) {
                if area.is_closed() && !closed.contains(area) {
                    closed.push(area.clone());
                }
            }
        }
        closed
    }

    /// Whether `tile` sits on an insertion position and every neighbor's
    /// facing side is of the same kind as the tile's
    pub fn can_add_tile(&self, tile: &PlacedTile) -> bool {
        if !self.insertion_positions().contains(&tile.pos) {
            return false;
        }
        Direction::ALL.iter().all(|&direction| {
            self.tile_at(tile.pos.neighbor(direction))
                .map_or(true, |neighbor| {
                    tile.side(direction)
                        .is_same_kind_as(neighbor.side(direction.opposite()))
                })
        })
    }

    /// Whether `tile` can be placed somewhere, in some rotation
    pub fn could_place_tile(&self, tile: &Tile) -> bool {
        self.insertion_positions().into_iter().any(|pos| {
            Rotation::ALL.iter().any(|&rotation| {
                self.can_add_tile(&PlacedTile::new(tile.clone(), None, rotation, pos))
            })
        })
    }

    /// Board with `tile` added and its zones connected to its neighbors'
    pub fn with_new_tile(&self, tile: PlacedTile) -> Result<Board, GameError> {
        let index = Self::index_of(tile.pos).ok_or(GameError::InvalidPlacement(tile.pos))?;
        if !self.is_empty() && !self.can_add_tile(&tile) {
            return Err(GameError::InvalidPlacement(tile.pos));
        }
        if tile.occupant.is_some() {
            return Err(GameError::TileAlreadyOccupied(tile.id()));
        }

        let mut builder = ZonePartitionsBuilder::new(&self.zone_partitions);
        builder.add_tile(&tile.tile)?;
        for direction in Direction::ALL {
            if let Some(neighbor) = self.tile_at(tile.pos.neighbor(direction)) {
                builder.connect_sides(tile.side(direction), neighbor.side(direction.opposite()))?;
            }
        }

        let mut board = self.clone();
        board.placed_tiles[index] = Some(tile);
        board.tile_indices.push(index);
        board.zone_partitions = builder.build();
        Ok(board)
    }

    fn cell_of_tile(&self, id: TileId) -> Result<usize, GameError> {
        self.tile_indices
            .iter()
            .copied()
            .find(|&i| self.placed_tiles[i].as_ref().is_some_and(|t| t.id() == id))
            .ok_or(GameError::UnknownTile(id))
    }

    /// Board with `occupant` placed on its zone by the tile's placer
    pub fn with_occupant(&self, occupant: Occupant) -> Result<Board, GameError> {
        let index = self.cell_of_tile(tile_id(occupant.zone_id))?;
        let tile = self.placed_tiles[index]
            .as_ref()
            .ok_or(GameError::UnknownTile(tile_id(occupant.zone_id)))?;
        let placer = tile.placer.ok_or(GameError::InvalidOccupant(occupant.zone_id))?;
        let zone = tile.zone_with_id(occupant.zone_id)?;

        let mut builder = ZonePartitionsBuilder::new(&self.zone_partitions);
        builder.add_initial_occupant(placer, occupant.kind, &zone)?;
        let occupied = tile.with_occupant(occupant)?;

        let mut board = self.clone();
        board.placed_tiles[index] = Some(occupied);
        board.zone_partitions = builder.build();
        Ok(board)
    }

    /// Board with the pawn `occupant` taken back by the tile's placer
    pub fn without_occupant(&self, occupant: Occupant) -> Result<Board, GameError> {
        let index = self.cell_of_tile(tile_id(occupant.zone_id))?;
        let tile = self.placed_tiles[index]
            .as_ref()
            .ok_or(GameError::UnknownTile(tile_id(occupant.zone_id)))?;
        if tile.occupant != Some(occupant) {
            return Err(GameError::OccupantNotPresent);
        }
        let placer = tile.placer.ok_or(GameError::OccupantNotPresent)?;
        let zone = tile.zone_with_id(occupant.zone_id)?;

        let mut builder = ZonePartitionsBuilder::new(&self.zone_partitions);
        builder.remove_pawn(placer, &zone)?;

        let mut board = self.clone();
        board.placed_tiles[index] = Some(tile.with_no_occupant());
        board.zone_partitions = builder.build();
        Ok(board)
    }

    /// Board with the pawns of the given forests and rivers sent back home
    pub fn without_gatherers_or_fishers_in(
        &self,
        forests: &[Area<Forest>],
        rivers: &[Area<River>],
    ) -> Result<Board, GameError> {
        let mut builder = ZonePartitionsBuilder::new(&self.zone_partitions);
        for forest in forests {
            builder.clear_gatherers(forest)?;
        }
        for river in rivers {
            builder.clear_fishers(river)?;
        }

        let cleared: BTreeSet<ZoneId> = forests
            .iter()
            .flat_map(|a| a.zone_ids())
            .chain(rivers.iter().flat_map(|a| a.zone_ids()))
            .collect();

        let mut board = self.clone();
        for &index in &self.tile_indices {
            if let Some(tile) = &self.placed_tiles[index] {
                if let Some(occupant) = tile.occupant {
                    if occupant.kind == OccupantKind::Pawn && cleared.contains(&occupant.zone_id) {
                        board.placed_tiles[index] = Some(tile.with_no_occupant());
                    }
                }
            }
        }
        board.zone_partitions = builder.build();
        Ok(board)
    }

    /// Board with more animals removed from scoring; never shrinks the set
    pub fn with_more_cancelled_animals(&self, animals: impl IntoIterator<Item = Animal>) -> Board {
        let mut board = self.clone();
        board.cancelled_animals.extend(animals);
        board
    }
}
