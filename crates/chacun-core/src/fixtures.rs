//! Hand-built tiles shared by the unit tests.
//!
//! Zone ids follow the catalog convention `tile_id * 10 + local_id`.

use crate::tile::{Tile, TileKind, TileSide, TileId};
use crate::zone::{Animal, AnimalKind, Forest, ForestKind, Lake, Meadow, River, SpecialPower, ZoneId};

fn zid(tile: TileId, local: u32) -> ZoneId {
    tile * 10 + local
}

pub fn meadow(id: ZoneId, kinds: &[AnimalKind], special_power: Option<SpecialPower>) -> Meadow {
    Meadow {
        id,
        animals: kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| Animal::new(id * 100 + i as u32, kind))
            .collect(),
        special_power,
    }
}

pub fn forest(id: ZoneId, kind: ForestKind) -> Forest {
    Forest { id, kind }
}

fn river_side(meadow1: &Meadow, river: &River, meadow2: &Meadow) -> TileSide {
    TileSide::River {
        meadow1: meadow1.clone(),
        river: river.clone(),
        meadow2: meadow2.clone(),
    }
}

/// Start tile: forest north, meadow east, river south, meadow west
///
/// Zones: 560 forest, 561 meadow (east), 562 river (1 fish), 563 meadow (west)
pub fn start_tile() -> Tile {
    let f = forest(560, ForestKind::Plain);
    let east = meadow(561, &[], None);
    let river = River {
        id: 562,
        fish_count: 1,
        lake: None,
    };
    let west = meadow(563, &[], None);
    Tile::new(
        56,
        TileKind::Start,
        TileSide::Forest(f),
        TileSide::Meadow(east.clone()),
        river_side(&east, &river, &west),
        TileSide::Meadow(west),
    )
}

/// Forest on the north side only, one meadow around it
pub fn forest_end(id: TileId, kind: ForestKind) -> Tile {
    forest_end_of_kind(id, TileKind::Normal, kind)
}

pub fn forest_end_of_kind(id: TileId, tile_kind: TileKind, kind: ForestKind) -> Tile {
    let f = forest(zid(id, 0), kind);
    let m = meadow(zid(id, 1), &[], None);
    Tile::new(
        id,
        tile_kind,
        TileSide::Forest(f),
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m),
    )
}

/// A single forest crossing the tile from north to south
pub fn forest_corridor(id: TileId, kind: ForestKind) -> Tile {
    let f = forest(zid(id, 0), kind);
    Tile::new(
        id,
        TileKind::Normal,
        TileSide::Forest(f.clone()),
        TileSide::Meadow(meadow(zid(id, 1), &[], None)),
        TileSide::Forest(f),
        TileSide::Meadow(meadow(zid(id, 2), &[], None)),
    )
}

/// A single meadow covering the whole tile
pub fn meadow_only(id: TileId, kinds: &[AnimalKind], special_power: Option<SpecialPower>) -> Tile {
    let m = meadow(zid(id, 0), kinds, special_power);
    Tile::new(
        id,
        TileKind::Normal,
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m),
    )
}

/// Forest north; a river bends from east to south
///
/// Zones: 0 forest, 1 outer meadow, 2 river (no fish), 3 inner meadow
pub fn river_bend(id: TileId) -> Tile {
    let f = forest(zid(id, 0), ForestKind::Plain);
    let outer = meadow(zid(id, 1), &[], None);
    let river = River {
        id: zid(id, 2),
        fish_count: 0,
        lake: None,
    };
    let inner = meadow(zid(id, 3), &[], None);
    Tile::new(
        id,
        TileKind::Normal,
        TileSide::Forest(f),
        river_side(&outer, &river, &inner),
        river_side(&inner, &river, &outer),
        TileSide::Meadow(outer),
    )
}

/// A river flowing from west to east, meadow 0 north of it and 2 south
pub fn river_straight(id: TileId, fish_count: u32) -> Tile {
    let north = meadow(zid(id, 0), &[], None);
    let river = River {
        id: zid(id, 1),
        fish_count,
        lake: None,
    };
    let south = meadow(zid(id, 2), &[], None);
    Tile::new(
        id,
        TileKind::Normal,
        TileSide::Meadow(north.clone()),
        river_side(&north, &river, &south),
        TileSide::Meadow(south.clone()),
        river_side(&south, &river, &north),
    )
}

/// A river entering from the south and ending in lake 8 (2 fish)
///
/// Zones: 0 meadow, 1 river (1 fish), 8 lake
pub fn lake_end(id: TileId, special_power: Option<SpecialPower>) -> Tile {
    let m = meadow(zid(id, 0), &[], None);
    let lake = Lake {
        id: zid(id, 8),
        fish_count: 2,
        special_power,
    };
    let river = River {
        id: zid(id, 1),
        fish_count: 1,
        lake: Some(lake),
    };
    Tile::new(
        id,
        TileKind::Normal,
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m.clone()),
        river_side(&m, &river, &m),
        TileSide::Meadow(m),
    )
}
