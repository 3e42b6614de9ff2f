//! Tile catalog loading.
//!
//! A catalog is a JSON document listing every tile of the game. Each tile
//! declares its zones by local id and then its four sides (north, east,
//! south, west) by referencing those local ids:
//!
//! ```json
//! { "id": 9, "kind": "Normal",
//!   "zones": [
//!     { "type": "Meadow", "local": 0, "animals": ["Deer"] },
//!     { "type": "River", "local": 1, "fish": 1, "lake": 8 },
//!     { "type": "Lake", "local": 8, "fish": 1, "power": "Logboat" } ],
//!   "sides": [{ "Meadow": 0 }, { "Meadow": 0 }, { "River": [0, 1, 0] }, { "Meadow": 0 }] }
//! ```
//!
//! Zone ids are derived as `tile_id * 10 + local`, animal ids as
//! `zone_id * 100 + index`.

use crate::tile::{Tile, TileId, TileKind, TileSide};
use crate::zone::{
    Animal, AnimalKind, Forest, ForestKind, Lake, Meadow, River, SpecialPower, ZoneId, MAX_LOCAL_ZONES,
};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;

const DEMO_CATALOG: &str = include_str!("../data/demo_tiles.json");

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Cannot read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tile {0} appears more than once")]
    DuplicateTile(TileId),

    #[error("Tile {tile} declares local zone {local} more than once")]
    DuplicateZone { tile: TileId, local: u32 },

    #[error("Tile {tile} uses local zone {local}, local ids must be below 10")]
    LocalIdOutOfRange { tile: TileId, local: u32 },

    #[error("Tile {tile} references undeclared local zone {local}")]
    UnknownZone { tile: TileId, local: u32 },

    #[error("Tile {tile} references local zone {local} with the wrong zone type")]
    WrongZoneType { tile: TileId, local: u32 },

    #[error("Tile {tile} declares local zone {local} but never uses it")]
    UnusedZone { tile: TileId, local: u32 },

    #[error("A catalog needs exactly one start tile, found {0}")]
    StartTileCount(usize),
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    tiles: Vec<RawTile>,
}

#[derive(Debug, Deserialize)]
struct RawTile {
    id: TileId,
    kind: TileKind,
    zones: Vec<RawZone>,
    sides: [RawSide; 4],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawZone {
    Forest {
        local: u32,
        kind: ForestKind,
    },
    Meadow {
        local: u32,
        #[serde(default)]
        animals: Vec<AnimalKind>,
        #[serde(default)]
        power: Option<SpecialPower>,
    },
    River {
        local: u32,
        #[serde(default)]
        fish: u32,
        #[serde(default)]
        lake: Option<u32>,
    },
    Lake {
        local: u32,
        #[serde(default)]
        fish: u32,
        #[serde(default)]
        power: Option<SpecialPower>,
    },
}

impl RawZone {
    fn local(&self) -> u32 {
        match self {
            RawZone::Forest { local, .. }
            | RawZone::Meadow { local, .. }
            | RawZone::River { local, .. }
            | RawZone::Lake { local, .. } => *local,
        }
    }
}

#[derive(Debug, Deserialize)]
enum RawSide {
    Forest(u32),
    Meadow(u32),
    River([u32; 3]),
}

/// Builds the zones of one tile from its raw declaration
struct TileBuilder<'a> {
    tile: TileId,
    zones: BTreeMap<u32, &'a RawZone>,
    used: BTreeSet<u32>,
}

impl<'a> TileBuilder<'a> {
    fn new(raw: &'a RawTile) -> Result<Self, CatalogError> {
        let mut zones = BTreeMap::new();
        for zone in &raw.zones {
            let local = zone.local();
            if local >= MAX_LOCAL_ZONES {
                return Err(CatalogError::LocalIdOutOfRange {
                    tile: raw.id,
                    local,
                });
            }
            if zones.insert(local, zone).is_some() {
                return Err(CatalogError::DuplicateZone {
                    tile: raw.id,
                    local,
                });
            }
        }
        Ok(Self {
            tile: raw.id,
            zones,
            used: BTreeSet::new(),
        })
    }

    fn zone_id(&self, local: u32) -> ZoneId {
        self.tile * MAX_LOCAL_ZONES + local
    }

    fn lookup(&mut self, local: u32) -> Result<&'a RawZone, CatalogError> {
        let zone = self
            .zones
            .get(&local)
            .copied()
            .ok_or(CatalogError::UnknownZone {
                tile: self.tile,
                local,
            })?;
        self.used.insert(local);
        Ok(zone)
    }

    fn wrong_type(&self, local: u32) -> CatalogError {
        CatalogError::WrongZoneType {
            tile: self.tile,
            local,
        }
    }

    fn forest(&mut self, local: u32) -> Result<Forest, CatalogError> {
        match self.lookup(local)? {
            RawZone::Forest { kind, .. } => Ok(Forest {
                id: self.zone_id(local),
                kind: *kind,
            }),
            _ => Err(self.wrong_type(local)),
        }
    }

    fn meadow(&mut self, local: u32) -> Result<Meadow, CatalogError> {
        match self.lookup(local)? {
            RawZone::Meadow { animals, power, .. } => {
                let id = self.zone_id(local);
                Ok(Meadow {
                    id,
                    animals: animals
                        .iter()
                        .enumerate()
                        .map(|(i, &kind)| Animal::new(id * 100 + i as u32, kind))
                        .collect(),
                    special_power: *power,
                })
            }
            _ => Err(self.wrong_type(local)),
        }
    }

    fn lake(&mut self, local: u32) -> Result<Lake, CatalogError> {
        match self.lookup(local)? {
            RawZone::Lake { fish, power, .. } => Ok(Lake {
                id: self.zone_id(local),
                fish_count: *fish,
                special_power: *power,
            }),
            _ => Err(self.wrong_type(local)),
        }
    }

    fn river(&mut self, local: u32) -> Result<River, CatalogError> {
        match self.lookup(local)? {
            RawZone::River { fish, lake, .. } => {
                let lake = match lake {
                    Some(lake) => Some(self.lake(*lake)?),
                    None => None,
                };
                Ok(River {
                    id: self.zone_id(local),
                    fish_count: *fish,
                    lake,
                })
            }
            _ => Err(self.wrong_type(local)),
        }
    }

    fn side(&mut self, side: &RawSide) -> Result<TileSide, CatalogError> {
        Ok(match *side {
            RawSide::Forest(local) => TileSide::Forest(self.forest(local)?),
            RawSide::Meadow(local) => TileSide::Meadow(self.meadow(local)?),
            RawSide::River([meadow1, river, meadow2]) => TileSide::River {
                meadow1: self.meadow(meadow1)?,
                river: self.river(river)?,
                meadow2: self.meadow(meadow2)?,
            },
        })
    }

    fn build(mut self, raw: &RawTile) -> Result<Tile, CatalogError> {
        let [n, e, s, w] = &raw.sides;
        let tile = Tile::new(
            raw.id,
            raw.kind,
            self.side(n)?,
            self.side(e)?,
            self.side(s)?,
            self.side(w)?,
        );
        if let Some(&local) = self.zones.keys().find(|local| !self.used.contains(local)) {
            return Err(CatalogError::UnusedZone {
                tile: raw.id,
                local,
            });
        }
        Ok(tile)
    }
}

/// The validated, ordered list of every tile of a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCatalog {
    tiles: Vec<Tile>,
}

impl TileCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;

        let mut ids = BTreeSet::new();
        let mut tiles = Vec::with_capacity(raw.tiles.len());
        for raw_tile in &raw.tiles {
            if !ids.insert(raw_tile.id) {
                return Err(CatalogError::DuplicateTile(raw_tile.id));
            }
            tiles.push(TileBuilder::new(raw_tile)?.build(raw_tile)?);
        }

        let starts = tiles.iter().filter(|t| t.kind == TileKind::Start).count();
        if starts != 1 {
            return Err(CatalogError::StartTileCount(starts));
        }

        tracing::debug!(tiles = tiles.len(), "tile catalog loaded");
        Ok(Self { tiles })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The small catalog bundled with the crate
    pub fn demo() -> Result<Self, CatalogError> {
        Self::from_json_str(DEMO_CATALOG)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_of_kind(&self, kind: TileKind) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().filter(move |t| t.kind == kind)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
