//! The four zone partitions of a board, kept in lockstep as tiles are added.

use crate::area::Area;
use crate::error::GameError;
use crate::partition::{ZonePartition, ZonePartitionBuilder};
use crate::player::{OccupantKind, PlayerColor};
use crate::tile::{Tile, TileSide};
use crate::zone::{local_id, Forest, Meadow, River, Water, Zone, MAX_LOCAL_ZONES};
use serde::{Deserialize, Serialize};

/// Forest, meadow, river and river-system partitions of a board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePartitions {
    pub forests: ZonePartition<Forest>,
    pub meadows: ZonePartition<Meadow>,
    pub rivers: ZonePartition<River>,
    pub river_systems: ZonePartition<Water>,
}

impl ZonePartitions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builder updating all four partitions at once
#[derive(Debug, Clone)]
pub struct ZonePartitionsBuilder {
    forests: ZonePartitionBuilder<Forest>,
    meadows: ZonePartitionBuilder<Meadow>,
    rivers: ZonePartitionBuilder<River>,
    river_systems: ZonePartitionBuilder<Water>,
}

impl ZonePartitionsBuilder {
    pub fn new(partitions: &ZonePartitions) -> Self {
        Self {
            forests: ZonePartitionBuilder::new(&partitions.forests),
            meadows: ZonePartitionBuilder::new(&partitions.meadows),
            rivers: ZonePartitionBuilder::new(&partitions.rivers),
            river_systems: ZonePartitionBuilder::new(&partitions.river_systems),
        }
    }

    /// Add every zone of a freshly placed tile as a singleton area.
    ///
    /// A river ending in a lake gets one extra connection to the lake on
    /// both ends, which the final union consumes.
    pub fn add_tile(&mut self, tile: &Tile) -> Result<(), GameError> {
        let mut open_connections = [0u32; MAX_LOCAL_ZONES as usize];
        for side in &tile.sides {
            for zone in side.zones() {
                open_connections[zone.local_id() as usize] += 1;
            }
        }
        let zones = tile.zones();
        for zone in &zones {
            if let Zone::River(River {
                lake: Some(lake), ..
            }) = zone
            {
                open_connections[zone.local_id() as usize] += 1;
                open_connections[local_id(lake.id) as usize] += 1;
            }
        }

        for zone in &zones {
            let open = open_connections[zone.local_id() as usize];
            match zone {
                Zone::Forest(forest) => self.forests.add_singleton(forest.clone(), open)?,
                Zone::Meadow(meadow) => self.meadows.add_singleton(meadow.clone(), open)?,
                Zone::River(river) => {
                    self.river_systems
                        .add_singleton(Water::River(river.clone()), open)?;
                    let river_open = if river.has_lake() { open - 1 } else { open };
                    self.rivers.add_singleton(river.clone(), river_open)?;
                }
                Zone::Lake(lake) => self
                    .river_systems
                    .add_singleton(Water::Lake(lake.clone()), open)?,
            }
        }

        for zone in &zones {
            if let Zone::River(river) = zone {
                if let Some(lake) = &river.lake {
                    self.river_systems
                        .union(&Water::River(river.clone()), &Water::Lake(lake.clone()))?;
                }
            }
        }
        Ok(())
    }

    /// Join the areas on both sides of a newly matched edge
    pub fn connect_sides(&mut self, side1: &TileSide, side2: &TileSide) -> Result<(), GameError> {
        match (side1, side2) {
            (TileSide::Forest(f1), TileSide::Forest(f2)) => self.forests.union(f1, f2),
            (TileSide::Meadow(m1), TileSide::Meadow(m2)) => self.meadows.union(m1, m2),
            (
                TileSide::River {
                    meadow1: m1,
                    river: r1,
                    meadow2: m2,
                },
                TileSide::River {
                    meadow1: m3,
                    river: r2,
                    meadow2: m4,
                },
            ) => {
                self.rivers.union(r1, r2)?;
                self.river_systems
                    .union(&Water::River(r1.clone()), &Water::River(r2.clone()))?;
                // Facing sides list their meadows in opposite orders
                self.meadows.union(m1, m4)?;
                self.meadows.union(m2, m3)
            }
            _ => Err(GameError::IncompatibleSides),
        }
    }

    /// Record a newly placed occupant in the partition it belongs to
    pub fn add_initial_occupant(
        &mut self,
        player: PlayerColor,
        kind: OccupantKind,
        zone: &Zone,
    ) -> Result<(), GameError> {
        match (zone, kind) {
            (Zone::Forest(f), OccupantKind::Pawn) => self.forests.add_initial_occupant(f, player),
            (Zone::Meadow(m), OccupantKind::Pawn) => self.meadows.add_initial_occupant(m, player),
            (Zone::River(r), OccupantKind::Pawn) if !r.has_lake() => {
                self.rivers.add_initial_occupant(r, player)
            }
            (Zone::River(r), OccupantKind::Hut) if r.has_lake() => self
                .river_systems
                .add_initial_occupant(&Water::River(r.clone()), player),
            (Zone::Lake(l), OccupantKind::Hut) => self
                .river_systems
                .add_initial_occupant(&Water::Lake(l.clone()), player),
            _ => Err(GameError::InvalidOccupant(zone.id())),
        }
    }

    /// Take back one pawn of `player` from the area containing `zone`
    pub fn remove_pawn(&mut self, player: PlayerColor, zone: &Zone) -> Result<(), GameError> {
        match zone {
            Zone::Forest(f) => self.forests.remove_occupant(f, player),
            Zone::Meadow(m) => self.meadows.remove_occupant(m, player),
            Zone::River(r) => self.rivers.remove_occupant(r, player),
            Zone::Lake(l) => Err(GameError::InvalidOccupant(l.id)),
        }
    }

    pub fn clear_gatherers(&mut self, forest: &Area<Forest>) -> Result<(), GameError> {
        self.forests.remove_all_occupants_of(forest)
    }

    pub fn clear_fishers(&mut self, river: &Area<River>) -> Result<(), GameError> {
        self.rivers.remove_all_occupants_of(river)
    }

    pub fn build(self) -> ZonePartitions {
        ZonePartitions {
            forests: self.forests.build(),
            meadows: self.meadows.build(),
            rivers: self.rivers.build(),
            river_systems: self.river_systems.build(),
        }
    }
}
