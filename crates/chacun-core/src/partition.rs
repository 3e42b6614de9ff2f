//! Zone partitions: the set of disjoint areas covering every zone of one
//! category placed so far.
//!
//! Areas live in a vector and every zone id maps to the slot of the area
//! containing it, so lookups and unions never scan the whole partition.
//! A partition is an immutable value; it is updated through a
//! [`ZonePartitionBuilder`] while a new board is being built.

use crate::area::Area;
use crate::error::GameError;
use crate::player::PlayerColor;
use crate::zone::{AreaZone, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Disjoint areas covering every zone of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePartition<Z: AreaZone> {
    areas: Vec<Area<Z>>,
    /// Zone id -> slot in `areas`
    index: BTreeMap<ZoneId, usize>,
}

impl<Z: AreaZone> Default for ZonePartition<Z> {
    fn default() -> Self {
        Self {
            areas: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<Z: AreaZone> ZonePartition<Z> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Areas in the order they were first created
    pub fn areas(&self) -> &[Area<Z>] {
        &self.areas
    }

    pub fn area_containing(&self, zone: &Z) -> Result<&Area<Z>, GameError> {
        self.area_containing_id(zone.id())
    }

    pub fn area_containing_id(&self, zone_id: ZoneId) -> Result<&Area<Z>, GameError> {
        self.index
            .get(&zone_id)
            .map(|&slot| &self.areas[slot])
            .ok_or(GameError::UnknownZone(zone_id))
    }

    pub fn contains(&self, zone_id: ZoneId) -> bool {
        self.index.contains_key(&zone_id)
    }
}

/// Mutable accumulation of areas while a board is rebuilt
#[derive(Debug, Clone)]
pub struct ZonePartitionBuilder<Z: AreaZone> {
    areas: Vec<Area<Z>>,
    index: BTreeMap<ZoneId, usize>,
}

impl<Z: AreaZone> ZonePartitionBuilder<Z> {
    /// Start from the areas of an existing partition
    pub fn new(partition: &ZonePartition<Z>) -> Self {
        Self {
            areas: partition.areas.clone(),
            index: partition.index.clone(),
        }
    }

    fn slot_of(&self, zone_id: ZoneId) -> Result<usize, GameError> {
        self.index
            .get(&zone_id)
            .copied()
            .ok_or(GameError::UnknownZone(zone_id))
    }

    /// Introduce a new area made of `zone` alone
    pub fn add_singleton(&mut self, zone: Z, open_connections: u32) -> Result<(), GameError> {
        let id = zone.id();
        if self.index.contains_key(&id) {
            return Err(GameError::DuplicateZone(id));
        }
        self.index.insert(id, self.areas.len());
        self.areas.push(Area::singleton(zone, open_connections));
        Ok(())
    }

    pub fn add_initial_occupant(&mut self, zone: &Z, player: PlayerColor) -> Result<(), GameError> {
        let slot = self.slot_of(zone.id())?;
        self.areas[slot] = self.areas[slot].with_initial_occupant(player)?;
        Ok(())
    }

    pub fn remove_occupant(&mut self, zone: &Z, player: PlayerColor) -> Result<(), GameError> {
        let slot = self.slot_of(zone.id())?;
        self.areas[slot] = self.areas[slot].without_occupant(player)?;
        Ok(())
    }

    /// Clear every occupant of `area`, which must be one of the current areas
    pub fn remove_all_occupants_of(&mut self, area: &Area<Z>) -> Result<(), GameError> {
        let slot = self
            .areas
            .iter()
            .position(|a| a == area)
            .ok_or(GameError::UnknownArea)?;
        self.areas[slot] = self.areas[slot].without_occupants();
        Ok(())
    }

    /// Join the areas containing the two zones across one matched edge
    pub fn union(&mut self, zone1: &Z, zone2: &Z) -> Result<(), GameError> {
        let slot1 = self.slot_of(zone1.id())?;
        let slot2 = self.slot_of(zone2.id())?;

        if slot1 == slot2 {
            self.areas[slot1] = self.areas[slot1].connect_to(&self.areas[slot1])?;
            return Ok(());
        }

        let merged = self.areas[slot1].connect_to(&self.areas[slot2])?;
        let (keep, drop) = (slot1.min(slot2), slot1.max(slot2));
        for id in merged.zone_ids() {
            self.index.insert(id, keep);
        }
        self.areas[keep] = merged;

        self.areas.swap_remove(drop);
        if let Some(moved) = self.areas.get(drop) {
            for id in moved.zone_ids() {
                self.index.insert(id, drop);
            }
        }
        Ok(())
    }

    pub fn build(self) -> ZonePartition<Z> {
        ZonePartition {
            areas: self.areas,
            index: self.index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::forest;
    use crate::zone::{Forest, ForestKind};
    use pretty_assertions::assert_eq;

    fn f(id: ZoneId) -> Forest {
        forest(id, ForestKind::Plain)
    }

    fn builder_with(zones: &[(ZoneId, u32)]) -> ZonePartitionBuilder<Forest> {
        let mut builder = ZonePartitionBuilder::new(&ZonePartition::new());
        for &(id, open) in zones {
            builder.add_singleton(f(id), open).unwrap();
        }
        builder
    }

    #[test]
    fn test_add_singleton_rejects_duplicates() {
        let mut builder = builder_with(&[(10, 1)]);
        assert_eq!(builder.add_singleton(f(10), 2), Err(GameError::DuplicateZone(10)));
    }

    #[test]
    fn test_union_merges_areas() {
        let mut builder = builder_with(&[(10, 1), (20, 2), (30, 1)]);
        builder.union(&f(10), &f(20)).unwrap();
        let partition = builder.build();

        assert_eq!(partition.areas().len(), 2);
        let merged = partition.area_containing(&f(20)).unwrap();
        assert_eq!(merged.zone_ids().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(merged.open_connections(), 1);
        assert_eq!(partition.area_containing(&f(10)).unwrap(), merged);

        let other = partition.area_containing(&f(30)).unwrap();
        assert_eq!(other.zone_ids().collect::<Vec<_>>(), vec![30]);
    }

    #[test]
    fn test_union_keeps_index_consistent_after_swap() {
        let mut builder = builder_with(&[(10, 2), (20, 2), (30, 2), (40, 2)]);
        // Merging slots 0 and 1 moves the last area into slot 1
        builder.union(&f(10), &f(20)).unwrap();
        builder.union(&f(40), &f(10)).unwrap();
        let partition = builder.build();

        let big = partition.area_containing(&f(40)).unwrap();
        assert_eq!(big.zone_ids().collect::<Vec<_>>(), vec![10, 20, 40]);
        assert_eq!(big.open_connections(), 2);
        assert_eq!(
            partition.area_containing(&f(30)).unwrap().zone_ids().collect::<Vec<_>>(),
            vec![30]
        );
    }

    #[test]
    fn test_union_of_same_area_closes_loop() {
        let mut builder = builder_with(&[(10, 2), (20, 2)]);
        builder.union(&f(10), &f(20)).unwrap();
        builder.union(&f(20), &f(10)).unwrap();
        let partition = builder.build();
        assert!(partition.area_containing(&f(10)).unwrap().is_closed());
    }

    #[test]
    fn test_union_unknown_zone() {
        let mut builder = builder_with(&[(10, 1)]);
        assert_eq!(builder.union(&f(10), &f(99)), Err(GameError::UnknownZone(99)));
    }

    #[test]
    fn test_occupants() {
        let mut builder = builder_with(&[(10, 1), (20, 1)]);
        builder.add_initial_occupant(&f(10), PlayerColor::Red).unwrap();
        assert_eq!(
            builder.add_initial_occupant(&f(10), PlayerColor::Blue),
            Err(GameError::AreaAlreadyOccupied)
        );
        builder.add_initial_occupant(&f(20), PlayerColor::Blue).unwrap();
        builder.union(&f(10), &f(20)).unwrap();

        let area = builder.build().area_containing(&f(10)).unwrap().clone();
        assert_eq!(area.occupants(), &[PlayerColor::Red, PlayerColor::Blue]);

        let mut builder = ZonePartitionBuilder::new(&{
            let mut b = builder_with(&[(10, 1)]);
            b.add_initial_occupant(&f(10), PlayerColor::Red).unwrap();
            b.build()
        });
        assert_eq!(
            builder.remove_occupant(&f(10), PlayerColor::Green),
            Err(GameError::OccupantNotPresent)
        );
        builder.remove_occupant(&f(10), PlayerColor::Red).unwrap();
        assert!(!builder.build().area_containing(&f(10)).unwrap().is_occupied());
    }

    #[test]
    fn test_remove_all_occupants_of() {
        let mut builder = builder_with(&[(10, 2), (20, 2)]);
        builder.add_initial_occupant(&f(10), PlayerColor::Red).unwrap();
        builder.add_initial_occupant(&f(20), PlayerColor::Red).unwrap();
        builder.union(&f(10), &f(20)).unwrap();
        let partition = builder.build();
        let area = partition.area_containing(&f(10)).unwrap().clone();

        let mut builder = ZonePartitionBuilder::new(&partition);
        builder.remove_all_occupants_of(&area).unwrap();
        let cleared = builder.build();
        assert!(!cleared.area_containing(&f(20)).unwrap().is_occupied());

        // A stale area is no longer registered once its occupants changed
        let mut builder = ZonePartitionBuilder::new(&cleared);
        assert_eq!(builder.remove_all_occupants_of(&area), Err(GameError::UnknownArea));
    }
}
