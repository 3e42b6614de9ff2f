//! Areas: maximal connected regions of zones of one category.
//!
//! An area records its zones, the players occupying it (a multiset, kept
//! sorted) and the number of tile edges leaving it that are not yet matched
//! by a neighboring tile. An area with no open connection is closed.

use crate::error::GameError;
use crate::player::PlayerColor;
use crate::tile::TileId;
use crate::zone::{Animal, AreaZone, Forest, ForestKind, Meadow, River, SpecialPower, Water, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A connected region of zones of the same category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area<Z: AreaZone> {
    zones: BTreeSet<Z>,
    occupants: Vec<PlayerColor>,
    open_connections: u32,
}

impl<Z: AreaZone> Area<Z> {
    pub fn new(
        zones: impl IntoIterator<Item = Z>,
        occupants: impl IntoIterator<Item = PlayerColor>,
        open_connections: u32,
    ) -> Self {
        let mut occupants: Vec<PlayerColor> = occupants.into_iter().collect();
        occupants.sort();
        Self {
            zones: zones.into_iter().collect(),
            occupants,
            open_connections,
        }
    }

    /// Area made of a single, unoccupied zone
    pub fn singleton(zone: Z, open_connections: u32) -> Self {
        Self::new([zone], [], open_connections)
    }

    pub fn zones(&self) -> &BTreeSet<Z> {
        &self.zones
    }

    pub fn zone_ids(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.zones.iter().map(AreaZone::id)
    }

    /// Occupants sorted by color; a player appears once per marker
    pub fn occupants(&self) -> &[PlayerColor] {
        &self.occupants
    }

    pub fn open_connections(&self) -> u32 {
        self.open_connections
    }

    pub fn is_closed(&self) -> bool {
        self.open_connections == 0
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// Ids of the tiles the area spreads over
    pub fn tile_ids(&self) -> BTreeSet<TileId> {
        self.zones.iter().map(AreaZone::tile_id).collect()
    }

    /// Every player tied for the highest marker count; empty if unoccupied
    pub fn majority_occupants(&self) -> BTreeSet<PlayerColor> {
        let mut counts: BTreeMap<PlayerColor, u32> = BTreeMap::new();
        for &player in &self.occupants {
            *counts.entry(player).or_insert(0) += 1;
        }
        let max = counts.values().copied().max().unwrap_or(0);
        counts
            .into_iter()
            .filter(|&(_, count)| count == max)
            .map(|(player, _)| player)
            .collect()
    }

    /// Merge with `that` across one newly matched edge.
    ///
    /// Connecting an area to itself (a loop) keeps its zones and occupants.
    pub fn connect_to(&self, that: &Area<Z>) -> Result<Area<Z>, GameError> {
        if self == that {
            let open_connections = self
                .open_connections
                .checked_sub(2)
                .ok_or(GameError::NegativeOpenConnections)?;
            return Ok(Area {
                open_connections,
                ..self.clone()
            });
        }

        let open_connections = (self.open_connections + that.open_connections)
            .checked_sub(2)
            .ok_or(GameError::NegativeOpenConnections)?;
        Ok(Area::new(
            self.zones.iter().chain(&that.zones).cloned(),
            self.occupants.iter().chain(&that.occupants).copied(),
            open_connections,
        ))
    }

    pub fn with_initial_occupant(&self, player: PlayerColor) -> Result<Area<Z>, GameError> {
        if self.is_occupied() {
            return Err(GameError::AreaAlreadyOccupied);
        }
        Ok(Area {
            occupants: vec![player],
            ..self.clone()
        })
    }

    /// Remove one marker of `player`
    pub fn without_occupant(&self, player: PlayerColor) -> Result<Area<Z>, GameError> {
        let index = self
            .occupants
            .iter()
            .position(|&p| p == player)
            .ok_or(GameError::OccupantNotPresent)?;
        let mut occupants = self.occupants.clone();
        occupants.remove(index);
        Ok(Area {
            occupants,
            ..self.clone()
        })
    }

    pub fn without_occupants(&self) -> Area<Z> {
        Area {
            occupants: Vec::new(),
            ..self.clone()
        }
    }

    /// First zone in zone order carrying the given special power
    pub fn zone_with_special_power(&self, special_power: SpecialPower) -> Option<&Z> {
        self.zones
            .iter()
            .find(|z| z.special_power() == Some(special_power))
    }
}

impl Area<Forest> {
    pub fn has_menhir(&self) -> bool {
        self.zones.iter().any(|f| f.kind == ForestKind::WithMenhir)
    }

    pub fn mushroom_group_count(&self) -> u32 {
        self.zones
            .iter()
            .filter(|f| f.kind == ForestKind::WithMushrooms)
            .count() as u32
    }
}

impl Area<Meadow> {
    /// Animals of the meadow that have not been cancelled
    pub fn animals(&self, cancelled: &BTreeSet<Animal>) -> BTreeSet<Animal> {
        self.zones
            .iter()
            .flat_map(|m| m.animals.iter().copied())
            .filter(|a| !cancelled.contains(a))
            .collect()
    }
}

impl Area<River> {
    /// Fish of the rivers plus fish of each distinct lake they end in
    pub fn river_fish_count(&self) -> u32 {
        let mut lakes = BTreeMap::new();
        let mut count = 0;
        for river in &self.zones {
            count += river.fish_count;
            if let Some(lake) = &river.lake {
                lakes.insert(lake.id, lake.fish_count);
            }
        }
        count + lakes.values().sum::<u32>()
    }
}

impl Area<Water> {
    pub fn river_system_fish_count(&self) -> u32 {
        self.zones.iter().map(Water::fish_count).sum()
    }

    pub fn lake_count(&self) -> u32 {
        self.zones
            .iter()
            .filter(|w| matches!(w, Water::Lake(_)))
            .count() as u32
    }
}
