//! Scoring formulas.

/// Closed forest: 2 points per tile, 3 per mushroom group
pub fn for_closed_forest(tile_count: u32, mushroom_group_count: u32) -> u32 {
    2 * tile_count + 3 * mushroom_group_count
}

/// Closed river: 1 point per tile and per fish
pub fn for_closed_river(tile_count: u32, fish_count: u32) -> u32 {
    tile_count + fish_count
}

/// Meadow: 3 per mammoth, 2 per aurochs, 1 per deer; tigers are worth nothing
pub fn for_meadow(mammoth_count: u32, aurochs_count: u32, deer_count: u32) -> u32 {
    3 * mammoth_count + 2 * aurochs_count + deer_count
}

/// River system: 1 point per fish
pub fn for_river_system(fish_count: u32) -> u32 {
    fish_count
}

/// Logboat: 2 points per lake of the river system
pub fn for_logboat(lake_count: u32) -> u32 {
    2 * lake_count
}

/// Raft: 1 point per lake of the river system
pub fn for_raft(lake_count: u32) -> u32 {
    lake_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formulas() {
        assert_eq!(for_closed_forest(4, 2), 14);
        assert_eq!(for_closed_forest(3, 0), 6);
        assert_eq!(for_closed_river(3, 2), 5);
        assert_eq!(for_meadow(1, 2, 3), 10);
        assert_eq!(for_river_system(7), 7);
        assert_eq!(for_raft(3), 3);
        assert_eq!(for_logboat(2), 4);
    }
}
