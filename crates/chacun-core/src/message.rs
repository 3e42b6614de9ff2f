//! The scoring ledger.
//!
//! Every scoring event appends one [`Message`]; the leaderboard is always
//! recomputed from the whole list. Message text comes from a [`TextMaker`],
//! the engine itself never looks at it.

use crate::area::Area;
use crate::player::PlayerColor;
use crate::points;
use crate::text::{EnglishTextMaker, TextMaker};
use crate::tile::TileId;
use crate::zone::{Animal, AnimalKind, Forest, Meadow, River, SpecialPower, Water};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// One ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub points: u32,
    pub scorers: BTreeSet<PlayerColor>,
    pub tile_ids: BTreeSet<TileId>,
}

impl Message {
    pub fn new(
        text: String,
        points: u32,
        scorers: BTreeSet<PlayerColor>,
        tile_ids: BTreeSet<TileId>,
    ) -> Self {
        Self {
            text,
            points,
            scorers,
            tile_ids,
        }
    }
}

fn default_text_maker() -> Arc<dyn TextMaker> {
    Arc::new(EnglishTextMaker)
}

/// Append-only list of scoring messages
#[derive(Clone, Serialize, Deserialize)]
pub struct MessageBoard {
    #[serde(skip, default = "default_text_maker")]
    text_maker: Arc<dyn TextMaker>,
    messages: Vec<Message>,
}

impl fmt::Debug for MessageBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBoard")
            .field("messages", &self.messages)
            .finish()
    }
}

impl PartialEq for MessageBoard {
    fn eq(&self, other: &Self) -> bool {
        self.messages == other.messages
    }
}

impl Eq for MessageBoard {}

impl Default for MessageBoard {
    fn default() -> Self {
        Self::new(default_text_maker())
    }
}

/// Count of each non-cancelled animal kind, kinds absent from the set left out
pub fn animal_counts(animals: &BTreeSet<Animal>) -> BTreeMap<AnimalKind, u32> {
    let mut counts = BTreeMap::new();
    for animal in animals {
        *counts.entry(animal.kind).or_insert(0) += 1;
    }
    counts
}

fn meadow_points(counts: &BTreeMap<AnimalKind, u32>) -> u32 {
    let count = |kind| counts.get(&kind).copied().unwrap_or(0);
    points::for_meadow(
        count(AnimalKind::Mammoth),
        count(AnimalKind::Aurochs),
        count(AnimalKind::Deer),
    )
}

impl MessageBoard {
    pub fn new(text_maker: Arc<dyn TextMaker>) -> Self {
        Self {
            text_maker,
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn text_maker(&self) -> &dyn TextMaker {
        self.text_maker.as_ref()
    }

    /// Total points of every player that scored at least once
    pub fn points(&self) -> BTreeMap<PlayerColor, u32> {
        let mut totals = BTreeMap::new();
        for message in &self.messages {
            for &scorer in &message.scorers {
                *totals.entry(scorer).or_insert(0) += message.points;
            }
        }
        totals
    }

    fn with_message(
        &self,
        text: String,
        points: u32,
        scorers: BTreeSet<PlayerColor>,
        tile_ids: BTreeSet<TileId>,
    ) -> MessageBoard {
        let mut board = self.clone();
        board
            .messages
            .push(Message::new(text, points, scorers, tile_ids));
        board
    }

    pub fn with_scored_forest(&self, forest: &Area<Forest>) -> MessageBoard {
        if !forest.is_occupied() {
            return self.clone();
        }
        let tile_count = forest.tile_ids().len() as u32;
        let mushrooms = forest.mushroom_group_count();
        let points = points::for_closed_forest(tile_count, mushrooms);
        let scorers = forest.majority_occupants();
        let text = self
            .text_maker
            .players_scored_forest(&scorers, points, mushrooms, tile_count);
        self.with_message(text, points, scorers, forest.tile_ids())
    }

    /// Records the closing of a menhir forest granting `player` a bonus turn
    pub fn with_closed_forest_with_menhir(
        &self,
        player: PlayerColor,
        forest: &Area<Forest>,
    ) -> MessageBoard {
        let text = self.text_maker.player_closed_forest_with_menhir(player);
        self.with_message(text, 0, BTreeSet::new(), forest.tile_ids())
    }

    pub fn with_scored_river(&self, river: &Area<River>) -> MessageBoard {
        if !river.is_occupied() {
            return self.clone();
        }
        let tile_count = river.tile_ids().len() as u32;
        let fish = river.river_fish_count();
        let points = points::for_closed_river(tile_count, fish);
        let scorers = river.majority_occupants();
        let text = self
            .text_maker
            .players_scored_river(&scorers, points, fish, tile_count);
        self.with_message(text, points, scorers, river.tile_ids())
    }

    /// Animals of `adjacent_meadow` not in `cancelled` score for `scorer`
    pub fn with_scored_hunting_trap(
        &self,
        scorer: PlayerColor,
        adjacent_meadow: &Area<Meadow>,
        cancelled: &BTreeSet<Animal>,
    ) -> MessageBoard {
        let counts = animal_counts(&adjacent_meadow.animals(cancelled));
        let points = meadow_points(&counts);
        if points == 0 {
            return self.clone();
        }
        let text = self
            .text_maker
            .player_scored_hunting_trap(scorer, points, &counts);
        self.with_message(
            text,
            points,
            BTreeSet::from([scorer]),
            adjacent_meadow.tile_ids(),
        )
    }

    pub fn with_scored_logboat(&self, scorer: PlayerColor, river_system: &Area<Water>) -> MessageBoard {
        let lakes = river_system.lake_count();
        let points = points::for_logboat(lakes);
        let text = self.text_maker.player_scored_logboat(scorer, points, lakes);
        self.with_message(
            text,
            points,
            BTreeSet::from([scorer]),
            river_system.tile_ids(),
        )
    }

    pub fn with_scored_meadow(&self, meadow: &Area<Meadow>, cancelled: &BTreeSet<Animal>) -> MessageBoard {
        self.scored_meadow(meadow, cancelled, false)
    }

    /// Like [`Self::with_scored_meadow`] but recorded even when worth nothing
    pub fn with_scored_burnt_meadow(
        &self,
        meadow: &Area<Meadow>,
        cancelled: &BTreeSet<Animal>,
    ) -> MessageBoard {
        self.scored_meadow(meadow, cancelled, true)
    }

    fn scored_meadow(
        &self,
        meadow: &Area<Meadow>,
        cancelled: &BTreeSet<Animal>,
        keep_empty: bool,
    ) -> MessageBoard {
        if !meadow.is_occupied() {
            return self.clone();
        }
        let counts = animal_counts(&meadow.animals(cancelled));
        let points = meadow_points(&counts);
        if points == 0 && !keep_empty {
            return self.clone();
        }
        let scorers = meadow.majority_occupants();
        let text = self
            .text_maker
            .players_scored_meadow(&scorers, points, &counts);
        self.with_message(text, points, scorers, meadow.tile_ids())
    }

    pub fn with_scored_river_system(&self, river_system: &Area<Water>) -> MessageBoard {
        if !river_system.is_occupied() {
            return self.clone();
        }
        let fish = river_system.river_system_fish_count();
        let points = points::for_river_system(fish);
        if points == 0 {
            return self.clone();
        }
        let scorers = river_system.majority_occupants();
        let text = self
            .text_maker
            .players_scored_river_system(&scorers, points, fish);
        self.with_message(text, points, scorers, river_system.tile_ids())
    }

    /// Scores the animals of the meadow surrounding a pit trap for the
    /// majority occupants of that neighbourhood
    pub fn with_scored_pit_trap(
        &self,
        adjacent_meadow: &Area<Meadow>,
        cancelled: &BTreeSet<Animal>,
    ) -> MessageBoard {
        if !adjacent_meadow.is_occupied() {
            return self.clone();
        }
        let counts = animal_counts(&adjacent_meadow.animals(cancelled));
        let points = meadow_points(&counts);
        if points == 0 {
            return self.clone();
        }
        let scorers = adjacent_meadow.majority_occupants();
        let text = self
            .text_maker
            .players_scored_pit_trap(&scorers, points, &counts);
        self.with_message(text, points, scorers, adjacent_meadow.tile_ids())
    }

    pub fn with_scored_raft(&self, river_system: &Area<Water>) -> MessageBoard {
        if !river_system.is_occupied() {
            return self.clone();
        }
        let lakes = river_system.lake_count();
        let points = points::for_raft(lakes);
        if points == 0 {
            return self.clone();
        }
        let scorers = river_system.majority_occupants();
        let text = self.text_maker.players_scored_raft(&scorers, points, lakes);
        self.with_message(text, points, scorers, river_system.tile_ids())
    }

    /// Scores a water area as a raft system or a plain river system
    pub fn with_scored_water(&self, river_system: &Area<Water>) -> MessageBoard {
        if river_system
            .zone_with_special_power(SpecialPower::Raft)
            .is_some()
        {
            self.with_scored_raft(river_system)
        } else {
            self.with_scored_river_system(river_system)
        }
    }

    pub fn with_winners(&self, winners: BTreeSet<PlayerColor>, points: u32) -> MessageBoard {
        let text = self.text_maker.players_won(&winners, points);
        self.with_message(text, 0, winners, BTreeSet::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{forest, meadow};
    use crate::zone::{ForestKind, Lake};
    use pretty_assertions::assert_eq;
    use PlayerColor::*;

    fn board() -> MessageBoard {
        MessageBoard::default()
    }

    #[test]
    fn test_forest_credits_majority() {
        let area = Area::new(
            [
                forest(560, ForestKind::Plain),
                forest(200, ForestKind::Plain),
                forest(300, ForestKind::Plain),
            ],
            vec![Red],
            0,
        );
        let board = board().with_scored_forest(&area);
        assert_eq!(board.messages().len(), 1);
        assert_eq!(board.messages()[0].points, 6);
        assert_eq!(board.points(), BTreeMap::from([(Red, 6)]));
        assert_eq!(board.messages()[0].tile_ids, BTreeSet::from([20, 30, 56]));
    }

    #[test]
    fn test_unoccupied_areas_score_nothing() {
        let forest_area = Area::singleton(forest(10, ForestKind::WithMushrooms), 0);
        let meadow_area = Area::singleton(meadow(11, &[AnimalKind::Mammoth], None), 0);
        let board = board()
            .with_scored_forest(&forest_area)
            .with_scored_meadow(&meadow_area, &BTreeSet::new());
        assert!(board.messages().is_empty());
        assert!(board.points().is_empty());
    }

    #[test]
    fn test_ties_get_full_credit() {
        let area = Area::new(
            [meadow(11, &[AnimalKind::Mammoth, AnimalKind::Deer], None)],
            vec![Red, Blue, Blue, Red, Green],
            2,
        );
        let board = board().with_scored_meadow(&area, &BTreeSet::new());
        assert_eq!(board.points(), BTreeMap::from([(Red, 4), (Blue, 4)]));
    }

    #[test]
    fn test_cancelled_animals_do_not_score() {
        let zone = meadow(11, &[AnimalKind::Deer, AnimalKind::Tiger], None);
        let deer = zone.animals[0];
        let area = Area::new([zone], [Red], 1);

        let empty = board().with_scored_meadow(&area, &BTreeSet::from([deer]));
        assert!(empty.messages().is_empty());

        let burnt = board().with_scored_burnt_meadow(&area, &BTreeSet::from([deer]));
        assert_eq!(burnt.messages().len(), 1);
        assert_eq!(burnt.messages()[0].points, 0);
    }

    #[test]
    fn test_water_scoring() {
        let lake = Lake {
            id: 18,
            fish_count: 2,
            special_power: Some(SpecialPower::Raft),
        };
        let river = crate::zone::River {
            id: 11,
            fish_count: 3,
            lake: Some(lake.clone()),
        };
        let area = Area::new(
            [Water::from(lake), Water::from(river)],
            vec![Yellow],
            1,
        );
        let board = board().with_scored_water(&area).with_scored_river_system(&area);
        assert_eq!(board.messages()[0].points, 1);
        assert_eq!(board.messages()[1].points, 5);
        assert_eq!(board.points(), BTreeMap::from([(Yellow, 6)]));

        let logboat = MessageBoard::default().with_scored_logboat(Red, &area.without_occupants());
        assert_eq!(logboat.points(), BTreeMap::from([(Red, 2)]));
    }

    #[test]
    fn test_bookkeeping_messages_have_no_points() {
        let area = Area::singleton(forest(10, ForestKind::WithMenhir), 0);
        let board = board()
            .with_closed_forest_with_menhir(Purple, &area)
            .with_winners(BTreeSet::from([Purple, Red]), 0);
        assert_eq!(board.messages().len(), 2);
        assert!(board.messages()[0].scorers.is_empty());
        assert_eq!(board.points(), BTreeMap::from([(Red, 0), (Purple, 0)]));
    }
}
