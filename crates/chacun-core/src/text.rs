//! Human-readable text for ledger messages.

use crate::player::PlayerColor;
use crate::zone::AnimalKind;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

/// Turns structured scoring facts into display strings
pub trait TextMaker: Debug + Send + Sync {
    fn player_name(&self, player: PlayerColor) -> String;

    fn players_scored_forest(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        mushroom_group_count: u32,
        tile_count: u32,
    ) -> String;

    fn player_closed_forest_with_menhir(&self, player: PlayerColor) -> String;

    fn players_scored_river(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        fish_count: u32,
        tile_count: u32,
    ) -> String;

    fn player_scored_hunting_trap(
        &self,
        scorer: PlayerColor,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String;

    fn player_scored_logboat(&self, scorer: PlayerColor, points: u32, lake_count: u32) -> String;

    fn players_scored_meadow(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String;

    fn players_scored_river_system(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        fish_count: u32,
    ) -> String;

    fn players_scored_pit_trap(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String;

    fn players_scored_raft(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        lake_count: u32,
    ) -> String;

    fn players_won(&self, winners: &BTreeSet<PlayerColor>, points: u32) -> String;
}

/// Plain English messages
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishTextMaker;

fn plural(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

impl EnglishTextMaker {
    fn names(&self, players: &BTreeSet<PlayerColor>) -> String {
        let names: Vec<String> = players.iter().map(|&p| self.player_name(p)).collect();
        match names.as_slice() {
            [] => String::from("Nobody"),
            [only] => only.clone(),
            [init @ .., last] => format!("{} and {}", init.join(", "), last),
        }
    }

    fn verb(players: &BTreeSet<PlayerColor>) -> &'static str {
        if players.len() == 1 {
            "has"
        } else {
            "have"
        }
    }

    fn animals(animals: &BTreeMap<AnimalKind, u32>) -> String {
        let parts: Vec<String> = animals
            .iter()
            .filter(|(kind, _)| **kind != AnimalKind::Tiger)
            .map(|(kind, &count)| match kind {
                AnimalKind::Mammoth => plural(count, "mammoth", "mammoths"),
                AnimalKind::Aurochs => plural(count, "aurochs", "aurochs"),
                AnimalKind::Deer => plural(count, "deer", "deer"),
                AnimalKind::Tiger => plural(count, "tiger", "tigers"),
            })
            .collect();
        if parts.is_empty() {
            String::from("no animals")
        } else {
            parts.join(", ")
        }
    }
}

impl TextMaker for EnglishTextMaker {
    fn player_name(&self, player: PlayerColor) -> String {
        player.to_string()
    }

    fn players_scored_forest(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        mushroom_group_count: u32,
        tile_count: u32,
    ) -> String {
        let mut text = format!(
            "{} {} scored {} for a forest of {}",
            self.names(scorers),
            Self::verb(scorers),
            plural(points, "point", "points"),
            plural(tile_count, "tile", "tiles"),
        );
        if mushroom_group_count > 0 {
            text.push_str(&format!(
                " with {}",
                plural(mushroom_group_count, "mushroom group", "mushroom groups")
            ));
        }
        text
    }

    fn player_closed_forest_with_menhir(&self, player: PlayerColor) -> String {
        format!(
            "{} closed a forest with a menhir and may place a menhir tile",
            self.player_name(player)
        )
    }

    fn players_scored_river(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        fish_count: u32,
        tile_count: u32,
    ) -> String {
        format!(
            "{} {} scored {} for a river of {} with {}",
            self.names(scorers),
            Self::verb(scorers),
            plural(points, "point", "points"),
            plural(tile_count, "tile", "tiles"),
            plural(fish_count, "fish", "fish"),
        )
    }

    fn player_scored_hunting_trap(
        &self,
        scorer: PlayerColor,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String {
        format!(
            "{} scored {} with a hunting trap catching {}",
            self.player_name(scorer),
            plural(points, "point", "points"),
            Self::animals(animals),
        )
    }

    fn player_scored_logboat(&self, scorer: PlayerColor, points: u32, lake_count: u32) -> String {
        format!(
            "{} scored {} with a logboat reaching {}",
            self.player_name(scorer),
            plural(points, "point", "points"),
            plural(lake_count, "lake", "lakes"),
        )
    }

    fn players_scored_meadow(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String {
        format!(
            "{} {} scored {} for a meadow with {}",
            self.names(scorers),
            Self::verb(scorers),
            plural(points, "point", "points"),
            Self::animals(animals),
        )
    }

    fn players_scored_river_system(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        fish_count: u32,
    ) -> String {
        format!(
            "{} {} scored {} for a river system with {}",
            self.names(scorers),
            Self::verb(scorers),
            plural(points, "point", "points"),
            plural(fish_count, "fish", "fish"),
        )
    }

    fn players_scored_pit_trap(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        animals: &BTreeMap<AnimalKind, u32>,
    ) -> String {
        format!(
            "{} {} scored {} with a pit trap catching {}",
            self.names(scorers),
            Self::verb(scorers),
            plural(points, "point", "points"),
            Self::animals(animals),
        )
    }

    fn players_scored_raft(
        &self,
        scorers: &BTreeSet<PlayerColor>,
        points: u32,
        lake_count: u32,
    ) -> String {
        format!(
            "{} {} scored {} with a raft crossing {}",
            self.names(scorers),
            Self::verb(scorers),
            plural(points, "point", "points"),
            plural(lake_count, "lake", "lakes"),
        )
    }

    fn players_won(&self, winners: &BTreeSet<PlayerColor>, points: u32) -> String {
        let verb = if winners.len() == 1 { "wins" } else { "win" };
        format!(
            "{} {} with {}",
            self.names(winners),
            verb,
            plural(points, "point", "points")
        )
    }
}
