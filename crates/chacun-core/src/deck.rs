//! The three tile decks: start, normal and menhir.

use crate::catalog::TileCatalog;
use crate::error::GameError;
use crate::tile::{Tile, TileKind};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Remaining tiles of each kind, top of each deck first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDecks {
    start: Vec<Tile>,
    normal: Vec<Tile>,
    menhir: Vec<Tile>,
}

impl TileDecks {
    pub fn new(start: Vec<Tile>, normal: Vec<Tile>, menhir: Vec<Tile>) -> Self {
        Self {
            start,
            normal,
            menhir,
        }
    }

    /// Decks holding the catalog's tiles in catalog order
    pub fn from_catalog(catalog: &TileCatalog) -> Self {
        Self::new(
            catalog.tiles_of_kind(TileKind::Start).cloned().collect(),
            catalog.tiles_of_kind(TileKind::Normal).cloned().collect(),
            catalog.tiles_of_kind(TileKind::Menhir).cloned().collect(),
        )
    }

    /// Decks holding the catalog's tiles, normal and menhir decks shuffled
    pub fn shuffled<R: Rng>(catalog: &TileCatalog, rng: &mut R) -> Self {
        let mut decks = Self::from_catalog(catalog);
        decks.normal.shuffle(rng);
        decks.menhir.shuffle(rng);
        decks
    }

    pub fn deck(&self, kind: TileKind) -> &[Tile] {
        match kind {
            TileKind::Start => &self.start,
            TileKind::Normal => &self.normal,
            TileKind::Menhir => &self.menhir,
        }
    }

    fn deck_mut(&mut self, kind: TileKind) -> &mut Vec<Tile> {
        match kind {
            TileKind::Start => &mut self.start,
            TileKind::Normal => &mut self.normal,
            TileKind::Menhir => &mut self.menhir,
        }
    }

    pub fn deck_size(&self, kind: TileKind) -> usize {
        self.deck(kind).len()
    }

    pub fn top_tile(&self, kind: TileKind) -> Option<&Tile> {
        self.deck(kind).first()
    }

    pub fn with_top_tile_drawn(&self, kind: TileKind) -> Result<TileDecks, GameError> {
        if self.deck(kind).is_empty() {
            return Err(GameError::EmptyDeck);
        }
        let mut decks = self.clone();
        decks.deck_mut(kind).remove(0);
        Ok(decks)
    }

    /// Decks with the tiles failing `predicate` removed from the top of the
    /// deck, until its top tile satisfies it or the deck is empty
    pub fn with_top_tile_drawn_until<P>(&self, kind: TileKind, predicate: P) -> TileDecks
    where
        P: Fn(&Tile) -> bool,
    {
        let skipped = self
            .deck(kind)
            .iter()
            .take_while(|tile| !predicate(tile))
            .count();
        if skipped > 0 {
            tracing::debug!(?kind, skipped, "discarding tiles that cannot be placed");
        }
        let mut decks = self.clone();
        decks.deck_mut(kind).drain(..skipped);
        decks
    }
}
