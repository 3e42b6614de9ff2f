//! ChaCuN - a prehistoric tile-laying game engine
//!
//! This crate provides the rules of the game, including:
//! - Square grid coordinates and tile rotations
//! - Zones, tiles and the areas they form once connected on the board
//! - The board with its zone partitions and occupants
//! - Scoring and the ledger of scoring messages
//! - The turn state machine with full rule enforcement
//!
//! # Architecture
//!
//! Every value is immutable. Transitions such as
//! [`GameState::with_placed_tile`] return a new state and leave the old one
//! untouched, so a caller can keep history, replay actions or simulate moves
//! freely. Only [`partitions::ZonePartitionsBuilder`] mutates, while a new
//! board is being assembled.
//!
//! # Modules
//!
//! - [`grid`]: Directions, rotations and positions
//! - [`zone`], [`tile`]: Catalog data
//! - [`area`], [`partition`], [`partitions`]: Connected zones
//! - [`board`]: Tiles on the grid
//! - [`points`], [`message`], [`text`]: Scoring
//! - [`game`], [`actions`], [`bot`]: Turn automaton, action encoding and bots
//! - [`catalog`], [`deck`]: Tile catalog loading and decks

pub mod actions;
pub mod area;
pub mod board;
pub mod bot;
pub mod catalog;
pub mod deck;
pub mod error;
pub mod game;
pub mod grid;
pub mod message;
pub mod partition;
pub mod partitions;
pub mod player;
pub mod points;
pub mod text;
pub mod tile;
pub mod zone;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use actions::{ActionCodec, CodecError, PlayerAction};
pub use area::Area;
pub use board::Board;
pub use bot::{Bot, BotDifficulty};
pub use catalog::{CatalogError, TileCatalog};
pub use deck::TileDecks;
pub use error::GameError;
pub use game::{GamePhase, GameState};
pub use grid::{Direction, Pos, Rotation};
pub use message::{Message, MessageBoard};
pub use player::{Occupant, OccupantKind, PlayerColor};
pub use text::{EnglishTextMaker, TextMaker};
pub use tile::{PlacedTile, Tile, TileId, TileKind, TileSide};
pub use zone::{Animal, AnimalKind, Forest, ForestKind, Lake, Meadow, River, SpecialPower, Water, Zone, ZoneId};
