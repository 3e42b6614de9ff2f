//! Errors raised by the rules engine.
//!
//! Every variant is a caller-side precondition violation. The operation that
//! raised it had no effect: transitions work on copies and only hand the copy
//! back on success.

use crate::grid::Pos;
use crate::tile::TileId;
use crate::zone::ZoneId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when applying an operation to the engine
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Tile {0} is not the tile to place")]
    UnexpectedTile(TileId),

    #[error("A game needs between 2 and 5 distinct players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("Area already occupied")]
    AreaAlreadyOccupied,

    #[error("Occupant not present")]
    OccupantNotPresent,

    #[error("Tile {0} already has an occupant")]
    TileAlreadyOccupied(TileId),

    #[error("Occupant kind cannot be placed on zone {0}")]
    InvalidOccupant(ZoneId),

    #[error("Unknown zone {0}")]
    UnknownZone(ZoneId),

    #[error("Zone {0} is already part of the partition")]
    DuplicateZone(ZoneId),

    #[error("Area is not part of the partition")]
    UnknownArea,

    #[error("Unknown tile {0}")]
    UnknownTile(TileId),

    #[error("Cannot place tile at {0}")]
    InvalidPlacement(Pos),

    #[error("Tile sides are not of the same kind")]
    IncompatibleSides,

    #[error("Open connection count would become negative")]
    NegativeOpenConnections,

    #[error("Deck is empty")]
    EmptyDeck,
}
