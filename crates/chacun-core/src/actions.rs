//! Player actions and their compact text encoding.
//!
//! Each action is encoded relative to the state it applies to, so a peer
//! holding the same state can rebuild it from a one or two character token.
//! Tokens use the base32 alphabet `A-Z2-7`, five bits per character.

use crate::error::GameError;
use crate::game::{GamePhase, GameState};
use crate::grid::{Pos, Rotation};
use crate::player::{Occupant, OccupantKind};
use crate::zone::{local_id, MAX_LOCAL_ZONES};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All possible actions a player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Place the start tile and draw the first tile
    StartGame,
    /// Place the tile to place at `pos`, turned by `rotation`
    PlaceTile { pos: Pos, rotation: Rotation },
    /// Occupy a zone of the last placed tile, or decline
    Occupy(Option<Occupant>),
    /// Take back a pawn after placing a shaman, or decline
    RetakePawn(Option<Occupant>),
}

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const BITS_PER_CHAR: u32 = 5;
const CHAR_MASK: u32 = (1 << BITS_PER_CHAR) - 1;
/// Value standing for "no occupant"
const NONE: u32 = 0b11111;
/// Insertion positions a two character placement token can address
const MAX_POSITIONS: u32 = 1 << 8;

/// Errors raised while encoding or decoding an action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("Expected {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Index {0} does not designate anything in this state")]
    IndexOutOfRange(u32),

    #[error("Action cannot be encoded in the current state")]
    NotEncodable,

    #[error(transparent)]
    Game(#[from] GameError),
}

fn encode_bits(value: u32, chars: usize) -> String {
    (0..chars)
        .rev()
        .map(|i| ALPHABET[((value >> (i as u32 * BITS_PER_CHAR)) & CHAR_MASK) as usize] as char)
        .collect()
}

fn decode_bits(token: &str, chars: usize) -> Result<u32, CodecError> {
    let actual = token.chars().count();
    if actual != chars {
        return Err(CodecError::InvalidLength {
            expected: chars,
            actual,
        });
    }
    token.chars().try_fold(0, |acc, c| {
        let digit = ALPHABET
            .iter()
            .position(|&a| a as char == c)
            .ok_or(CodecError::InvalidCharacter(c))?;
        Ok((acc << BITS_PER_CHAR) | digit as u32)
    })
}

fn rotation_from_index(index: u32) -> Rotation {
    Rotation::ALL[(index & 0b11) as usize]
}

fn rotation_index(rotation: Rotation) -> u32 {
    rotation.quarter_turns_cw()
}

fn placement_value(index: u32, rotation: Rotation) -> Result<u32, CodecError> {
    if index >= MAX_POSITIONS {
        return Err(CodecError::NotEncodable);
    }
    Ok((index << 2) | rotation_index(rotation))
}

fn kind_index(kind: OccupantKind) -> u32 {
    match kind {
        OccupantKind::Pawn => 0,
        OccupantKind::Hut => 1,
    }
}

/// Encodes and decodes actions relative to a game state
pub struct ActionCodec;

impl ActionCodec {
    /// Token for `action` in `state`
    pub fn encode(state: &GameState, action: &PlayerAction) -> Result<String, CodecError> {
        match (state.next_action(), action) {
            (GamePhase::StartGame, PlayerAction::StartGame) => Ok(String::new()),
            (GamePhase::PlaceTile, PlayerAction::PlaceTile { pos, rotation }) => {
                let index = state
                    .board()
                    .insertion_positions()
                    .iter()
                    .position(|p| p == pos)
                    .ok_or(CodecError::NotEncodable)? as u32;
                Ok(encode_bits(placement_value(index, *rotation)?, 2))
            }
            (GamePhase::OccupyTile, PlayerAction::Occupy(occupant)) => {
                let value = match occupant {
                    Some(o) => (kind_index(o.kind) << 4) | local_id(o.zone_id),
                    None => NONE,
                };
                Ok(encode_bits(value, 1))
            }
            (GamePhase::RetakePawn, PlayerAction::RetakePawn(occupant)) => {
                let value = match occupant {
                    Some(o) => Self::sorted_pawns(state)
                        .iter()
                        .position(|p| p == o)
                        .ok_or(CodecError::NotEncodable)? as u32,
                    None => NONE,
                };
                Ok(encode_bits(value, 1))
            }
            _ => Err(CodecError::NotEncodable),
        }
    }

    /// Rebuild the action a token stands for in `state`
    pub fn decode(state: &GameState, token: &str) -> Result<PlayerAction, CodecError> {
        match state.next_action() {
            GamePhase::StartGame => {
                decode_bits(token, 0)?;
                Ok(PlayerAction::StartGame)
            }
            GamePhase::PlaceTile => {
                let value = decode_bits(token, 2)?;
                let index = value >> 2;
                let pos = state
                    .board()
                    .insertion_positions()
                    .into_iter()
                    .nth(index as usize)
                    .ok_or(CodecError::IndexOutOfRange(index))?;
                Ok(PlayerAction::PlaceTile {
                    pos,
                    rotation: rotation_from_index(value),
                })
            }
            GamePhase::OccupyTile => {
                let value = decode_bits(token, 1)?;
                if value == NONE {
                    return Ok(PlayerAction::Occupy(None));
                }
                let local = value & 0b1111;
                let tile = state
                    .board()
                    .last_placed_tile()
                    .ok_or(CodecError::IndexOutOfRange(value))?;
                if local >= MAX_LOCAL_ZONES {
                    return Err(CodecError::IndexOutOfRange(value));
                }
                let kind = if value >> 4 == 0 {
                    OccupantKind::Pawn
                } else {
                    OccupantKind::Hut
                };
                let zone_id = tile.id() * MAX_LOCAL_ZONES + local;
                Ok(PlayerAction::Occupy(Some(Occupant::new(kind, zone_id))))
            }
            GamePhase::RetakePawn => {
                let value = decode_bits(token, 1)?;
                if value == NONE {
                    return Ok(PlayerAction::RetakePawn(None));
                }
                let pawn = Self::sorted_pawns(state)
                    .get(value as usize)
                    .copied()
                    .ok_or(CodecError::IndexOutOfRange(value))?;
                Ok(PlayerAction::RetakePawn(Some(pawn)))
            }
            GamePhase::EndGame => Err(CodecError::NotEncodable),
        }
    }

    /// Decode `token` and apply it to `state`
    pub fn decode_and_apply(state: &GameState, token: &str) -> Result<GameState, CodecError> {
        let action = Self::decode(state, token)?;
        Ok(state.apply_action(&action)?)
    }

    /// Every pawn on the board, ordered by zone id
    fn sorted_pawns(state: &GameState) -> Vec<Occupant> {
        let mut pawns: Vec<Occupant> = state
            .board()
            .occupants()
            .into_iter()
            .filter(|o| o.kind == OccupantKind::Pawn)
            .collect();
        pawns.sort_by_key(|o| o.zone_id);
        pawns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TileCatalog;
    use crate::deck::TileDecks;
    use crate::player::PlayerColor;
    use crate::text::EnglishTextMaker;
    use std::sync::Arc;

    fn demo_game() -> GameState {
        let catalog = TileCatalog::demo().unwrap();
        let decks = TileDecks::from_catalog(&catalog);
        GameState::initial(
            vec![PlayerColor::Red, PlayerColor::Blue],
            decks,
            Arc::new(EnglishTextMaker),
        )
        .unwrap()
    }

    #[test]
    fn test_bits_round_trip() {
        assert_eq!(encode_bits(0, 2), "AA");
        assert_eq!(encode_bits(31, 1), "7");
        assert_eq!(encode_bits(33, 2), "BB");
        assert_eq!(decode_bits("BB", 2), Ok(33));
        assert_eq!(
            decode_bits("B", 2),
            Err(CodecError::InvalidLength {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(decode_bits("a", 1), Err(CodecError::InvalidCharacter('a')));
        assert_eq!(decode_bits("1", 1), Err(CodecError::InvalidCharacter('1')));
    }

    #[test]
    fn test_placement_index_must_fit_in_token() {
        assert_eq!(placement_value(255, Rotation::Left), Ok(0b11111111_11));
        assert_eq!(
            placement_value(MAX_POSITIONS, Rotation::None),
            Err(CodecError::NotEncodable)
        );
    }

    #[test]
    fn test_every_valid_action_survives_encoding() {
        let state = demo_game();
        let state = ActionCodec::decode_and_apply(&state, "").unwrap();
        for action in state.valid_actions() {
            let token = ActionCodec::encode(&state, &action).unwrap();
            assert_eq!(token.len(), 2);
            assert_eq!(ActionCodec::decode(&state, &token), Ok(action));
        }
    }

    #[test]
    fn test_decode_and_apply_is_deterministic() {
        let state = ActionCodec::decode_and_apply(&demo_game(), "").unwrap();
        let action = state.valid_actions()[0];
        let token = ActionCodec::encode(&state, &action).unwrap();

        let a = ActionCodec::decode_and_apply(&state, &token).unwrap();
        let b = ActionCodec::decode_and_apply(&state, &token).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, state.apply_action(&action).unwrap());

        let decline = ActionCodec::encode(&a, &PlayerAction::Occupy(None));
        if a.next_action() == GamePhase::OccupyTile {
            assert_eq!(decline, Ok(String::from("7")));
        }
    }

    #[test]
    fn test_bad_tokens_are_rejected() {
        let state = ActionCodec::decode_and_apply(&demo_game(), "").unwrap();
        assert_eq!(
            ActionCodec::decode_and_apply(&state, "7777"),
            Err(CodecError::InvalidLength {
                expected: 2,
                actual: 4
            })
        );
        // Index 255 is far beyond the start tile's four neighbors
        assert_eq!(
            ActionCodec::decode(&state, "77"),
            Err(CodecError::IndexOutOfRange(255))
        );
        assert_eq!(
            ActionCodec::encode(&state, &PlayerAction::StartGame),
            Err(CodecError::NotEncodable)
        );
    }

    #[test]
    fn test_illegal_placement_surfaces_game_error() {
        let state = ActionCodec::decode_and_apply(&demo_game(), "").unwrap();
        let illegal = state
            .board()
            .insertion_positions()
            .into_iter()
            .flat_map(|pos| Rotation::ALL.map(|rotation| PlayerAction::PlaceTile { pos, rotation }))
            .find(|action| !state.valid_actions().contains(action));
        if let Some(action) = illegal {
            let token = ActionCodec::encode(&state, &action).unwrap();
            assert!(matches!(
                ActionCodec::decode_and_apply(&state, &token),
                Err(CodecError::Game(GameError::InvalidPlacement(_)))
            ));
        }
    }
}
