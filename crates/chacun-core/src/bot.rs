//! AI bot players.
//!
//! - Easy: random valid actions
//! - Medium: random placements, but always occupies when it can and keeps
//!   its pawns on the board

use crate::actions::PlayerAction;
use crate::game::GameState;
use crate::player::PlayerColor;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Medium,
}

/// A bot player that can decide on actions
pub struct Bot {
    pub player: PlayerColor,
    pub difficulty: BotDifficulty,
    rng: StdRng,
}

impl Bot {
    pub fn new(player: PlayerColor, difficulty: BotDifficulty) -> Self {
        Self {
            player,
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(player: PlayerColor, difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            player,
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose an action from the valid actions, if it is this bot's turn
    pub fn choose_action(&mut self, game: &GameState) -> Option<PlayerAction> {
        if game.current_player().is_some_and(|p| p != self.player) {
            return None;
        }
        let valid_actions = game.valid_actions();
        if valid_actions.is_empty() {
            return None;
        }

        match self.difficulty {
            BotDifficulty::Easy => self.choose_easy(&valid_actions),
            BotDifficulty::Medium => self.choose_medium(&valid_actions),
        }
    }

    /// Easy: Just pick a random valid action
    fn choose_easy(&mut self, actions: &[PlayerAction]) -> Option<PlayerAction> {
        actions.choose(&mut self.rng).copied()
    }

    /// Medium: never declines an occupation, never takes a pawn back
    fn choose_medium(&mut self, actions: &[PlayerAction]) -> Option<PlayerAction> {
        let occupations: Vec<PlayerAction> = actions
            .iter()
            .copied()
            .filter(|a| matches!(a, PlayerAction::Occupy(Some(_))))
            .collect();
        if !occupations.is_empty() {
            return occupations.choose(&mut self.rng).copied();
        }

        if actions.contains(&PlayerAction::RetakePawn(None)) {
            return Some(PlayerAction::RetakePawn(None));
        }

        self.choose_easy(actions)
    }
}
