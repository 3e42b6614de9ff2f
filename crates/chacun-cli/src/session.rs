//! A game session played between bots.

use chacun_core::{
    ActionCodec, Bot, BotDifficulty, CatalogError, CodecError, EnglishTextMaker, GameError,
    GameState, Message, PlayerColor, TileCatalog, TileDecks,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Upper bound on the number of actions in a single game
const MAX_ACTIONS: usize = 1000;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("No bot can act for {0}")]
    Stuck(String),

    #[error("Game did not end within {0} actions")]
    TooLong(usize),
}

/// Settings for a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub catalog: Option<String>,
    pub players: usize,
    pub seed: u64,
    pub difficulty: BotDifficulty,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub seed: u64,
    pub tokens: Vec<String>,
    pub scores: BTreeMap<PlayerColor, u32>,
    pub messages: Vec<Message>,
}

pub struct GameSession {
    seed: u64,
    game: GameState,
    bots: Vec<Bot>,
    tokens: Vec<String>,
}

impl GameSession {
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        let catalog = match &config.catalog {
            Some(path) => TileCatalog::from_path(path)?,
            None => TileCatalog::demo()?,
        };
        info!("Loaded {} tiles", catalog.len());

        let mut rng = StdRng::seed_from_u64(config.seed);
        let decks = TileDecks::shuffled(&catalog, &mut rng);
        let players: Vec<PlayerColor> = PlayerColor::ALL
            .iter()
            .copied()
            .take(config.players)
            .collect();
        let game = GameState::initial(players.clone(), decks, Arc::new(EnglishTextMaker))?;

        let bots = players
            .iter()
            .enumerate()
            .map(|(i, &p)| Bot::with_seed(p, config.difficulty, config.seed.wrapping_add(i as u64 + 1)))
            .collect();

        Ok(Self {
            seed: config.seed,
            game,
            bots,
            tokens: Vec::new(),
        })
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Let the bot whose turn it is act once
    pub fn step(&mut self) -> Result<(), SessionError> {
        let game = &self.game;
        let action = self
            .bots
            .iter_mut()
            .find_map(|bot| bot.choose_action(game))
            .ok_or_else(|| {
                let who = game
                    .current_player()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "nobody".into());
                SessionError::Stuck(who)
            })?;

        let token = ActionCodec::encode(game, &action)?;
        debug!(?action, %token, "Applying action");
        self.game = ActionCodec::decode_and_apply(game, &token)?;
        self.tokens.push(token);
        Ok(())
    }

    /// Play until the game ends
    pub fn run(mut self) -> Result<SessionReport, SessionError> {
        while !self.game.is_finished() {
            if self.tokens.len() >= MAX_ACTIONS {
                return Err(SessionError::TooLong(MAX_ACTIONS));
            }
            self.step()?;
        }
        info!("Game finished after {} actions", self.tokens.len());

        Ok(SessionReport {
            seed: self.seed,
            scores: self.game.scores(),
            messages: self.game.message_board().messages().to_vec(),
            tokens: self.tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(players: usize, seed: u64) -> SessionConfig {
        SessionConfig {
            catalog: None,
            players,
            seed,
            difficulty: BotDifficulty::Medium,
        }
    }

    #[test]
    fn test_session_plays_to_the_end() {
        let report = GameSession::new(&config(3, 42)).unwrap().run().unwrap();
        assert_eq!(report.scores.len(), 3);
        assert!(!report.tokens.is_empty());
        // The last message names the winners
        let last = report.messages.last().unwrap();
        let best = report.scores.values().copied().max().unwrap();
        assert!(last.scorers.iter().all(|p| report.scores[p] == best));
    }

    #[test]
    fn test_same_seed_same_report() {
        let a = GameSession::new(&config(2, 9)).unwrap().run().unwrap();
        let b = GameSession::new(&config(2, 9)).unwrap().run().unwrap();
        assert_eq!(a.tokens, b.tokens);
        assert_eq!(a.scores, b.scores);
    }

    #[test]
    fn test_bad_player_count() {
        assert!(matches!(
            GameSession::new(&config(1, 0)),
            Err(SessionError::Game(_))
        ));
    }

    #[test]
    fn test_missing_catalog() {
        let mut config = config(2, 0);
        config.catalog = Some("/nonexistent/tiles.json".into());
        assert!(matches!(
            GameSession::new(&config),
            Err(SessionError::Catalog(CatalogError::Io(_)))
        ));
    }
}
