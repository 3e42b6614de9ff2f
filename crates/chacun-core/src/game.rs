//! Core game state machine.
//!
//! `GameState` is an immutable value: every transition validates its input,
//! works on a copy and returns the new state. The receiver is left untouched
//! when a transition fails.

use crate::actions::PlayerAction;
use crate::area::Area;
use crate::board::Board;
use crate::deck::TileDecks;
use crate::error::GameError;
use crate::grid::{Pos, Rotation};
use crate::message::MessageBoard;
use crate::player::{Occupant, OccupantKind, PlayerColor};
use crate::text::TextMaker;
use crate::tile::{PlacedTile, Tile, TileKind};
use crate::zone::{tile_id, Animal, AnimalKind, AreaZone, Lake, Meadow, SpecialPower, Water, Zone};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Allowed number of players
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;

/// What the game expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// The start tile has not been placed yet
    StartGame,
    /// The current player must place `tile_to_place`
    PlaceTile,
    /// The current player may take back one of their pawns (shaman)
    RetakePawn,
    /// The current player may occupy a zone of the tile just placed
    OccupyTile,
    /// Final scores have been counted
    EndGame,
}

/// What placing a tile triggers before the occupation step
#[derive(Debug, Clone, PartialEq, Eq)]
enum PlacementEffect {
    RetakePawn,
    Logboat(Lake),
    HuntingTrap(Meadow),
    Nothing,
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Player order, the current player first
    players: Vec<PlayerColor>,
    tile_decks: TileDecks,
    tile_to_place: Option<Tile>,
    board: Board,
    next_action: GamePhase,
    message_board: MessageBoard,
}

impl GameState {
    /// A game waiting for its start tile
    pub fn initial(
        players: Vec<PlayerColor>,
        tile_decks: TileDecks,
        text_maker: Arc<dyn TextMaker>,
    ) -> Result<Self, GameError> {
        let distinct: BTreeSet<PlayerColor> = players.iter().copied().collect();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) || distinct.len() != players.len() {
            return Err(GameError::InvalidPlayerCount(players.len()));
        }
        Ok(Self {
            players,
            tile_decks,
            tile_to_place: None,
            board: Board::new(),
            next_action: GamePhase::StartGame,
            message_board: MessageBoard::new(text_maker),
        })
    }

    pub fn players(&self) -> &[PlayerColor] {
        &self.players
    }

    pub fn tile_decks(&self) -> &TileDecks {
        &self.tile_decks
    }

    pub fn tile_to_place(&self) -> Option<&Tile> {
        self.tile_to_place.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_action(&self) -> GamePhase {
        self.next_action
    }

    pub fn message_board(&self) -> &MessageBoard {
        &self.message_board
    }

    pub fn is_finished(&self) -> bool {
        self.next_action == GamePhase::EndGame
    }

    /// The player whose turn it is, if the game is running
    pub fn current_player(&self) -> Option<PlayerColor> {
        match self.next_action {
            GamePhase::StartGame | GamePhase::EndGame => None,
            _ => self.players.first().copied(),
        }
    }

    /// Occupants of `kind` that `player` still has in hand
    pub fn free_occupants_count(&self, player: PlayerColor, kind: OccupantKind) -> u32 {
        Occupant::occupants_count(kind).saturating_sub(self.board.occupant_count(player, kind))
    }

    /// Occupants the current player could put on the last placed tile
    pub fn last_tile_potential_occupants(&self) -> BTreeSet<Occupant> {
        let (Some(player), Some(tile)) = (self.current_player(), self.board.last_placed_tile()) else {
            return BTreeSet::new();
        };
        tile.potential_occupants()
            .into_iter()
            .filter(|occupant| self.free_occupants_count(player, occupant.kind) > 0)
            .filter(|occupant| {
                tile.zone_with_id(occupant.zone_id)
                    .and_then(|zone| self.area_is_occupied(&zone, occupant.kind))
                    .map_or(false, |occupied| !occupied)
            })
            .collect()
    }

    fn area_is_occupied(&self, zone: &Zone, kind: OccupantKind) -> Result<bool, GameError> {
        Ok(match (zone, kind) {
            (Zone::Forest(forest), _) => self.board.forest_area(forest)?.is_occupied(),
            (Zone::Meadow(meadow), _) => self.board.meadow_area(meadow)?.is_occupied(),
            (Zone::River(river), OccupantKind::Pawn) => self.board.river_area(river)?.is_occupied(),
            (Zone::River(river), OccupantKind::Hut) => self
                .board
                .river_system_area(&Water::River(river.clone()))?
                .is_occupied(),
            (Zone::Lake(lake), _) => self
                .board
                .river_system_area(&Water::Lake(lake.clone()))?
                .is_occupied(),
        })
    }

    pub fn occupation_is_possible(&self) -> bool {
        !self.last_tile_potential_occupants().is_empty()
    }

    fn expect_phase(&self, phase: GamePhase) -> Result<PlayerColor, GameError> {
        if self.next_action != phase {
            return Err(GameError::InvalidPhase);
        }
        self.players.first().copied().ok_or(GameError::InvalidPhase)
    }

    /// Place the start tile at the origin and draw the first tile to place
    pub fn with_starting_tile_placed(&self) -> Result<GameState, GameError> {
        if self.next_action != GamePhase::StartGame {
            return Err(GameError::InvalidPhase);
        }
        let start = self
            .tile_decks
            .top_tile(TileKind::Start)
            .ok_or(GameError::EmptyDeck)?
            .clone();
        let board = self
            .board
            .with_new_tile(PlacedTile::new(start, None, Rotation::None, Pos::ORIGIN))?;
        let decks = self.tile_decks.with_top_tile_drawn(TileKind::Start)?;
        let first = decks
            .top_tile(TileKind::Normal)
            .ok_or(GameError::EmptyDeck)?
            .clone();
        let decks = decks.with_top_tile_drawn(TileKind::Normal)?;

        info!(players = self.players.len(), "game started");
        Ok(GameState {
            tile_decks: decks,
            tile_to_place: Some(first),
            board,
            next_action: GamePhase::PlaceTile,
            ..self.clone()
        })
    }

    fn placement_effect(&self, tile: &PlacedTile, player: PlayerColor) -> PlacementEffect {
        let Some(zone) = tile.special_power_zone() else {
            return PlacementEffect::Nothing;
        };
        match (zone.special_power(), zone) {
            (Some(SpecialPower::Shaman), _)
                if self.board.occupant_count(player, OccupantKind::Pawn) > 0 =>
            {
                PlacementEffect::RetakePawn
            }
            (Some(SpecialPower::Logboat), Zone::Lake(lake)) => PlacementEffect::Logboat(lake),
            (Some(SpecialPower::HuntingTrap), Zone::Meadow(meadow)) => {
                PlacementEffect::HuntingTrap(meadow)
            }
            _ => PlacementEffect::Nothing,
        }
    }

    /// Place the tile to place, as oriented and positioned by `tile`
    pub fn with_placed_tile(&self, tile: PlacedTile) -> Result<GameState, GameError> {
        let player = self.expect_phase(GamePhase::PlaceTile)?;
        if self.tile_to_place.as_ref() != Some(&tile.tile) {
            return Err(GameError::UnexpectedTile(tile.id()));
        }
        if tile.placer != Some(player) {
            return Err(GameError::NotYourTurn);
        }

        let mut next = self.clone();
        next.board = self.board.with_new_tile(tile.clone())?;
        next.tile_to_place = None;
        debug!(tile = tile.id(), pos = %tile.pos, rotation = ?tile.rotation, ?player, "tile placed");

        match next.placement_effect(&tile, player) {
            PlacementEffect::RetakePawn => {
                next.next_action = GamePhase::RetakePawn;
                return Ok(next);
            }
            PlacementEffect::Logboat(lake) => {
                let river_system = next.board.river_system_area(&Water::Lake(lake))?.clone();
                next.message_board = next
                    .message_board
                    .with_scored_logboat(player, &river_system);
            }
            PlacementEffect::HuntingTrap(meadow) => {
                next = next.with_hunting_trap_scored(player, tile.pos, &meadow)?;
            }
            PlacementEffect::Nothing => {}
        }

        next.next_action = GamePhase::OccupyTile;
        next.with_turn_finished_if_occupation_impossible()
    }

    /// Tigers of the surrounding meadow eat deer first, the hunter then
    /// takes every remaining animal
    fn with_hunting_trap_scored(
        mut self,
        player: PlayerColor,
        pos: Pos,
        meadow: &Meadow,
    ) -> Result<GameState, GameError> {
        let adjacent = self.board.adjacent_meadow(pos, meadow)?;
        let animals = adjacent.animals(self.board.cancelled_animals());
        let tigers = count_kind(&animals, AnimalKind::Tiger);
        let eaten = deer_eaten(&animals, tigers, |_| true);
        self.board = self.board.with_more_cancelled_animals(eaten);

        self.message_board = self.message_board.with_scored_hunting_trap(
            player,
            &adjacent,
            self.board.cancelled_animals(),
        );
        let caught = adjacent.animals(self.board.cancelled_animals());
        self.board = self.board.with_more_cancelled_animals(caught);
        Ok(self)
    }

    /// Take back one of the current player's pawns, or decline with `None`
    pub fn with_occupant_removed(&self, occupant: Option<Occupant>) -> Result<GameState, GameError> {
        let player = self.expect_phase(GamePhase::RetakePawn)?;
        let mut next = self.clone();
        if let Some(occupant) = occupant {
            if occupant.kind != OccupantKind::Pawn {
                return Err(GameError::InvalidOccupant(occupant.zone_id));
            }
            let owner = self
                .board
                .tile_with_id(tile_id(occupant.zone_id))?
                .placer;
            if owner != Some(player) {
                return Err(GameError::OccupantNotPresent);
            }
            next.board = self.board.without_occupant(occupant)?;
            debug!(zone = occupant.zone_id, ?player, "pawn taken back");
        }
        next.next_action = GamePhase::OccupyTile;
        next.with_turn_finished_if_occupation_impossible()
    }

    /// Occupy a zone of the tile just placed, or decline with `None`
    pub fn with_new_occupant(&self, occupant: Option<Occupant>) -> Result<GameState, GameError> {
        let player = self.expect_phase(GamePhase::OccupyTile)?;
        let mut next = self.clone();
        if let Some(occupant) = occupant {
            if !self.last_tile_potential_occupants().contains(&occupant) {
                return Err(GameError::InvalidOccupant(occupant.zone_id));
            }
            next.board = self.board.with_occupant(occupant)?;
            debug!(zone = occupant.zone_id, kind = ?occupant.kind, ?player, "occupant placed");
        }
        next.with_turn_finished()
    }

    fn with_turn_finished_if_occupation_impossible(self) -> Result<GameState, GameError> {
        if self.occupation_is_possible() {
            Ok(self)
        } else {
            self.with_turn_finished()
        }
    }

    fn with_turn_finished(mut self) -> Result<GameState, GameError> {
        let player = self.players.first().copied().ok_or(GameError::InvalidPhase)?;
        let last_kind = self
            .board
            .last_placed_tile()
            .map(PlacedTile::kind)
            .ok_or(GameError::InvalidPhase)?;

        let forests = self.board.forests_closed_by_last_tile();
        let rivers = self.board.rivers_closed_by_last_tile();
        for forest in &forests {
            self.message_board = self.message_board.with_scored_forest(forest);
        }
        for river in &rivers {
            self.message_board = self.message_board.with_scored_river(river);
        }
        self.board = self.board.without_gatherers_or_fishers_in(&forests, &rivers)?;

        if last_kind == TileKind::Normal {
            if let Some(menhir_forest) = forests.iter().find(|f| f.has_menhir()) {
                let board = &self.board;
                let decks = self
                    .tile_decks
                    .with_top_tile_drawn_until(TileKind::Menhir, |t| board.could_place_tile(t));
                if let Some(menhir_tile) = decks.top_tile(TileKind::Menhir).cloned() {
                    info!(?player, tile = menhir_tile.id, "menhir forest closed, bonus turn");
                    self.message_board = self
                        .message_board
                        .with_closed_forest_with_menhir(player, menhir_forest);
                    self.tile_decks = decks.with_top_tile_drawn(TileKind::Menhir)?;
                    self.tile_to_place = Some(menhir_tile);
                    self.next_action = GamePhase::PlaceTile;
                    return Ok(self);
                }
                self.tile_decks = decks;
            }
        }

        let board = &self.board;
        let decks = self
            .tile_decks
            .with_top_tile_drawn_until(TileKind::Normal, |t| board.could_place_tile(t));
        match decks.top_tile(TileKind::Normal).cloned() {
            Some(tile) => {
                self.tile_decks = decks.with_top_tile_drawn(TileKind::Normal)?;
                self.tile_to_place = Some(tile);
                self.players.rotate_left(1);
                self.next_action = GamePhase::PlaceTile;
                Ok(self)
            }
            None => {
                self.tile_decks = decks;
                self.tile_to_place = None;
                self.with_final_points_counted()
            }
        }
    }

    fn with_final_points_counted(mut self) -> Result<GameState, GameError> {
        for meadow in self.board.meadow_areas().to_vec() {
            self = self.with_meadow_counted(&meadow)?;
        }
        for river_system in self.board.river_system_areas().to_vec() {
            self.message_board = self.message_board.with_scored_water(&river_system);
        }

        let totals = self.message_board.points();
        let best = self
            .players
            .iter()
            .map(|p| totals.get(p).copied().unwrap_or(0))
            .max()
            .unwrap_or(0);
        let winners: BTreeSet<PlayerColor> = self
            .players
            .iter()
            .copied()
            .filter(|p| totals.get(p).copied().unwrap_or(0) == best)
            .collect();
        info!(?winners, points = best, "game over");
        self.message_board = self.message_board.with_winners(winners, best);
        self.next_action = GamePhase::EndGame;
        Ok(self)
    }

    /// Cancels the deer eaten by the meadow's tigers, then scores the meadow
    /// and its pit trap
    fn with_meadow_counted(mut self, meadow: &Area<Meadow>) -> Result<GameState, GameError> {
        let animals = meadow.animals(self.board.cancelled_animals());
        let tigers = count_kind(&animals, AnimalKind::Tiger);
        let wild_fire = meadow.zone_with_special_power(SpecialPower::WildFire).is_some();

        let pit_trap = match meadow.zone_with_special_power(SpecialPower::PitTrap) {
            Some(trap) => {
                let pos = self.board.tile_with_id(trap.tile_id())?.pos;
                Some(self.board.adjacent_meadow(pos, trap)?)
            }
            None => None,
        };

        if !wild_fire {
            let eaten = match &pit_trap {
                Some(adjacent) => {
                    let near = adjacent.animals(self.board.cancelled_animals());
                    let mut eaten = deer_eaten(&animals, tigers, |deer| !near.contains(deer));
                    let left = tigers - eaten.len();
                    eaten.extend(deer_eaten(&animals, left, |deer| near.contains(deer)));
                    eaten
                }
                None => deer_eaten(&animals, tigers, |_| true),
            };
            self.board = self.board.with_more_cancelled_animals(eaten);
        }

        let cancelled = self.board.cancelled_animals();
        self.message_board = if wild_fire {
            self.message_board.with_scored_burnt_meadow(meadow, cancelled)
        } else {
            self.message_board.with_scored_meadow(meadow, cancelled)
        };
        if let Some(adjacent) = &pit_trap {
            self.message_board = self.message_board.with_scored_pit_trap(adjacent, cancelled);
        }
        Ok(self)
    }

    /// Every action the current state accepts
    pub fn valid_actions(&self) -> Vec<PlayerAction> {
        match self.next_action {
            GamePhase::StartGame => vec![PlayerAction::StartGame],
            GamePhase::PlaceTile => {
                let (Some(player), Some(tile)) = (self.current_player(), &self.tile_to_place) else {
                    return Vec::new();
                };
                let mut actions = Vec::new();
                for pos in self.board.insertion_positions() {
                    for rotation in Rotation::ALL {
                        let placed = PlacedTile::new(tile.clone(), Some(player), rotation, pos);
                        if self.board.can_add_tile(&placed) {
                            actions.push(PlayerAction::PlaceTile { pos, rotation });
                        }
                    }
                }
                actions
            }
            GamePhase::OccupyTile => std::iter::once(PlayerAction::Occupy(None))
                .chain(
                    self.last_tile_potential_occupants()
                        .into_iter()
                        .map(|o| PlayerAction::Occupy(Some(o))),
                )
                .collect(),
            GamePhase::RetakePawn => std::iter::once(PlayerAction::RetakePawn(None))
                .chain(
                    self.retakable_pawns()
                        .into_iter()
                        .map(|o| PlayerAction::RetakePawn(Some(o))),
                )
                .collect(),
            GamePhase::EndGame => Vec::new(),
        }
    }

    /// Pawns of the current player that are on the board
    pub fn retakable_pawns(&self) -> Vec<Occupant> {
        let Some(player) = self.current_player() else {
            return Vec::new();
        };
        self.board
            .placed_tiles()
            .filter(|t| t.placer == Some(player))
            .filter_map(|t| t.occupant)
            .filter(|o| o.kind == OccupantKind::Pawn)
            .collect()
    }

    /// Apply an action through the matching transition
    pub fn apply_action(&self, action: &PlayerAction) -> Result<GameState, GameError> {
        match action {
            PlayerAction::StartGame => self.with_starting_tile_placed(),
            PlayerAction::PlaceTile { pos, rotation } => {
                let player = self.current_player().ok_or(GameError::InvalidPhase)?;
                let tile = self.tile_to_place.clone().ok_or(GameError::InvalidPhase)?;
                self.with_placed_tile(PlacedTile::new(tile, Some(player), *rotation, *pos))
            }
            PlayerAction::Occupy(occupant) => self.with_new_occupant(*occupant),
            PlayerAction::RetakePawn(occupant) => self.with_occupant_removed(*occupant),
        }
    }

    /// Current totals, every player listed
    pub fn scores(&self) -> BTreeMap<PlayerColor, u32> {
        let totals = self.message_board.points();
        self.players
            .iter()
            .map(|&p| (p, totals.get(&p).copied().unwrap_or(0)))
            .collect()
    }

    /// Full snapshot of the state as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn count_kind(animals: &BTreeSet<Animal>, kind: AnimalKind) -> usize {
    animals.iter().filter(|a| a.kind == kind).count()
}

/// Up to `tigers` deer accepted by `filter`, lowest ids first
fn deer_eaten<F>(animals: &BTreeSet<Animal>, tigers: usize, filter: F) -> Vec<Animal>
where
    F: Fn(&Animal) -> bool,
{
    animals
        .iter()
        .filter(|a| a.kind == AnimalKind::Deer && filter(a))
        .take(tigers)
        .copied()
        .collect()
}
