//! Turn engine: owns both seas, the computer's targeting, and the game state machine.
//!
//! `PlacingShips -> PlayerTurn <-> AiTurn -> GameOver`. Out-of-turn calls are
//! rejected with `IllegalStateTransition` and change nothing.

use alloc::boxed::Box;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{
    ai::{Targeting, TargetingAi},
    board::Sea,
    common::{Action, Coord, GameError, PlacementIssue, ShotResult, ShotState},
    config::{ship_type_for_length, GameConfig},
    events::{GameEvent, GameObserver, ObserverId, Observers, Side},
    placement,
    ship::{Orientation, ShipId, ShipType},
};

/// Current phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum GameState {
    PlacingShips,
    PlayerTurn,
    AiTurn,
    GameOver { player_wins: bool },
}

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Turn {
    Player,
    Computer,
}

/// One game of human versus computer.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    player: Sea,
    opponent: Sea,
    targeting: Option<Box<dyn Targeting>>,
    rng: SmallRng,
    observers: Observers,
}

impl GameEngine {
    /// Create an engine in `PlacingShips` with empty seas.
    pub fn new(config: GameConfig, rng: SmallRng) -> Result<Self, GameError> {
        config.validate()?;
        let size = config.grid_size;
        Ok(Self {
            config,
            state: GameState::PlacingShips,
            player: Sea::new(size),
            opponent: Sea::new(size),
            targeting: None,
            rng,
            observers: Observers::default(),
        })
    }

    /// Create an engine whose randomness is fixed by `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Whose move it is, or `None` outside of play.
    pub fn turn(&self) -> Option<Turn> {
        match self.state {
            GameState::PlayerTurn => Some(Turn::Player),
            GameState::AiTurn => Some(Turn::Computer),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::GameOver { .. })
    }

    /// `Some(player_wins)` once the game is over.
    pub fn outcome(&self) -> Option<bool> {
        match self.state {
            GameState::GameOver { player_wins } => Some(player_wins),
            _ => None,
        }
    }

    /// The player's own waters.
    pub fn player_sea(&self) -> &Sea {
        &self.player
    }

    /// The computer's waters. Hosts should only draw ships that are revealed.
    pub fn opponent_sea(&self) -> &Sea {
        &self.opponent
    }

    pub fn sea(&self, side: Side) -> &Sea {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn sea_mut(&mut self, side: Side) -> &mut Sea {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Shot mark of a cell on `side`'s board.
    pub fn shot_state(&self, side: Side, coord: Coord) -> Result<ShotState, GameError> {
        self.sea(side).board().shot_state(coord)
    }

    /// Sunk status of ship `id` on `side`'s board, if it exists.
    pub fn is_ship_sunk(&self, side: Side, id: ShipId) -> Option<bool> {
        self.sea(side).fleet().get(id).map(|s| s.is_sunk())
    }

    /// Shots the player has fired so far.
    pub fn player_shots(&self) -> usize {
        self.opponent.board().shots_fired()
    }

    /// Shots the computer has fired so far.
    pub fn computer_shots(&self) -> usize {
        self.player.board().shots_fired()
    }

    /// Register an observer; it receives every later event synchronously.
    pub fn subscribe<O>(&mut self, observer: O) -> ObserverId
    where
        O: GameObserver + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn reject(&self, action: Action) -> GameError {
        log::warn!("rejected {:?} while {:?}", action, self.state);
        GameError::IllegalStateTransition {
            state: self.state,
            action,
        }
    }

    fn ensure_placing(&self) -> Result<(), GameError> {
        if self.state == GameState::PlacingShips {
            Ok(())
        } else {
            Err(self.reject(Action::EditFleet))
        }
    }

    // ---- setup phase ----

    /// Place a player ship of `length`. It takes the type of the next configured
    /// ship of that length not yet on the board, so a second 3 becomes the Submarine.
    pub fn place_ship(
        &mut self,
        length: usize,
        orientation: Orientation,
        anchor: Coord,
    ) -> Result<ShipId, GameError> {
        let placed = self
            .player
            .fleet()
            .ships()
            .iter()
            .filter(|s| s.length() == length)
            .count();
        let ship_type = self
            .config
            .fleet
            .iter()
            .filter(|t| t.length() == length)
            .nth(placed)
            .copied()
            .unwrap_or_else(|| ship_type_for_length(length));
        self.place_ship_type(ship_type, orientation, anchor)
    }

    /// Place a player ship of a specific type.
    pub fn place_ship_type(
        &mut self,
        ship_type: ShipType,
        orientation: Orientation,
        anchor: Coord,
    ) -> Result<ShipId, GameError> {
        self.ensure_placing()?;
        let (board, fleet) = self.player.parts_mut();
        let id = placement::place_ship(board, fleet, ship_type, orientation, anchor)?;
        self.player.sync_revealed();
        Ok(id)
    }

    /// Move a placed player ship to a new anchor, keeping its orientation.
    pub fn move_ship(&mut self, id: ShipId, anchor: Coord) -> Result<(), GameError> {
        self.ensure_placing()?;
        let orientation = self
            .player
            .fleet()
            .get(id)
            .map(|s| s.orientation())
            .ok_or(GameError::InvalidPlacement(PlacementIssue::UnknownShip))?;
        let (board, fleet) = self.player.parts_mut();
        placement::relocate_ship(board, fleet, id, orientation, anchor)
    }

    /// Rotate a placed player ship about its anchor.
    pub fn rotate_ship(&mut self, id: ShipId) -> Result<(), GameError> {
        self.ensure_placing()?;
        let (board, fleet) = self.player.parts_mut();
        placement::rotate_ship(board, fleet, id)
    }

    /// Replace the player fleet with the configured ships laid out in rows from the corner.
    pub fn use_default_layout(&mut self) -> Result<(), GameError> {
        self.ensure_placing()?;
        let (board, fleet) = placement::default_layout(self.config.grid_size, &self.config.fleet)?;
        self.player = Sea::from_parts(board, fleet);
        Ok(())
    }

    /// Replace the player fleet with a random layout of the configured ships.
    pub fn randomize_player_fleet(&mut self) -> Result<(), GameError> {
        self.ensure_placing()?;
        let (board, fleet) = placement::random_layout(
            self.config.grid_size,
            &self.config.fleet,
            &mut self.rng,
            self.config.placement_attempts,
            self.config.placement_retries,
        )?;
        self.player = Sea::from_parts(board, fleet);
        Ok(())
    }

    /// Remove every player ship.
    pub fn clear_player_fleet(&mut self) -> Result<(), GameError> {
        self.ensure_placing()?;
        self.player = Sea::new(self.config.grid_size);
        Ok(())
    }

    // ---- play ----

    /// Start play against the configured computer opponent.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        let ai = TargetingAi::new(self.config.difficulty, self.config.grid_size);
        self.start_game_with(Box::new(ai))
    }

    /// Start play with a caller-supplied targeter driving the computer.
    pub fn start_game_with(&mut self, targeting: Box<dyn Targeting>) -> Result<(), GameError> {
        if self.state != GameState::PlacingShips {
            return Err(self.reject(Action::StartGame));
        }
        if self.player.fleet().is_empty() {
            return Err(GameError::EmptyFleet);
        }
        let (board, fleet) = placement::random_layout(
            self.config.grid_size,
            &self.config.fleet,
            &mut self.rng,
            self.config.placement_attempts,
            self.config.placement_retries,
        )?;
        self.opponent = Sea::from_parts(board, fleet);
        self.targeting = Some(targeting);
        self.state = GameState::PlayerTurn;
        log::info!(
            "game started: {}x{} grid, {} player ships, {:?}",
            self.config.grid_size,
            self.config.grid_size,
            self.player.fleet().len(),
            self.config.difficulty
        );
        self.observers.emit(GameEvent::GameStarted);
        self.observers.emit(GameEvent::TurnChanged(Turn::Player));
        Ok(())
    }

    /// Player fires at `coord` on the computer's board.
    pub fn fire_at(&mut self, coord: Coord) -> Result<ShotResult, GameError> {
        if self.state != GameState::PlayerTurn {
            return Err(self.reject(Action::FireAt));
        }
        let result = self.resolve_shot(Side::Opponent, coord)?;
        log::debug!("player fired at {}: {:?}", coord, result);
        self.finish_turn(Side::Opponent, result, GameState::AiTurn, Turn::Computer);
        Ok(result)
    }

    /// Let the computer take its shot. Returns the cell it fired at and the result.
    pub fn run_ai_turn(&mut self) -> Result<(Coord, ShotResult), GameError> {
        if self.state != GameState::AiTurn {
            return Err(self.reject(Action::RunAiTurn));
        }
        let targeting = self
            .targeting
            .as_mut()
            .ok_or(GameError::IllegalStateTransition {
                state: self.state,
                action: Action::RunAiTurn,
            })?;
        let target = targeting
            .next_target(&mut self.rng)
            .ok_or(GameError::NoTargetsLeft)?;
        let result = self.resolve_shot(Side::Player, target)?;
        if let Some(targeting) = self.targeting.as_mut() {
            targeting.record_result(target, result.is_hit());
        }
        log::debug!("computer fired at {}: {:?}", target, result);
        self.finish_turn(Side::Player, result, GameState::PlayerTurn, Turn::Player);
        Ok((target, result))
    }

    /// Apply a shot to `side`'s sea and emit its notifications.
    fn resolve_shot(&mut self, side: Side, coord: Coord) -> Result<ShotResult, GameError> {
        let sea = self.sea_mut(side);
        let result = sea.receive_shot(coord)?;
        if result == ShotResult::Miss {
            self.observers.emit(GameEvent::CellMiss { side, coord });
            return Ok(result);
        }
        self.observers.emit(GameEvent::CellHit { side, coord });
        let Ok(Some(ship)) = self.sea(side).board().occupant(coord) else {
            return Ok(result);
        };
        if let ShotResult::Sunk(ship_type) = result {
            self.observers.emit(GameEvent::ShipSunk {
                side,
                ship,
                ship_type,
            });
        }
        // any hit uncovers the enemy ship it lands on
        if side == Side::Opponent && self.opponent.reveal(ship) {
            self.observers.emit(GameEvent::ShipRevealed { side, ship });
        }
        Ok(result)
    }

    fn finish_turn(&mut self, target: Side, result: ShotResult, next: GameState, turn: Turn) {
        if result.is_hit() && self.sea(target).fleet().all_sunk() {
            self.game_over(target == Side::Opponent);
        } else {
            self.state = next;
            self.observers.emit(GameEvent::TurnChanged(turn));
        }
    }

    fn game_over(&mut self, player_wins: bool) {
        self.state = GameState::GameOver { player_wins };
        log::info!(
            "game over: {} after {} player shots and {} computer shots",
            if player_wins { "player wins" } else { "computer wins" },
            self.player_shots(),
            self.computer_shots()
        );
        for ship in 0..self.opponent.fleet().len() {
            if self.opponent.reveal(ship) {
                self.observers.emit(GameEvent::ShipRevealed {
                    side: Side::Opponent,
                    ship,
                });
            }
        }
        self.targeting = None;
        self.observers.emit(GameEvent::GameOver { player_wins });
    }
}

impl core::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("player", &self.player)
            .field("opponent", &self.opponent)
            .field("observers", &self.observers)
            .finish()
    }
}
