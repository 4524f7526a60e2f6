use alloc::vec::Vec;

use crate::common::GameError;
use crate::placement::DEFAULT_PLACEMENT_ATTEMPTS;
use crate::ship::ShipType;

pub const DEFAULT_GRID_SIZE: usize = 10;
/// Largest grid `A1`-style notation can address.
pub const MAX_GRID_SIZE: usize = 26;
pub const NUM_SHIPS: usize = 5;
pub const STANDARD_FLEET: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Whole-fleet retries when the random placer runs out of attempts.
pub const DEFAULT_PLACEMENT_RETRIES: u32 = 10;

/// Conventional ship type for a bare length, used when the configured fleet has no
/// unplaced ship of that length left.
pub fn ship_type_for_length(length: usize) -> ShipType {
    match length {
        5 => ShipType::new("Carrier", 5),
        4 => ShipType::new("Battleship", 4),
        3 => ShipType::new("Cruiser", 3),
        2 => ShipType::new("Destroyer", 2),
        n => ShipType::new("Ship", n),
    }
}

/// Strength of the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Difficulty {
    /// Uniform random shots, no memory of hits.
    Random,
    /// Random search, then adjacency-based follow-up after a hit.
    #[default]
    HuntTarget,
}

/// Everything that shapes one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub grid_size: usize,
    /// Ships generated for the computer, in placement order.
    pub fleet: Vec<ShipType>,
    pub difficulty: Difficulty,
    pub placement_attempts: u32,
    pub placement_retries: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            fleet: STANDARD_FLEET.to_vec(),
            difficulty: Difficulty::default(),
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            placement_retries: DEFAULT_PLACEMENT_RETRIES,
        }
    }
}

impl GameConfig {
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_fleet(mut self, fleet: Vec<ShipType>) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_placement_attempts(mut self, attempts: u32) -> Self {
        self.placement_attempts = attempts;
        self
    }

    /// Reject sizes and fleets no game could be played with.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_size < 2 {
            return Err(GameError::InvalidConfig("grid size must be at least 2"));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(GameError::InvalidConfig("grid size must be at most 26"));
        }
        if self.fleet.is_empty() {
            return Err(GameError::InvalidConfig("fleet must contain at least one ship"));
        }
        if self.fleet.iter().any(|s| s.length() < 2) {
            return Err(GameError::InvalidConfig("ships must be at least 2 cells long"));
        }
        if self.fleet.iter().any(|s| s.length() > self.grid_size) {
            return Err(GameError::InvalidConfig("ship longer than the grid"));
        }
        let cells = self
            .grid_size
            .checked_mul(self.grid_size)
            .ok_or(GameError::InvalidConfig("grid size too large"))?;
        if self.total_ship_cells() > cells {
            return Err(GameError::InvalidConfig("fleet does not fit on the grid"));
        }
        Ok(())
    }

    /// Total number of ship segments in the configured fleet.
    pub fn total_ship_cells(&self) -> usize {
        self.fleet.iter().map(|s| s.length()).sum()
    }
}
