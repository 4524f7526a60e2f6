//! Common types for the game core: coordinates, shot marks, shot results and errors.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::game::GameState;
use crate::ship::ShipType;

/// A cell on the grid, 0-indexed. `col` grows to the right, `row` grows "up"
/// (the direction vertical ships extend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Returns `true` when both axes lie in `[0, grid_size)`.
    #[inline]
    pub fn in_bounds(&self, grid_size: usize) -> bool {
        self.col < grid_size && self.row < grid_size
    }

    /// The cell `(dc, dr)` away, if it is still on a `grid_size` grid.
    pub fn offset(&self, dc: isize, dr: isize, grid_size: usize) -> Option<Coord> {
        let col = self.col.checked_add_signed(dc)?;
        let row = self.row.checked_add_signed(dr)?;
        let next = Coord::new(col, row);
        next.in_bounds(grid_size).then_some(next)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Shot mark of a single cell. Never reverts once `Miss` or `Hit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum ShotState {
    #[default]
    Untried,
    Miss,
    Hit,
}

/// Result of a resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum ShotResult {
    /// Shot missed all ships.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot hit the last intact segment of a ship.
    Sunk(ShipType),
}

impl ShotResult {
    /// `true` for both `Hit` and `Sunk`.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

/// Why a ship may not occupy the requested cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementIssue {
    /// At least one segment falls outside the grid.
    OutOfBounds,
    /// At least one segment is already occupied by another ship.
    Overlap,
    /// Ships must be at least two cells long.
    InvalidLength,
    /// No ship with the given id exists in the fleet.
    UnknownShip,
}

/// Operation names used when reporting illegal state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EditFleet,
    StartGame,
    FireAt,
    RunAiTurn,
}

/// Errors returned by core operations. All are recoverable; the state
/// of the game is left unchanged when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Geometry or collision violation while placing or editing a ship.
    InvalidPlacement(PlacementIssue),
    /// The random placer could not seat a ship within its attempt budget.
    PlacementExhausted { length: usize, attempts: u32 },
    /// Shot target or anchor outside the grid.
    CoordinateOutOfRange { coord: Coord, grid_size: usize },
    /// Operation invoked in a state that forbids it.
    IllegalStateTransition { state: GameState, action: Action },
    /// The cell has already been shot at.
    AlreadyFired { coord: Coord },
    /// The game cannot start without at least one player ship.
    EmptyFleet,
    /// Every cell of the target board has been tried.
    NoTargetsLeft,
    /// A configuration value is unusable.
    InvalidConfig(&'static str),
    /// Underlying bitboard error.
    BitBoard(BitBoardError),
}

impl From<BitBoardError> for GameError {
    fn from(err: BitBoardError) -> Self {
        GameError::BitBoard(err)
    }
}

impl From<PlacementIssue> for GameError {
    fn from(issue: PlacementIssue) -> Self {
        GameError::InvalidPlacement(issue)
    }
}

impl fmt::Display for PlacementIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementIssue::OutOfBounds => write!(f, "ship would extend past the grid"),
            PlacementIssue::Overlap => write!(f, "ship would overlap another ship"),
            PlacementIssue::InvalidLength => write!(f, "ship length must be at least 2"),
            PlacementIssue::UnknownShip => write!(f, "no such ship in the fleet"),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPlacement(issue) => write!(f, "Invalid placement: {}", issue),
            GameError::PlacementExhausted { length, attempts } => write!(
                f,
                "Unable to place ship of length {} after {} attempts",
                length, attempts
            ),
            GameError::CoordinateOutOfRange { coord, grid_size } => write!(
                f,
                "Coordinate {} is outside the {}x{} grid",
                coord, grid_size, grid_size
            ),
            GameError::IllegalStateTransition { state, action } => {
                write!(f, "{:?} is not allowed while {:?}", action, state)
            }
            GameError::AlreadyFired { coord } => {
                write!(f, "Cell {} has already been targeted", coord)
            }
            GameError::EmptyFleet => write!(f, "Place at least one ship before starting"),
            GameError::NoTargetsLeft => write!(f, "No untried cells remain"),
            GameError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            GameError::BitBoard(e) => write!(f, "BitBoard error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
