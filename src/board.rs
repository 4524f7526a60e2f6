//! Game board state: per-cell occupancy and shot marks.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::{Coord, GameError, PlacementIssue, ShotResult, ShotState};
use crate::ship::{Fleet, ShipId};

/// A `size×size` grid. Occupancy is stored only here; ships keep their own hit flags.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    occupancy: Vec<Option<ShipId>>,
    hits: BitBoard,
    misses: BitBoard,
}

impl Board {
    /// Create an empty board (no ships, no shots).
    pub fn new(size: usize) -> Self {
        Board {
            size,
            occupancy: vec![None; size * size],
            hits: BitBoard::new(size),
            misses: BitBoard::new(size),
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, coord: Coord) -> Result<usize, GameError> {
        if !coord.in_bounds(self.size) {
            return Err(GameError::CoordinateOutOfRange {
                coord,
                grid_size: self.size,
            });
        }
        Ok(coord.row * self.size + coord.col)
    }

    /// Ship occupying `coord`, if any.
    pub fn occupant(&self, coord: Coord) -> Result<Option<ShipId>, GameError> {
        Ok(self.occupancy[self.index(coord)?])
    }

    /// `true` if a ship covers `coord`. Out-of-range cells are never occupied.
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.occupant(coord).map(|o| o.is_some()).unwrap_or(false)
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.occupancy.iter().filter(|o| o.is_some()).count()
    }

    /// Shot mark at `coord`.
    pub fn shot_state(&self, coord: Coord) -> Result<ShotState, GameError> {
        if self.hits.get(coord)? {
            Ok(ShotState::Hit)
        } else if self.misses.get(coord)? {
            Ok(ShotState::Miss)
        } else {
            Ok(ShotState::Untried)
        }
    }

    /// Cells marked `Hit`.
    pub fn hits(&self) -> &BitBoard {
        &self.hits
    }

    /// Cells marked `Miss`.
    pub fn misses(&self) -> &BitBoard {
        &self.misses
    }

    /// Number of cells shot at so far.
    pub fn shots_fired(&self) -> usize {
        self.hits.count_ones() + self.misses.count_ones()
    }

    /// Mark `cells` as occupied by ship `id`. Cells must be in bounds.
    pub(crate) fn occupy<I>(&mut self, cells: I, id: ShipId) -> Result<(), GameError>
    where
        I: IntoIterator<Item = Coord>,
    {
        for coord in cells {
            let idx = self.index(coord)?;
            self.occupancy[idx] = Some(id);
        }
        Ok(())
    }

    /// Release `cells`. Out-of-range cells are ignored.
    pub(crate) fn vacate<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Coord>,
    {
        for coord in cells {
            if let Ok(idx) = self.index(coord) {
                self.occupancy[idx] = None;
            }
        }
    }

    /// Resolve a shot at `coord` against this board and the `fleet` it holds.
    /// The cell is marked `Hit` or `Miss`; a hit also updates the ship's segments.
    pub fn receive_shot(&mut self, fleet: &mut Fleet, coord: Coord) -> Result<ShotResult, GameError> {
        let idx = self.index(coord)?;
        // prevent duplicates
        if self.shot_state(coord)? != ShotState::Untried {
            return Err(GameError::AlreadyFired { coord });
        }
        match self.occupancy[idx] {
            Some(id) => {
                let ship = fleet
                    .get_mut(id)
                    .ok_or(GameError::InvalidPlacement(PlacementIssue::UnknownShip))?;
                self.hits.set(coord)?;
                ship.register_hit(coord);
                if ship.is_sunk() {
                    Ok(ShotResult::Sunk(ship.ship_type()))
                } else {
                    Ok(ShotResult::Hit)
                }
            }
            None => {
                self.misses.set(coord)?;
                Ok(ShotResult::Miss)
            }
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{ size: {}, occupied: {}, hits: {}, misses: {} }}",
            self.size,
            self.occupied_cells(),
            self.hits.count_ones(),
            self.misses.count_ones(),
        )
    }
}

/// One player's waters: their board, the fleet on it, and which ships the
/// other side may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sea {
    board: Board,
    fleet: Fleet,
    revealed: Vec<bool>,
}

impl Sea {
    pub fn new(size: usize) -> Self {
        Sea {
            board: Board::new(size),
            fleet: Fleet::new(),
            revealed: Vec::new(),
        }
    }

    pub(crate) fn from_parts(board: Board, fleet: Fleet) -> Self {
        let revealed = vec![false; fleet.len()];
        Sea {
            board,
            fleet,
            revealed,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Board, &mut Fleet) {
        (&mut self.board, &mut self.fleet)
    }

    /// Keep the visibility list in step with the fleet after a placement.
    pub(crate) fn sync_revealed(&mut self) {
        self.revealed.resize(self.fleet.len(), false);
    }

    /// Whether the other side may see ship `id`.
    pub fn is_revealed(&self, id: ShipId) -> bool {
        self.revealed.get(id).copied().unwrap_or(false)
    }

    /// Reveal ship `id`. Returns `true` if it was hidden.
    pub(crate) fn reveal(&mut self, id: ShipId) -> bool {
        match self.revealed.get_mut(id) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    /// Resolve a shot into these waters.
    pub(crate) fn receive_shot(&mut self, coord: Coord) -> Result<ShotResult, GameError> {
        self.board.receive_shot(&mut self.fleet, coord)
    }
}
