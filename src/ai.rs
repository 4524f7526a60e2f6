// Targeting logic for the computer opponent.
// Two strategies: uniform random search, and hunt-and-target which chases
// the orthogonal neighbours of earlier hits. Neither looks at ship sizes.

use alloc::vec::Vec;
use rand::{Rng, RngCore};

use crate::{bitboard::BitBoard, common::Coord, config::Difficulty};

/// Neighbour order used when expanding a hit: right, left, up, down.
/// Changing it changes which cell a seeded game picks next.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Something that picks the computer's shots and learns from their results.
pub trait Targeting {
    /// Choose the next cell to fire at, or `None` if every cell has been tried.
    fn next_target(&mut self, rng: &mut dyn RngCore) -> Option<Coord>;

    /// Inform the targeter of the outcome of a shot at `coord`.
    fn record_result(&mut self, coord: Coord, is_hit: bool);
}

/// The standard computer opponent.
#[derive(Debug, Clone)]
pub struct TargetingAi {
    difficulty: Difficulty,
    grid_size: usize,
    tried: BitBoard,
    hit_history: Vec<Coord>,
    candidates: Vec<Coord>,
}

impl TargetingAi {
    pub fn new(difficulty: Difficulty, grid_size: usize) -> Self {
        Self {
            difficulty,
            grid_size,
            tried: BitBoard::new(grid_size),
            hit_history: Vec::new(),
            candidates: Vec::new(),
        }
    }

    /// Forget everything learned; used when a new game starts.
    pub fn reset(&mut self) {
        self.tried.clear_all();
        self.hit_history.clear();
        self.candidates.clear();
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Cells already fired at.
    pub fn tried(&self) -> &BitBoard {
        &self.tried
    }

    /// Hits whose neighbourhood has not been exhausted yet, oldest first.
    pub fn hit_history(&self) -> &[Coord] {
        &self.hit_history
    }

    /// Cells queued for follow-up shots.
    pub fn candidates(&self) -> &[Coord] {
        &self.candidates
    }

    /// Number of cells never fired at.
    pub fn remaining(&self) -> usize {
        self.grid_size * self.grid_size - self.tried.count_ones()
    }

    fn is_tried(&self, coord: Coord) -> bool {
        self.tried.get(coord).unwrap_or(true)
    }

    /// Uniform choice among untried cells.
    fn random_target<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coord> {
        let available = self.remaining();
        if available == 0 {
            return None;
        }
        let pick = rng.random_range(0..available);
        self.tried.iter_clear().nth(pick)
    }

    /// Remove and return a random queued candidate that is still untried.
    fn pop_candidate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        while !self.candidates.is_empty() {
            let idx = rng.random_range(0..self.candidates.len());
            let target = self.candidates.remove(idx);
            if !self.is_tried(target) {
                return Some(target);
            }
        }
        None
    }

    /// Queue the in-bounds, untried neighbours of `hit` that are not queued yet.
    fn enqueue_neighbors(&mut self, hit: Coord) {
        for (dc, dr) in NEIGHBOR_OFFSETS {
            if let Some(adjacent) = hit.offset(dc, dr, self.grid_size) {
                if !self.is_tried(adjacent) && !self.candidates.contains(&adjacent) {
                    self.candidates.push(adjacent);
                }
            }
        }
    }

    fn hunt_target<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        loop {
            if let Some(target) = self.pop_candidate(rng) {
                log::debug!("ai: following up at {}", target);
                return Some(target);
            }
            let &last = self.hit_history.last()?;
            self.enqueue_neighbors(last);
            if self.candidates.is_empty() {
                // every neighbour of this hit has been tried
                self.hit_history.pop();
            }
        }
    }
}

impl Targeting for TargetingAi {
    fn next_target(&mut self, rng: &mut dyn RngCore) -> Option<Coord> {
        if self.difficulty == Difficulty::HuntTarget {
            if let Some(target) = self.hunt_target(&mut *rng) {
                return Some(target);
            }
        }
        self.random_target(rng)
    }

    fn record_result(&mut self, coord: Coord, is_hit: bool) {
        if self.tried.set(coord).is_err() {
            log::warn!("ai: ignoring result for off-grid cell {}", coord);
            return;
        }
        self.candidates.retain(|&c| c != coord);
        if is_hit {
            self.hit_history.push(coord);
            if self.difficulty == Difficulty::HuntTarget {
                self.enqueue_neighbors(coord);
            }
        }
    }
}
