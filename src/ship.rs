//! Ship definitions and per-segment hit tracking.
//!
//! A `Ship` knows only its own geometry and which of its segments have been hit.
//! Which cells are occupied is owned by the `Board`.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Orientation {
    /// Segments extend towards increasing columns.
    Horizontal,
    /// Segments extend towards increasing rows.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Step from one segment to the next.
    fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Index of a ship within its fleet.
pub type ShipId = usize;

/// Cells covered by a ship of `length` anchored at `anchor`, in segment order.
/// Coordinates are produced unchecked; callers test them against the grid.
pub fn segment_cells(
    anchor: Coord,
    orientation: Orientation,
    length: usize,
) -> impl Iterator<Item = Coord> {
    let (dc, dr) = orientation.step();
    (0..length).map(move |i| {
        Coord::new(
            anchor.col.saturating_add(i * dc),
            anchor.row.saturating_add(i * dr),
        )
    })
}

/// A ship placed on a board.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    orientation: Orientation,
    anchor: Coord,
    hit_segments: Vec<bool>,
}

impl Ship {
    /// Construct an intact ship. Geometry is validated by the placement layer.
    pub fn new(ship_type: ShipType, orientation: Orientation, anchor: Coord) -> Self {
        Ship {
            ship_type,
            orientation,
            anchor,
            hit_segments: vec![false; ship_type.length()],
        }
    }

    /// Ship's type.
    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    /// Number of segments.
    pub fn length(&self) -> usize {
        self.hit_segments.len()
    }

    /// Coordinate of segment 0.
    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    /// Orientation of the ship.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Segment cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        segment_cells(self.anchor, self.orientation, self.length())
    }

    /// Index of the segment covering `coord`, if any.
    pub fn segment_index(&self, coord: Coord) -> Option<usize> {
        self.cells().position(|c| c == coord)
    }

    /// Returns `true` if the ship covers `coord`.
    pub fn contains(&self, coord: Coord) -> bool {
        self.segment_index(coord).is_some()
    }

    /// Register a hit at `coord`. Returns `true` if the ship covers it.
    pub fn register_hit(&mut self, coord: Coord) -> bool {
        match self.segment_index(coord) {
            Some(i) => {
                self.hit_segments[i] = true;
                true
            }
            None => false,
        }
    }

    /// Per-segment hit flags.
    pub fn hit_segments(&self) -> &[bool] {
        &self.hit_segments
    }

    /// Number of segments hit so far.
    pub fn hits(&self) -> usize {
        self.hit_segments.iter().filter(|&&h| h).count()
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hit_segments.iter().all(|&h| h)
    }

    /// Move the ship. Hit state is kept; editing only happens before play.
    pub(crate) fn relocate(&mut self, orientation: Orientation, anchor: Coord) {
        self.orientation = orientation;
        self.anchor = anchor;
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", anchor: {}, orientation: {:?}, hits: {}/{} }}",
            self.ship_type.name(),
            self.anchor,
            self.orientation,
            self.hits(),
            self.length(),
        )
    }
}

/// The ships owned by one player, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id)
    }

    pub(crate) fn push(&mut self, ship: Ship) -> ShipId {
        self.ships.push(ship);
        self.ships.len() - 1
    }

    /// Returns `true` when every ship is sunk. An empty fleet is never "all sunk".
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Number of ships still afloat.
    pub fn afloat(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }
}
