//! Placement rules: validity checks, manual placement and edits, and random fleet layout.

use rand::Rng;

use crate::board::Board;
use crate::common::{Coord, GameError, PlacementIssue};
use crate::ship::{segment_cells, Fleet, Orientation, Ship, ShipId, ShipType};

/// Attempts per ship before the random placer gives up.
pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 100;

/// Check whether a ship could occupy the given cells, ignoring cells held by `ignore`.
fn check_cells(
    board: &Board,
    length: usize,
    orientation: Orientation,
    anchor: Coord,
    ignore: Option<ShipId>,
) -> Result<(), PlacementIssue> {
    let size = board.size();
    for cell in segment_cells(anchor, orientation, length) {
        if !cell.in_bounds(size) {
            return Err(PlacementIssue::OutOfBounds);
        }
        match board.occupant(cell) {
            Ok(Some(id)) if Some(id) != ignore => return Err(PlacementIssue::Overlap),
            Ok(_) => {}
            Err(_) => return Err(PlacementIssue::OutOfBounds),
        }
    }
    Ok(())
}

/// Like [`can_place`] but reports which rule failed.
pub fn check_placement(
    board: &Board,
    length: usize,
    orientation: Orientation,
    anchor: Coord,
) -> Result<(), PlacementIssue> {
    check_cells(board, length, orientation, anchor, None)
}

/// Returns `true` if every segment is inside the grid and on a free cell.
pub fn can_place(board: &Board, length: usize, orientation: Orientation, anchor: Coord) -> bool {
    check_placement(board, length, orientation, anchor).is_ok()
}

/// Place a ship of `ship_type` and append it to `fleet`.
/// On error neither the board nor the fleet is touched.
pub fn place_ship(
    board: &mut Board,
    fleet: &mut Fleet,
    ship_type: ShipType,
    orientation: Orientation,
    anchor: Coord,
) -> Result<ShipId, GameError> {
    let length = ship_type.length();
    if length < 2 {
        return Err(PlacementIssue::InvalidLength.into());
    }
    check_placement(board, length, orientation, anchor)?;
    let ship = Ship::new(ship_type, orientation, anchor);
    let cells = ship.cells();
    let id = fleet.push(ship);
    board.occupy(cells, id)?;
    log::debug!(
        "placed {} (len {}) at {} {:?}",
        ship_type.name(),
        length,
        anchor,
        orientation
    );
    Ok(id)
}

/// Move ship `id` to a new anchor and orientation. The ship's current cells do
/// not count as collisions. On error the ship stays where it was.
pub fn relocate_ship(
    board: &mut Board,
    fleet: &mut Fleet,
    id: ShipId,
    orientation: Orientation,
    anchor: Coord,
) -> Result<(), GameError> {
    let ship = fleet
        .get_mut(id)
        .ok_or(GameError::InvalidPlacement(PlacementIssue::UnknownShip))?;
    check_cells(board, ship.length(), orientation, anchor, Some(id))?;
    board.vacate(ship.cells());
    ship.relocate(orientation, anchor);
    board.occupy(ship.cells(), id)
}

/// Rotate ship `id` about its anchor.
pub fn rotate_ship(board: &mut Board, fleet: &mut Fleet, id: ShipId) -> Result<(), GameError> {
    let (orientation, anchor) = fleet
        .get(id)
        .map(|s| (s.orientation().rotated(), s.anchor()))
        .ok_or(GameError::InvalidPlacement(PlacementIssue::UnknownShip))?;
    relocate_ship(board, fleet, id, orientation, anchor)
}

/// Returns a random valid `(anchor, orientation)` for a ship of `length`,
/// trying at most `attempts` samples.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    rng: &mut R,
    length: usize,
    attempts: u32,
) -> Result<(Coord, Orientation), GameError> {
    let size = board.size();
    if length < 2 {
        return Err(PlacementIssue::InvalidLength.into());
    }
    if length > size {
        return Err(GameError::PlacementExhausted {
            length,
            attempts: 0,
        });
    }
    for _ in 0..attempts {
        let orient = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let max_col = if orient == Orientation::Horizontal {
            size - length
        } else {
            size - 1
        };
        let max_row = if orient == Orientation::Vertical {
            size - length
        } else {
            size - 1
        };
        let anchor = Coord::new(rng.random_range(0..=max_col), rng.random_range(0..=max_row));
        if can_place(board, length, orient, anchor) {
            return Ok((anchor, orient));
        }
    }
    Err(GameError::PlacementExhausted { length, attempts })
}

/// Place every ship of `sizes`, in order, at random onto `board` and return the fleet.
/// Stops at the first ship that cannot be seated; the caller decides whether to
/// retry on a fresh board.
pub fn place_fleet_randomly<R: Rng + ?Sized>(
    board: &mut Board,
    sizes: &[ShipType],
    rng: &mut R,
    attempts: u32,
) -> Result<Fleet, GameError> {
    let mut fleet = Fleet::new();
    for &ship_type in sizes {
        let (anchor, orient) = random_placement(board, rng, ship_type.length(), attempts)?;
        place_ship(board, &mut fleet, ship_type, orient, anchor)?;
    }
    Ok(fleet)
}

/// Run [`place_fleet_randomly`] on a fresh board, up to `retries` times.
pub fn random_layout<R: Rng + ?Sized>(
    size: usize,
    sizes: &[ShipType],
    rng: &mut R,
    attempts: u32,
    retries: u32,
) -> Result<(Board, Fleet), GameError> {
    let mut last = GameError::PlacementExhausted {
        length: 0,
        attempts,
    };
    for round in 0..retries.max(1) {
        let mut board = Board::new(size);
        match place_fleet_randomly(&mut board, sizes, rng, attempts) {
            Ok(fleet) => return Ok((board, fleet)),
            Err(e @ GameError::PlacementExhausted { .. }) => {
                log::warn!("random layout round {} failed: {}", round + 1, e);
                last = e;
            }
            Err(e) => return Err(e),
        }
    }
    Err(last)
}

/// Lay `sizes` out horizontally from column 0, one ship per row.
pub fn default_layout(size: usize, sizes: &[ShipType]) -> Result<(Board, Fleet), GameError> {
    let mut board = Board::new(size);
    let mut fleet = Fleet::new();
    for (row, &ship_type) in sizes.iter().enumerate() {
        place_ship(
            &mut board,
            &mut fleet,
            ship_type,
            Orientation::Horizontal,
            Coord::new(0, row),
        )?;
    }
    Ok((board, fleet))
}
