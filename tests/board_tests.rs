use fleetfire::{
    place_ship, Board, Coord, Fleet, GameError, Orientation, PlacementIssue, ShipType,
    ShotResult, ShotState,
};

fn board_with_destroyer() -> (Board, Fleet) {
    let mut board = Board::new(5);
    let mut fleet = Fleet::new();
    let id = place_ship(
        &mut board,
        &mut fleet,
        ShipType::new("Destroyer", 2),
        Orientation::Horizontal,
        Coord::new(1, 1),
    )
    .unwrap();
    assert_eq!(id, 0);
    (board, fleet)
}

#[test]
fn test_place_ship_occupies_cells() {
    let (board, fleet) = board_with_destroyer();
    assert_eq!(board.occupant(Coord::new(1, 1)).unwrap(), Some(0));
    assert_eq!(board.occupant(Coord::new(2, 1)).unwrap(), Some(0));
    assert_eq!(board.occupant(Coord::new(3, 1)).unwrap(), None);
    assert_eq!(board.occupied_cells(), 2);
    assert_eq!(fleet.len(), 1);
}

#[test]
fn test_place_ship_rejections_leave_board_untouched() {
    let (mut board, mut fleet) = board_with_destroyer();
    let before = board.clone();

    let overlap = place_ship(
        &mut board,
        &mut fleet,
        ShipType::new("Cruiser", 3),
        Orientation::Vertical,
        Coord::new(2, 0),
    );
    assert_eq!(
        overlap,
        Err(GameError::InvalidPlacement(PlacementIssue::Overlap))
    );

    let outside = place_ship(
        &mut board,
        &mut fleet,
        ShipType::new("Cruiser", 3),
        Orientation::Horizontal,
        Coord::new(3, 4),
    );
    assert_eq!(
        outside,
        Err(GameError::InvalidPlacement(PlacementIssue::OutOfBounds))
    );

    let tiny = place_ship(
        &mut board,
        &mut fleet,
        ShipType::new("Dinghy", 1),
        Orientation::Horizontal,
        Coord::new(0, 4),
    );
    assert_eq!(
        tiny,
        Err(GameError::InvalidPlacement(PlacementIssue::InvalidLength))
    );

    assert_eq!(board, before);
    assert_eq!(fleet.len(), 1);
}

#[test]
fn test_receive_shot_miss_hit_sunk() {
    let (mut board, mut fleet) = board_with_destroyer();

    assert_eq!(
        board.receive_shot(&mut fleet, Coord::new(0, 0)).unwrap(),
        ShotResult::Miss
    );
    assert_eq!(board.shot_state(Coord::new(0, 0)).unwrap(), ShotState::Miss);

    assert_eq!(
        board.receive_shot(&mut fleet, Coord::new(1, 1)).unwrap(),
        ShotResult::Hit
    );
    assert_eq!(board.shot_state(Coord::new(1, 1)).unwrap(), ShotState::Hit);
    assert!(!fleet.all_sunk());

    let sunk = board.receive_shot(&mut fleet, Coord::new(2, 1)).unwrap();
    assert_eq!(sunk, ShotResult::Sunk(ShipType::new("Destroyer", 2)));
    assert!(fleet.all_sunk());
    assert_eq!(fleet.afloat(), 0);
    assert_eq!(board.shots_fired(), 3);
}

#[test]
fn test_receive_shot_twice_is_rejected() {
    let (mut board, mut fleet) = board_with_destroyer();
    board.receive_shot(&mut fleet, Coord::new(1, 1)).unwrap();
    assert_eq!(
        board.receive_shot(&mut fleet, Coord::new(1, 1)),
        Err(GameError::AlreadyFired {
            coord: Coord::new(1, 1)
        })
    );
    assert_eq!(fleet.get(0).unwrap().hits(), 1);
    assert_eq!(board.shots_fired(), 1);
}

#[test]
fn test_receive_shot_out_of_range() {
    let (mut board, mut fleet) = board_with_destroyer();
    assert_eq!(
        board.receive_shot(&mut fleet, Coord::new(5, 0)),
        Err(GameError::CoordinateOutOfRange {
            coord: Coord::new(5, 0),
            grid_size: 5
        })
    );
    assert_eq!(board.shots_fired(), 0);
}

#[test]
fn test_empty_fleet_is_not_all_sunk() {
    let fleet = Fleet::new();
    assert!(!fleet.all_sunk());
}
