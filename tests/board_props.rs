use fleetfire::placement::random_layout;
use fleetfire::{Coord, ShotResult, ShotState, STANDARD_FLEET};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A ship reports sunk exactly when every one of its cells has been hit,
    /// and `Sunk` is returned on the shot that completes it.
    #[test]
    fn sunk_iff_every_segment_hit(seed in any::<u64>(), shots in 1usize..=100) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (mut board, mut fleet) = random_layout(10, &STANDARD_FLEET, &mut rng, 100, 10).unwrap();

        let mut cells: Vec<Coord> = (0..100).map(|i| Coord::new(i % 10, i / 10)).collect();
        cells.shuffle(&mut rng);

        for &coord in cells.iter().take(shots) {
            let owner = board.occupant(coord).unwrap();
            let result = board.receive_shot(&mut fleet, coord).unwrap();
            match owner {
                None => prop_assert_eq!(result, ShotResult::Miss),
                Some(id) => {
                    let ship = fleet.get(id).unwrap();
                    if ship.is_sunk() {
                        prop_assert_eq!(result, ShotResult::Sunk(ship.ship_type()));
                    } else {
                        prop_assert_eq!(result, ShotResult::Hit);
                    }
                }
            }
        }

        for ship in fleet.ships() {
            let all_hit = ship
                .cells()
                .all(|c| board.shot_state(c).unwrap() == ShotState::Hit);
            prop_assert_eq!(ship.is_sunk(), all_hit);
        }
        prop_assert_eq!(board.shots_fired(), shots);
    }
}
