use fleetfire::{Coord, Difficulty, Targeting, TargetingAi, NEIGHBOR_OFFSETS};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Fire until the AI runs dry, answering from `ships`. Returns the shot order.
fn exhaust(ai: &mut TargetingAi, rng: &mut SmallRng, ships: &HashSet<Coord>) -> Vec<Coord> {
    let mut shots = Vec::new();
    while let Some(target) = ai.next_target(rng) {
        shots.push(target);
        ai.record_result(target, ships.contains(&target));
        assert!(shots.len() <= 100, "more shots than cells");
    }
    shots
}

fn horizontal(col: usize, row: usize, len: usize) -> impl Iterator<Item = Coord> {
    (col..col + len).map(move |c| Coord::new(c, row))
}

#[test]
fn test_random_mode_covers_grid_without_repeats() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut ai = TargetingAi::new(Difficulty::Random, 10);
    let ships: HashSet<Coord> = horizontal(2, 3, 4).collect();

    let shots = exhaust(&mut ai, &mut rng, &ships);
    let unique: HashSet<_> = shots.iter().copied().collect();
    assert_eq!(shots.len(), 100);
    assert_eq!(unique.len(), 100);
    assert_eq!(ai.remaining(), 0);
    assert!(ai.next_target(&mut rng).is_none());
}

#[test]
fn test_hunt_target_covers_grid_without_repeats() {
    let mut rng = SmallRng::seed_from_u64(12);
    let mut ai = TargetingAi::new(Difficulty::HuntTarget, 10);
    let ships: HashSet<Coord> = horizontal(0, 0, 5)
        .chain(horizontal(5, 9, 4))
        .chain((2..5).map(|r| Coord::new(7, r)))
        .collect();

    let shots = exhaust(&mut ai, &mut rng, &ships);
    let unique: HashSet<_> = shots.iter().copied().collect();
    assert_eq!(shots.len(), 100);
    assert_eq!(unique.len(), 100);
    assert!(ai.tried().is_full());
}

#[test]
fn test_neighbors_enqueued_right_left_up_down() {
    let mut ai = TargetingAi::new(Difficulty::HuntTarget, 10);
    ai.record_result(Coord::new(4, 4), true);
    let expected: Vec<Coord> = NEIGHBOR_OFFSETS
        .iter()
        .map(|&(dc, dr)| Coord::new((4 + dc) as usize, (4 + dr) as usize))
        .collect();
    assert_eq!(ai.candidates(), expected.as_slice());
    assert_eq!(
        ai.candidates(),
        &[
            Coord::new(5, 4),
            Coord::new(3, 4),
            Coord::new(4, 5),
            Coord::new(4, 3)
        ]
    );
    assert_eq!(ai.hit_history(), &[Coord::new(4, 4)]);
}

#[test]
fn test_corner_hit_skips_off_grid_and_tried_neighbors() {
    let mut ai = TargetingAi::new(Difficulty::HuntTarget, 10);
    ai.record_result(Coord::new(1, 0), false);
    ai.record_result(Coord::new(0, 0), true);
    assert_eq!(ai.candidates(), &[Coord::new(0, 1)]);
}

#[test]
fn test_random_mode_ignores_hits() {
    let mut ai = TargetingAi::new(Difficulty::Random, 10);
    ai.record_result(Coord::new(4, 4), true);
    assert!(ai.candidates().is_empty());
    assert_eq!(ai.remaining(), 99);
}

#[test]
fn test_follow_up_shot_is_adjacent_to_hit() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut ai = TargetingAi::new(Difficulty::HuntTarget, 10);
    ai.record_result(Coord::new(6, 6), true);
    let next = ai.next_target(&mut rng).unwrap();
    let dist = next.col.abs_diff(6) + next.row.abs_diff(6);
    assert_eq!(dist, 1);
}

#[test]
fn test_second_hit_queues_next_cell_in_line() {
    let mut ai = TargetingAi::new(Difficulty::HuntTarget, 10);
    ai.record_result(Coord::new(4, 5), true);
    ai.record_result(Coord::new(5, 5), true);
    assert!(ai.candidates().contains(&Coord::new(6, 5)));
    assert!(ai.candidates().contains(&Coord::new(3, 5)));
    assert!(!ai.candidates().contains(&Coord::new(5, 5)));
}

/// Let the AI fire at `ship` until it is sunk. Returns the number of shots it took.
fn shots_to_sink(ai: &mut TargetingAi, rng: &mut SmallRng, ship: &HashSet<Coord>) -> usize {
    let mut hits: HashSet<Coord> = ai.hit_history().iter().copied().collect();
    let mut shots = 0;
    while hits.len() < ship.len() {
        let target = ai.next_target(rng).unwrap();
        let is_hit = ship.contains(&target);
        if is_hit {
            hits.insert(target);
        }
        ai.record_result(target, is_hit);
        shots += 1;
        assert!(shots <= 100, "never sank the ship");
    }
    shots
}

#[test]
fn test_hunt_target_sinks_within_length_plus_three() {
    // cruiser along the top edge: (3,0) (4,0) (5,0)
    let ship: HashSet<Coord> = horizontal(3, 0, 3).collect();
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut ai = TargetingAi::new(Difficulty::HuntTarget, 10);

    // first hit on one end, then a hit on the adjacent cell
    ai.record_result(Coord::new(3, 0), true);
    ai.record_result(Coord::new(4, 0), true);
    assert!(ai.candidates().contains(&Coord::new(5, 0)));

    let shots = 2 + shots_to_sink(&mut ai, &mut rng, &ship);
    assert!(shots <= ship.len() + 3, "took {} shots", shots);
}

#[test]
fn test_off_grid_result_is_ignored() {
    let mut ai = TargetingAi::new(Difficulty::HuntTarget, 5);
    ai.record_result(Coord::new(7, 7), true);
    assert!(ai.hit_history().is_empty());
    assert!(ai.candidates().is_empty());
    assert_eq!(ai.remaining(), 25);
}

#[test]
fn test_reset_forgets_everything() {
    let mut ai = TargetingAi::new(Difficulty::HuntTarget, 5);
    ai.record_result(Coord::new(2, 2), true);
    ai.record_result(Coord::new(0, 0), false);
    ai.reset();
    assert_eq!(ai.remaining(), 25);
    assert!(ai.candidates().is_empty());
    assert!(ai.hit_history().is_empty());
    assert_eq!(ai.difficulty(), Difficulty::HuntTarget);
    assert_eq!(ai.grid_size(), 5);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn never_fires_twice(seed in any::<u64>(), hunt in any::<bool>(), size in 3usize..=10) {
        let difficulty = if hunt { Difficulty::HuntTarget } else { Difficulty::Random };
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ai = TargetingAi::new(difficulty, size);
        // a diagonal of "ships" so both hits and misses show up
        let ships: HashSet<Coord> = (0..size).map(|i| Coord::new(i, i)).collect();

        let mut seen = HashSet::new();
        while let Some(target) = ai.next_target(&mut rng) {
            prop_assert!(target.in_bounds(size));
            prop_assert!(seen.insert(target), "repeated {}", target);
            ai.record_result(target, ships.contains(&target));
        }
        prop_assert_eq!(seen.len(), size * size);
    }

    /// With the first hit in the middle of a cruiser, every follow-up comes from
    /// the neighbourhood of its hit cells: two ship cells plus eight around them.
    #[test]
    fn hunt_target_sinks_from_middle_hit(seed in any::<u64>()) {
        let ship: HashSet<Coord> = horizontal(3, 5, 3).collect();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ai = TargetingAi::new(Difficulty::HuntTarget, 10);
        ai.record_result(Coord::new(4, 5), true);
        prop_assert!(shots_to_sink(&mut ai, &mut rng, &ship) <= 10);
    }
}
