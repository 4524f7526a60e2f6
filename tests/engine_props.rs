use fleetfire::{
    Difficulty, EventLog, GameConfig, GameEngine, GameEvent, GameState, Side, Targeting,
    TargetingAi,
};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![Just(Difficulty::Random), Just(Difficulty::HuntTarget)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_game_ends_exactly_once(
        seed in any::<u64>(),
        computer in difficulty(),
        pilot_level in difficulty(),
        grid_size in 7usize..=10,
    ) {
        let config = GameConfig::default()
            .with_grid_size(grid_size)
            .with_difficulty(computer);
        let mut engine = GameEngine::with_seed(config, seed).unwrap();
        let log = EventLog::new();
        engine.subscribe(log.clone());
        engine.randomize_player_fleet().unwrap();
        engine.start_game().unwrap();

        let mut pilot = TargetingAi::new(pilot_level, grid_size);
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);
        let cells = grid_size * grid_size;
        let (mut player_shots, mut computer_shots) = (0, 0);

        while !engine.is_over() {
            match engine.state() {
                GameState::PlayerTurn => {
                    let target = pilot.next_target(&mut rng).unwrap();
                    let result = engine.fire_at(target).unwrap();
                    pilot.record_result(target, result.is_hit());
                    prop_assert_eq!(engine.player_shots(), player_shots + 1);
                    player_shots += 1;
                }
                GameState::AiTurn => {
                    engine.run_ai_turn().unwrap();
                    prop_assert_eq!(engine.computer_shots(), computer_shots + 1);
                    computer_shots += 1;
                }
                other => prop_assert!(false, "unexpected state {:?}", other),
            }
            prop_assert!(player_shots <= cells && computer_shots <= cells);
        }

        let player_wins = engine.outcome().unwrap();
        let loser = if player_wins { Side::Opponent } else { Side::Player };
        prop_assert!(engine.sea(loser).fleet().all_sunk());
        prop_assert!(!engine.sea(loser.other()).fleet().all_sunk());

        let overs: Vec<_> = log
            .events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        prop_assert_eq!(overs, vec![GameEvent::GameOver { player_wins }]);
    }

    #[test]
    fn shot_marks_never_revert(seed in any::<u64>()) {
        let mut engine = GameEngine::with_seed(GameConfig::default(), seed).unwrap();
        engine.randomize_player_fleet().unwrap();
        engine.start_game().unwrap();
        let mut pilot = TargetingAi::new(Difficulty::Random, 10);
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));

        for _ in 0..30 {
            if engine.is_over() {
                break;
            }
            let marked_before = engine.player_sea().board().hits().union(
                engine.player_sea().board().misses(),
            ).unwrap();
            let target = pilot.next_target(&mut rng).unwrap();
            let result = engine.fire_at(target).unwrap();
            pilot.record_result(target, result.is_hit());
            if !engine.is_over() {
                engine.run_ai_turn().unwrap();
            }
            for cell in marked_before.iter_set() {
                let state = engine.shot_state(Side::Player, cell).unwrap();
                prop_assert_ne!(state, fleetfire::ShotState::Untried);
            }
        }
    }
}
