#![cfg(feature = "std")]
//! Unattended games: the human side is played by a second targeting AI.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use std::vec::Vec;

use crate::{
    ai::{Targeting, TargetingAi},
    common::{Action, GameError},
    config::{Difficulty, GameConfig},
    game::{GameEngine, GameState},
};

/// Result of one simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub seed: u64,
    pub player_wins: bool,
    pub player_shots: usize,
    pub computer_shots: usize,
}

/// Aggregate over a batch of simulated games.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub grid_size: usize,
    pub computer: Difficulty,
    pub autopilot: Difficulty,
    pub games: usize,
    pub player_wins: usize,
    pub computer_wins: usize,
    pub mean_player_shots: f64,
    pub mean_computer_shots: f64,
    pub results: Vec<GameSummary>,
}

/// Play one game to completion. Both fleets are random; the player's shots
/// come from a `TargetingAi` of difficulty `autopilot`.
pub fn play_auto_game(
    config: &GameConfig,
    autopilot: Difficulty,
    seed: u64,
) -> Result<GameSummary, GameError> {
    let mut engine = GameEngine::with_seed(config.clone(), seed)?;
    let mut pilot = TargetingAi::new(autopilot, config.grid_size);
    let mut pilot_rng = SmallRng::seed_from_u64(seed.wrapping_add(1));

    engine.randomize_player_fleet()?;
    engine.start_game()?;

    loop {
        match engine.state() {
            GameState::PlayerTurn => {
                let target = pilot
                    .next_target(&mut pilot_rng)
                    .ok_or(GameError::NoTargetsLeft)?;
                let result = engine.fire_at(target)?;
                pilot.record_result(target, result.is_hit());
            }
            GameState::AiTurn => {
                engine.run_ai_turn()?;
            }
            GameState::GameOver { player_wins } => {
                return Ok(GameSummary {
                    seed,
                    player_wins,
                    player_shots: engine.player_shots(),
                    computer_shots: engine.computer_shots(),
                });
            }
            GameState::PlacingShips => {
                return Err(GameError::IllegalStateTransition {
                    state: GameState::PlacingShips,
                    action: Action::FireAt,
                })
            }
        }
    }
}

/// Play `games` games with seeds `seed, seed + 1, ...`.
pub fn simulate(
    config: &GameConfig,
    autopilot: Difficulty,
    seed: u64,
    games: usize,
) -> Result<SimReport, GameError> {
    let mut results = Vec::with_capacity(games);
    for i in 0..games {
        let game_seed = seed.wrapping_add(i as u64);
        let summary = play_auto_game(config, autopilot, game_seed)?;
        log::debug!("sim game {} (seed {}): {:?}", i, game_seed, summary);
        results.push(summary);
    }
    let player_wins = results.iter().filter(|r| r.player_wins).count();
    let mean = |f: fn(&GameSummary) -> usize| {
        if results.is_empty() {
            0.0
        } else {
            results.iter().map(f).sum::<usize>() as f64 / results.len() as f64
        }
    };
    Ok(SimReport {
        grid_size: config.grid_size,
        computer: config.difficulty,
        autopilot,
        games,
        player_wins,
        computer_wins: games - player_wins,
        mean_player_shots: mean(|r| r.player_shots),
        mean_computer_shots: mean(|r| r.computer_shots),
        results,
    })
}
