#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use fleetfire::{
    cli::{self, Command},
    init_logging, sim, Difficulty, GameConfig, GameEngine, GameEvent, GameState,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum Level {
    Random,
    HuntTarget,
}

#[cfg(feature = "std")]
impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Random => Difficulty::Random,
            Level::HuntTarget => Difficulty::HuntTarget,
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10)]
        grid_size: usize,
        #[arg(long, value_enum, default_value_t = Level::HuntTarget)]
        difficulty: Level,
        #[arg(long, default_value_t = 800, help = "Pause before the computer fires")]
        ai_delay_ms: u64,
    },
    /// Run unattended games and print a JSON report.
    Sim {
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[arg(long, default_value_t = 10)]
        grid_size: usize,
        #[arg(long, value_enum, default_value_t = Level::HuntTarget)]
        difficulty: Level,
        #[arg(long, value_enum, default_value_t = Level::Random, help = "Strategy standing in for the human")]
        autopilot: Level,
    },
}

#[cfg(feature = "std")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            grid_size,
            difficulty,
            ai_delay_ms,
        } => {
            let config = GameConfig::default()
                .with_grid_size(grid_size)
                .with_difficulty(difficulty.into());
            let rng = if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            let mut engine = GameEngine::new(config, rng).map_err(|e| anyhow::anyhow!(e))?;
            engine.subscribe(|event: &GameEvent| println!("{}", cli::describe_event(event)));
            engine
                .use_default_layout()
                .map_err(|e| anyhow::anyhow!(e))?;
            run_terminal(engine, Duration::from_millis(ai_delay_ms)).await?;
        }
        Commands::Sim {
            seed,
            games,
            grid_size,
            difficulty,
            autopilot,
        } => {
            let config = GameConfig::default()
                .with_grid_size(grid_size)
                .with_difficulty(difficulty.into());
            let report = sim::simulate(&config, autopilot.into(), seed, games)
                .map_err(|e| anyhow::anyhow!(e))?;
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn run_terminal(mut engine: GameEngine, ai_delay: Duration) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let size = engine.grid_size();
    println!("{}", cli::HELP);

    loop {
        match engine.state() {
            GameState::PlacingShips => {
                println!("\nYour fleet:\n{}", cli::render_sea(engine.player_sea(), true));
                print!("{}", cli::render_fleet(engine.player_sea()));
                println!("setup> ");
            }
            GameState::PlayerTurn => {
                println!("\n{}", cli::render_game(&engine));
                println!("fire> ");
            }
            GameState::AiTurn => {
                // pacing only; the engine itself never waits
                tokio::time::sleep(ai_delay).await;
                let (target, result) = engine.run_ai_turn().map_err(|e| anyhow::anyhow!(e))?;
                log::debug!(
                    "computer: {} -> {}",
                    cli::coord_to_string(target),
                    cli::describe_result(&result)
                );
                continue;
            }
            GameState::GameOver { .. } => break,
        }

        let Some(line) = lines.next_line().await? else {
            println!("Input closed, leaving the game.");
            return Ok(());
        };
        let Some(command) = cli::parse_command(&line, size) else {
            println!("Unrecognised input. Type `help` for commands.");
            continue;
        };
        let outcome = match command {
            Command::Quit => return Ok(()),
            Command::Help => {
                println!("{}", cli::HELP);
                Ok(())
            }
            Command::Auto => engine.randomize_player_fleet(),
            Command::Default => engine.use_default_layout(),
            Command::Clear => engine.clear_player_fleet(),
            Command::Place {
                length,
                orientation,
                anchor,
            } => engine.place_ship(length, orientation, anchor).map(|_| ()),
            Command::Move { ship, anchor } => engine.move_ship(ship, anchor),
            Command::Rotate { ship } => engine.rotate_ship(ship),
            Command::Start => engine.start_game(),
            Command::Fire(coord) => engine.fire_at(coord).map(|_| ()),
        };
        if let Err(e) = outcome {
            println!("{}", e);
        }
    }

    println!("\n{}", cli::render_game(&engine));
    Ok(())
}
