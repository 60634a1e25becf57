use anyhow::Result;
use clap::Parser;
use log::info;

use snakepit::game::{GameConfig, GameStatus, Policy, RandomWalker, TurnEngine};

#[derive(Parser)]
#[command(name = "snakepit")]
#[command(version, about = "Headless multi-snake arena simulation")]
struct Cli {
    /// Board width
    #[arg(long, default_value = "20")]
    width: u32,

    /// Board height
    #[arg(long, default_value = "20")]
    height: u32,

    /// Total number of snakes, the player snake included
    #[arg(long, default_value = "5")]
    snakes: u32,

    /// Target number of food items on the board
    #[arg(long, default_value = "3")]
    food: u32,

    /// Health restored per food item
    #[arg(long, default_value = "100")]
    food_score: i32,

    /// Health spent per move
    #[arg(long, default_value = "1")]
    move_cost: i32,

    /// Starting health (0 uses the built-in default)
    #[arg(long, default_value = "0")]
    health: i32,

    /// Seed for reproducible runs; omit for a random session
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many rounds even if the player is still alive
    #[arg(long, default_value = "1000")]
    rounds: u32,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    let config = GameConfig {
        width: cli.width,
        height: cli.height,
        snake_count: cli.snakes,
        food_count: cli.food,
        food_score: cli.food_score,
        move_cost: cli.move_cost,
        starting_health: cli.health,
    };

    let mut engine = match cli.seed {
        Some(seed) => TurnEngine::with_seed(config, seed)?,
        None => TurnEngine::new(config)?,
    };
    let mut session = engine.reset();

    // No keyboard here: an autonomous walker stands in for the player and
    // feeds the intent queue the way an input adapter would.
    let mut autopilot = RandomWalker::with_seed(cli.seed.unwrap_or(0).wrapping_add(1));

    for _ in 0..cli.rounds {
        let snapshot = session.snapshot();
        if let Some(you) = snapshot.snake(session.primary()) {
            if let Some(direction) = autopilot.decide(&snapshot, you) {
                session.push_intent(direction);
            }
        }

        let report = engine.advance_round(&mut session)?;
        for id in &report.eliminated {
            info!("round {}: {} eliminated", report.turn, id);
        }
        if report.terminated {
            break;
        }
    }

    let snapshot = session.snapshot();
    match session.status() {
        GameStatus::Ended { reason } => {
            println!("{} after {} turns", reason, session.turn());
        }
        GameStatus::Running => {
            println!(
                "stopped while still running after {} turns, {} snakes left",
                session.turn(),
                session.live_count()
            );
        }
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(())
}
