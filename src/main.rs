use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use chroma_snake::config::{FoodPolicy, ScoringRule, SimConfig, user_config_path};
use chroma_snake::error::{AppError, ConfigError};
use chroma_snake::game::{Flow, GameState};
use chroma_snake::input::InputQueue;
use chroma_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use chroma_snake::timing::tick_interval;
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info};
use simplelog::WriteLogger;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScoringArg {
    /// Ten points per food.
    Flat,
    /// Five points plus a bonus that grows with color-matched streaks.
    Streak,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FoodArg {
    /// One replacement per food eaten.
    Single,
    /// One to three new items per food eaten.
    Burst,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file. Defaults to the per-user config when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Maximum number of food items on the board.
    #[arg(long = "max-foods")]
    max_foods: Option<usize>,

    #[arg(long, value_enum)]
    scoring: Option<ScoringArg>,

    #[arg(long, value_enum)]
    food: Option<FoodArg>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file. Logging is off otherwise.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,

    /// Print the effective config as JSON and exit.
    #[arg(long = "print-config")]
    print_config: bool,
}

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        WriteLogger::init(
            cli.log_level,
            simplelog::Config::default(),
            File::create(path)?,
        )?;
    }

    let config = resolve_config(&cli)?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    };

    install_panic_hook();
    run(state)
}

fn resolve_config(cli: &Cli) -> Result<SimConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::from_path(path)?,
        None => match user_config_path().filter(|path| path.is_file()) {
            Some(path) => {
                info!("loading config from {}", path.display());
                SimConfig::from_path(&path)?
            }
            None => SimConfig::default(),
        },
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(max_foods) = cli.max_foods {
        config.max_foods = max_foods;
    }
    match cli.scoring {
        Some(ScoringArg::Flat) => config.scoring = ScoringRule::Flat { points: 10 },
        Some(ScoringArg::Streak) => config.scoring = ScoringRule::default(),
        None => {}
    }
    match cli.food {
        Some(FoodArg::Single) => config.food_policy = FoodPolicy::Single,
        Some(FoodArg::Burst) => config.food_policy = FoodPolicy::default(),
        None => {}
    }

    config.validate()?;
    Ok(config)
}

fn run(mut state: GameState) -> Result<(), AppError> {
    let mut session = TerminalSession::enter()?;
    let mut queue = InputQueue::new();
    info!(
        "starting {}x{} game",
        state.bounds().width,
        state.bounds().height
    );

    loop {
        session.draw(&state.snapshot())?;

        let deadline = Instant::now() + tick_interval(state.status, state.speed_level());
        if session.collect_inputs(&mut queue, deadline)? == Flow::Quit {
            break;
        }

        if state.step(queue.drain()) == Flow::Quit {
            break;
        }
    }

    info!("final score {}", state.score());
    Ok(())
}
