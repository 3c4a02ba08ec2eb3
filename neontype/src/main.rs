use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Mutex, mpsc};

use clap::Parser;
use keyflux::Difficulty;
use keyflux::timer::IntervalScheduler;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod error;
mod feedback;
mod game;
mod utils;

use app::App;
use config::{Overrides, Settings};
use error::AppError;
use game::Game;

/// A neon typing game for your terminal
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// Word difficulty: easy, medium or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Countdown length in seconds
    #[arg(short, long = "time")]
    time_limit: Option<u32>,

    /// Number of words kept ahead of the cursor
    #[arg(short, long = "words")]
    word_count: Option<usize>,

    /// Seed for the word generator
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding `settings.toml`
    #[arg(short, long = "config")]
    config_dir: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            difficulty: self.difficulty,
            time_limit: self.time_limit,
            word_count: self.word_count,
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let settings = Settings::load(cli.config_dir.clone(), &cli.overrides())?;
    info!(?settings, "Settings loaded");

    if cli.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let (tx, rx) = mpsc::channel();
    let game = Game::new(&settings, IntervalScheduler::new(tx))?;

    App::new(game, settings.theme, rx).run()?;

    Ok(())
}

/// Log to `path`. A TUI owns stdout, so logs never go there.
fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("neontype=debug,keyflux=debug")),
        )
        .try_init()?;

    Ok(())
}
