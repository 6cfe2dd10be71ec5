use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use slither::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GameConfig, GridSize};
use slither::error::ReplayError;
use slither::replay::Replay;
use slither::snake::Position;
use tracing_subscriber::EnvFilter;

/// Runs a snake play-through headlessly and prints every step as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Replay file to run instead of the command-line settings.
    #[arg(long, conflicts_with_all = ["width", "height", "start_x", "start_y", "seed", "moves"])]
    replay: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Start column; defaults to the grid center.
    #[arg(long, allow_hyphen_values = true)]
    start_x: Option<i32>,

    /// Start row; defaults to the grid center.
    #[arg(long, allow_hyphen_values = true)]
    start_y: Option<i32>,

    /// Apple placement seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Moves as direction letters, e.g. `RRDDL`.
    #[arg(long, default_value = "")]
    moves: String,

    /// Print the replay record instead of running it.
    #[arg(long)]
    record: bool,
}

impl Cli {
    fn replay(&self) -> Result<Replay, ReplayError> {
        if let Some(path) = &self.replay {
            return Replay::load(path);
        }

        let config = GameConfig {
            start: Position::new(
                self.start_x.unwrap_or(i32::from(self.width / 2)),
                self.start_y.unwrap_or(i32::from(self.height / 2)),
            ),
            bounds: GridSize {
                width: self.width,
                height: self.height,
            },
            seed: self.seed,
        };
        config.validate()?;

        Ok(Replay::from_config(&config, Replay::parse_moves(&self.moves)?))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("slither: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ReplayError> {
    let replay = cli.replay()?;
    tracing::info!(seed = replay.seed, moves = replay.moves.len(), "loaded replay");

    let json = if cli.record {
        replay.to_json()?
    } else {
        serde_json::to_string_pretty(&replay.run()?)?
    };
    println!("{json}");

    Ok(())
}
