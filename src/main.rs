use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{ConfigError, GridSize, SimulationConfig};
use grid_snake::game::{GameState, GameStatus, TickError, TickOutcome};
use grid_snake::input::{self, GameInput};
use grid_snake::renderer;
use grid_snake::terminal_runtime::{restore_terminal, TerminalSession};
use log::info;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playfield width in units (defaults to the terminal width).
    #[arg(long)]
    width: Option<u16>,

    /// Playfield height in units (defaults to the terminal height).
    #[arg(long)]
    height: Option<u16>,

    /// Edge length of one segment in units.
    #[arg(long = "segment-size")]
    segment_size: Option<u16>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Number of food items kept on the board.
    #[arg(long = "food-count")]
    food_count: Option<usize>,

    /// Allow turning straight back into the body.
    #[arg(long = "allow-reversal")]
    allow_reversal: bool,

    /// Never spawn food under the snake.
    #[arg(long = "avoid-occupied-cells")]
    avoid_occupied_cells: bool,

    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Write log records to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error(
        "playfield needs a {needed_columns}x{needed_rows} terminal, window is {columns}x{rows}"
    )]
    PlayfieldTooLarge {
        needed_columns: u16,
        needed_rows: u16,
        columns: u16,
        rows: u16,
    },
    #[error(transparent)]
    Tick(#[from] TickError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    init_logging(cli.log_file.as_deref())?;

    let config = build_config(&cli)?;
    ensure_fits_terminal(&config)?;
    info!(
        "starting {}x{} playfield, segment {}, tick {}ms",
        config.bounds.width, config.bounds.height, config.segment_size, config.tick_interval_ms
    );

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    };

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    game_loop(&mut session, state)
}

fn init_logging(path: Option<&Path>) -> Result<(), AppError> {
    // stderr belongs to the alternate screen, so records only go to a file.
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;

    Ok(())
}

fn build_config(cli: &Cli) -> Result<SimulationConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(segment_size) = cli.segment_size {
        config.segment_size = segment_size;
    }

    if cli.config.is_none() && cli.width.is_none() && cli.height.is_none() {
        config.bounds = terminal_bounds(config.segment_size)?;
    }
    if let Some(width) = cli.width {
        config.bounds.width = width;
    }
    if let Some(height) = cli.height {
        config.bounds.height = height;
    }

    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if let Some(food_count) = cli.food_count {
        config.food_count = food_count;
    }
    config.allow_reversal |= cli.allow_reversal;
    config.avoid_occupied_cells |= cli.avoid_occupied_cells;

    config.validate()?;
    Ok(config)
}

/// Largest playfield whose grid fits the current terminal.
fn terminal_bounds(segment_size: u16) -> io::Result<GridSize> {
    let (columns, rows) = crossterm::terminal::size()?;
    Ok(renderer::playfield_for_terminal(columns, rows, segment_size))
}

fn ensure_fits_terminal(config: &SimulationConfig) -> Result<(), AppError> {
    let (columns, rows) = crossterm::terminal::size()?;
    let (needed_columns, needed_rows) =
        renderer::required_terminal_size(config.bounds, config.segment_size);

    if needed_columns > columns || needed_rows > rows {
        return Err(AppError::PlayfieldTooLarge {
            needed_columns,
            needed_rows,
            columns,
            rows,
        });
    }

    Ok(())
}

fn game_loop(session: &mut TerminalSession, mut state: GameState) -> Result<(), AppError> {
    let tick_interval = Duration::from_millis(state.config().tick_interval_ms);
    let mut last_tick = Instant::now();

    loop {
        session.draw(|frame| renderer::render(frame, &state))?;

        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if let Some(game_input) = input::poll_input(timeout)? {
            if matches!(game_input, GameInput::Quit) {
                break;
            }

            if handle_input(&mut state, game_input) {
                last_tick = Instant::now();
            }
        }

        if state.status() == GameStatus::Running && last_tick.elapsed() >= tick_interval {
            if let TickOutcome::Terminated {
                final_score,
                reason,
            } = state.tick()?
            {
                info!("run ended ({reason:?}) with score {final_score}");
            }
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Returns true when the input started a new run.
fn handle_input(state: &mut GameState, input: GameInput) -> bool {
    match input {
        GameInput::Restart if state.status() == GameStatus::Terminated => {
            state.apply_input(input);
            true
        }
        GameInput::Restart => false,
        other => {
            state.apply_input(other);
            false
        }
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
