use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use log::info;
use snake_sim::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_TICK_INTERVAL_MS, GridSize,
    INPUT_POLL_INTERVAL_MS,
};
use snake_sim::driver::{Driver, DriverError, DriverSettings, run_script};
use snake_sim::input::{GameInput, InputHandler};
use snake_sim::terminal_runtime::{TerminalSession, install_panic_hook};

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a fixed grid")]
struct Cli {
    /// Board width in tiles (at least 3).
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Board height in tiles (at least 3).
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Milliseconds between simulation ticks (at least 1).
    #[arg(
        long = "tick-ms",
        default_value_t = DEFAULT_TICK_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    tick_ms: u64,

    /// Seed for fruit placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Play a move script without a terminal and print the final snapshot as JSON.
    #[arg(long, requires = "moves")]
    headless: bool,

    /// Move script for headless mode: U, D, L, R, S or `.` per tick.
    #[arg(long, requires = "headless")]
    moves: Option<String>,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let size = GridSize {
        width: cli.width,
        height: cli.height,
    };

    if cli.headless {
        return run_headless(size, cli.seed.unwrap_or_default(), cli.moves.as_deref());
    }

    let settings = DriverSettings {
        size,
        tick_interval: Duration::from_millis(cli.tick_ms),
        seed: cli.seed,
    };

    install_panic_hook();
    run(settings)
}

fn run_headless(size: GridSize, seed: u64, moves: Option<&str>) -> io::Result<()> {
    let snapshot = run_script(size, seed, moves.unwrap_or_default()).map_err(to_io_error)?;
    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
    println!("{json}");
    Ok(())
}

fn run(settings: DriverSettings) -> io::Result<()> {
    let mut driver = Driver::new(settings, Instant::now()).map_err(to_io_error)?;
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new(Duration::from_millis(INPUT_POLL_INTERVAL_MS));

    info!(
        "starting {}x{} board, tick every {:?}",
        settings.size.width,
        settings.size.height,
        driver.tick_interval()
    );

    loop {
        session.draw(&driver.snapshot(), driver.screen())?;

        if let Some(game_input) = input.poll_input()? {
            if matches!(game_input, GameInput::Quit) {
                break;
            }

            driver
                .handle_input(game_input, Instant::now())
                .map_err(to_io_error)?;
        }

        driver.update(Instant::now());
    }

    Ok(())
}

fn to_io_error(error: DriverError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error)
}
