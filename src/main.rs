//! # Delver Main Entry Point
//!
//! Generates a level, sets up macroquad rendering, and runs the real-time
//! loop that buffers input and ticks the session at a fixed cadence.

use clap::Parser;
use delver::{
    DelverError, DelverResult, GameSession, GenerationConfig, InputHandler, MacroquadDisplay,
    PlayerInput, TurnResult,
};
use std::path::PathBuf;

/// Command line arguments for Delver.
#[derive(Parser, Debug)]
#[command(name = "delver")]
#[command(about = "A single-level roguelike with procedural dungeons and turn-based melee")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Dungeon width in tiles
    #[arg(long)]
    width: Option<u32>,

    /// Dungeon height in tiles
    #[arg(long)]
    height: Option<u32>,

    /// JSON file with generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Milliseconds between turns
    #[arg(long, default_value_t = delver::config::DEFAULT_TURN_INTERVAL_MS)]
    tick_ms: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Builds the generation config: file first, then command-line overrides.
    fn generation_config(&self) -> DelverResult<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_json_file(path)?,
            None => GenerationConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }

        config.validate()?;
        Ok(config)
    }
}

fn window_conf() -> macroquad::window::Conf {
    macroquad::window::Conf {
        window_title: "Delver".to_string(),
        window_width: 1024,
        window_height: 768,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> DelverResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    log::info!("Starting Delver v{}", delver::VERSION);

    let config = args.generation_config()?;
    run_game(&args, &config).await
}

/// Initializes env_logger at the requested level.
///
/// `RUST_LOG` still takes precedence when it is set.
fn initialize_logging(log_level: &str) -> DelverResult<()> {
    let level: log::LevelFilter = log_level.parse().map_err(|_| {
        DelverError::InvalidConfig(format!("unknown log level '{}'", log_level))
    })?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();

    Ok(())
}

/// Main game loop implementation.
async fn run_game(args: &Args, config: &GenerationConfig) -> DelverResult<()> {
    log::info!(
        "Generating {}x{} dungeon with seed {}",
        config.width,
        config.height,
        config.seed
    );
    let mut session = GameSession::generate(config)?;

    let input_handler = InputHandler::new();
    let mut display = MacroquadDisplay::new();
    display.add_message("Find and defeat every enemy.".to_string());
    display.add_message("WASD/arrows move, SPACE attacks all around you.".to_string());

    let interval = args.tick_ms as f64 / 1000.0;
    let mut last_tick = macroquad::time::get_time();
    let mut announced = false;

    loop {
        match input_handler.get_input() {
            Some(PlayerInput::Quit) => {
                log::info!("Player quit the game");
                break;
            }
            Some(PlayerInput::Intent(intent)) => session.submit_input(intent),
            None => {}
        }

        let now = macroquad::time::get_time();
        if now - last_tick >= interval {
            last_tick = now;
            let result = session.tick();
            let events = session.take_events();
            display.handle_events(&events, now);

            if result.is_terminal() && !announced {
                announced = true;
                match result {
                    TurnResult::Victory => {
                        log::info!("Victory after {} turns", session.turn_number());
                    }
                    _ => {
                        log::info!("Defeat after {} turns", session.turn_number());
                    }
                }
            }
        }

        display.render(&session, now);

        macroquad::window::next_frame().await;
    }

    log::info!("Game loop ended");
    Ok(())
}
