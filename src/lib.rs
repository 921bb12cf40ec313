//! # Delver
//!
//! A single-level roguelike: a procedurally generated room-and-corridor dungeon
//! and a turn engine that plays a hero against a pack of chasing enemies.
//!
//! ## Architecture Overview
//!
//! - **Game**: the tile grid, the entity rosters, and the per-turn state machine
//! - **Generation**: rooms, corridors, passages, and entity scattering
//! - **Input**: the five-intent vocabulary and keyboard mapping
//! - **Rendering**: a thin macroquad front end that reads session snapshots
//!
//! The core (`game` and `generation`) never touches the window, the keyboard,
//! or the clock. The front end buffers intents, calls [`GameSession::tick`] at
//! a fixed cadence, and draws whatever the session exposes between ticks.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;

pub use game::{
    Direction, Enemy, GameEvent, GameSession, GameStatistics, Grid, Hero, Level, PickupKind,
    Position, Tile, TileKind, TurnResult,
};

pub use generation::{
    generate_level, DungeonGenerator, GenerationConfig, Generator, RandomSource, Room,
};

pub use input::{InputBuffer, Intent};

/// Core error type for the Delver engine.
#[derive(thiserror::Error, Debug)]
pub enum DelverError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation configuration cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Intent name is not part of the input vocabulary
    #[error("Invalid intent: {0}")]
    InvalidIntent(String),
}

/// Result type used throughout the Delver codebase.
pub type DelverResult<T> = Result<T, DelverError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gameplay rule constants.
pub mod config {
    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: u32 = 40;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: u32 = 24;

    /// Hero starting health, also the heal ceiling
    pub const HERO_MAX_HEALTH: i32 = 100;

    /// Hero starting attack power
    pub const HERO_BASE_ATTACK: i32 = 20;

    /// Health of a freshly spawned enemy
    pub const ENEMY_HEALTH: i32 = 100;

    /// Damage an adjacent enemy deals per turn
    pub const ENEMY_ATTACK: i32 = 5;

    /// Health restored by a potion
    pub const POTION_HEAL: i32 = 20;

    /// Attack power granted by a sword
    pub const SWORD_BONUS: i32 = 10;

    /// Default real-time interval between turns, in milliseconds
    pub const DEFAULT_TURN_INTERVAL_MS: u64 = 100;
}
