//! # Rendering Module
//!
//! Macroquad front end. It only reads session snapshots and drained events;
//! nothing in here changes game state.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
