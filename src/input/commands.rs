//! # Command Definitions
//!
//! The abstract intent vocabulary and the single-slot input buffer.

use crate::game::Direction;
use crate::{DelverError, DelverResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One discrete player action, consumed by a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Step one cell in a cardinal direction
    Move(Direction),
    /// Strike every adjacent cell
    Attack,
}

impl Intent {
    pub const LEFT: Intent = Intent::Move(Direction::West);
    pub const UP: Intent = Intent::Move(Direction::North);
    pub const DOWN: Intent = Intent::Move(Direction::South);
    pub const RIGHT: Intent = Intent::Move(Direction::East);

    /// The lowercase name used by `FromStr` and `Display`.
    pub fn name(self) -> &'static str {
        match self {
            Intent::Move(Direction::West) => "left",
            Intent::Move(Direction::North) => "up",
            Intent::Move(Direction::South) => "down",
            Intent::Move(Direction::East) => "right",
            Intent::Attack => "attack",
        }
    }
}

impl FromStr for Intent {
    type Err = DelverError;

    /// Parses one of `left`, `up`, `down`, `right`, `attack`.
    ///
    /// # Examples
    ///
    /// ```
    /// use delver::Intent;
    ///
    /// assert_eq!("up".parse::<Intent>().unwrap(), Intent::UP);
    /// assert!("jump".parse::<Intent>().is_err());
    /// ```
    fn from_str(s: &str) -> DelverResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Intent::LEFT),
            "up" => Ok(Intent::UP),
            "down" => Ok(Intent::DOWN),
            "right" => Ok(Intent::RIGHT),
            "attack" => Ok(Intent::Attack),
            other => Err(DelverError::InvalidIntent(other.to_string())),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Holds at most one pending intent. A new submission overwrites an
/// unconsumed one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    pending: Option<Intent>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, intent: Intent) {
        if let Some(previous) = self.pending.replace(intent) {
            log::debug!("input {} replaced unconsumed {}", intent, previous);
        }
    }

    pub fn peek(&self) -> Option<Intent> {
        self.pending
    }

    pub fn take(&mut self) -> Option<Intent> {
        self.pending.take()
    }
}
