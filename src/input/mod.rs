//! # Input Module
//!
//! Keyboard handling that turns key presses into [`Intent`]s for the session.
//!
//! Letter keys are read as characters so that both the Latin and the Russian
//! layout positions of `WASD` work without switching the keyboard layout.

pub mod commands;

pub use commands::*;

use macroquad::prelude::*;

/// Things the front end can ask for besides game intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Buffer an intent for the next turn
    Intent(Intent),
    /// Quit the game
    Quit,
}

/// Maps a typed character to an intent.
///
/// # Examples
///
/// ```
/// use delver::{intent_from_char, Intent};
///
/// assert_eq!(intent_from_char('w'), Some(Intent::UP));
/// assert_eq!(intent_from_char('Ц'), Some(Intent::UP));
/// assert_eq!(intent_from_char('q'), None);
/// ```
pub fn intent_from_char(c: char) -> Option<Intent> {
    match c {
        'a' | 'A' | 'ф' | 'Ф' => Some(Intent::LEFT),
        'w' | 'W' | 'ц' | 'Ц' => Some(Intent::UP),
        's' | 'S' | 'ы' | 'Ы' => Some(Intent::DOWN),
        'd' | 'D' | 'в' | 'В' => Some(Intent::RIGHT),
        ' ' => Some(Intent::Attack),
        _ => None,
    }
}

/// Input handler for the macroquad window.
pub struct InputHandler {
    /// Whether arrow keys move the hero as well
    pub arrow_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self {
            arrow_keys_enabled: true,
        }
    }

    /// Gets the most recent input of this frame, if any.
    ///
    /// Several presses in one frame collapse to the last one, matching the
    /// single-slot buffer the session keeps.
    pub fn get_input(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Escape) {
            return Some(PlayerInput::Quit);
        }

        let mut latest = None;
        while let Some(c) = get_char_pressed() {
            if let Some(intent) = intent_from_char(c) {
                latest = Some(PlayerInput::Intent(intent));
            }
        }
        if latest.is_some() {
            return latest;
        }

        if self.arrow_keys_enabled {
            let arrows = [
                (KeyCode::Left, Intent::LEFT),
                (KeyCode::Up, Intent::UP),
                (KeyCode::Down, Intent::DOWN),
                (KeyCode::Right, Intent::RIGHT),
            ];
            for (key, intent) in arrows {
                if is_key_pressed(key) {
                    return Some(PlayerInput::Intent(intent));
                }
            }
        }

        None
    }
}
