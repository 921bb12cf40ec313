//! # Display Management
//!
//! Draws a [`GameSession`] snapshot with macroquad: the tile grid, actor health
//! bars, the status panel, the message log, flash overlays, and the
//! end-of-game banner.

use crate::game::{GameEvent, GameSession, Position, Tile, TurnResult};
use crate::rendering::{
    banner_color, banner_text, event_message, health_fraction, tile_color, Flash,
};
use macroquad::prelude::*;

/// Width of the status panel right of the map, in pixels.
pub const UI_PANEL_WIDTH: f32 = 260.0;

/// Height of the message area under the map, in pixels.
pub const MESSAGE_AREA_HEIGHT: f32 = 80.0;

/// Largest tile edge that fits a `width` x `height` grid into the map area.
///
/// Never smaller than one pixel.
pub fn fit_tile_size(screen_width: f32, screen_height: f32, width: u32, height: u32) -> f32 {
    let map_width = (screen_width - UI_PANEL_WIDTH).max(0.0);
    let map_height = (screen_height - MESSAGE_AREA_HEIGHT).max(0.0);
    let by_width = map_width / width.max(1) as f32;
    let by_height = map_height / height.max(1) as f32;
    by_width.min(by_height).floor().max(1.0)
}

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Flash overlay state
    pub flash: Flash,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadDisplay {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_messages: 100,
            flash: Flash::new(),
        }
    }

    /// Feeds one tick's events into the message log and flash state.
    pub fn handle_events(&mut self, events: &[GameEvent], now: f64) {
        for kind in Flash::kinds_for_events(events) {
            self.flash.trigger(kind, now);
        }
        for message in events.iter().filter_map(event_message) {
            self.add_message(message);
        }
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    /// Renders the complete game screen.
    pub fn render(&self, session: &GameSession, now: f64) {
        clear_background(BLACK);

        let grid = session.grid();
        let tile_size = fit_tile_size(screen_width(), screen_height(), grid.width(), grid.height());

        self.render_map(session, tile_size);
        self.render_panel(session, grid.width() as f32 * tile_size + 10.0);
        self.render_messages();

        for kind in self.flash.active(now) {
            draw_rectangle(0.0, 0.0, screen_width(), screen_height(), kind.color());
        }

        if let Some(outcome) = session.outcome() {
            self.render_banner(outcome);
        }
    }

    fn render_map(&self, session: &GameSession, tile_size: f32) {
        let grid = session.grid();

        for pos in grid.positions() {
            let tile = grid.get(pos);
            let (x, y) = screen_coordinates(pos, tile_size);
            draw_rectangle(x, y, tile_size - 1.0, tile_size - 1.0, tile_color(tile));

            if let Some(fraction) = health_fraction(tile) {
                self.render_health_bar(x, y, tile_size, fraction, tile);
            }
        }
    }

    /// Draws a bar along the top edge of an actor tile.
    fn render_health_bar(&self, x: f32, y: f32, tile_size: f32, fraction: f32, tile: Tile) {
        let bar_height = (tile_size / 6.0).max(2.0);
        let fill = if matches!(tile, Tile::Hero { .. }) {
            LIME
        } else {
            RED
        };
        draw_rectangle(x, y, tile_size - 1.0, bar_height, Color::new(0.0, 0.0, 0.0, 0.6));
        draw_rectangle(x, y, (tile_size - 1.0) * fraction, bar_height, fill);
    }

    fn render_panel(&self, session: &GameSession, panel_x: f32) {
        let mut line_y = 24.0;
        let line_height = 20.0;
        let hero = session.hero();
        let stats = session.statistics();

        draw_text("DELVER", panel_x, line_y, 26.0, WHITE);
        line_y += line_height * 2.0;

        let lines = [
            (format!("Health: {}", hero.health), WHITE),
            (format!("Attack: {}", hero.attack_power), WHITE),
            (format!("Enemies left: {}", session.enemies().len()), WHITE),
            (format!("Turn: {}", session.turn_number()), WHITE),
            (String::new(), WHITE),
            ("Statistics:".to_string(), SKYBLUE),
            (format!("Steps: {}", stats.steps_taken), WHITE),
            (format!("Defeated: {}", stats.enemies_defeated), WHITE),
            (format!("Potions: {}", stats.potions_consumed), WHITE),
            (format!("Swords: {}", stats.swords_collected), WHITE),
            (format!("Damage dealt: {}", stats.damage_dealt), WHITE),
            (format!("Damage taken: {}", stats.damage_taken), WHITE),
            (String::new(), WHITE),
            ("Controls:".to_string(), GREEN),
            ("WASD/Arrow keys: Move".to_string(), WHITE),
            ("SPACE: Attack".to_string(), WHITE),
            ("ESC: Quit".to_string(), WHITE),
        ];

        for (text, color) in &lines {
            draw_text(text, panel_x, line_y, 18.0, *color);
            line_y += line_height;
        }
    }

    /// Renders the message area.
    fn render_messages(&self) {
        let message_area_y = screen_height() - MESSAGE_AREA_HEIGHT + 20.0;
        let message_count = 3;
        let line_height = 18.0;

        draw_rectangle(
            0.0,
            message_area_y - 20.0,
            screen_width(),
            MESSAGE_AREA_HEIGHT,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );

        let start_index = self.messages.len().saturating_sub(message_count);
        for (i, message) in self.messages.iter().skip(start_index).enumerate() {
            let y = message_area_y + i as f32 * line_height;
            draw_text(message, 10.0, y, 16.0, WHITE);
        }
    }

    fn render_banner(&self, outcome: TurnResult) {
        let Some(text) = banner_text(outcome) else {
            return;
        };

        let font_size = 40.0;
        let dims = measure_text(text, None, font_size as u16, 1.0);
        let x = (screen_width() - dims.width) / 2.0;
        let y = screen_height() / 2.0;

        draw_rectangle(
            x - 20.0,
            y - dims.height - 20.0,
            dims.width + 40.0,
            dims.height + 40.0,
            Color::new(0.0, 0.0, 0.0, 0.85),
        );
        draw_text(text, x, y, font_size, banner_color(outcome));
    }
}

fn screen_coordinates(pos: Position, tile_size: f32) -> (f32, f32) {
    (pos.x as f32 * tile_size, pos.y as f32 * tile_size)
}
