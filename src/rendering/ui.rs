//! # User Interface Elements
//!
//! Window-independent pieces of the interface: tile colors, health bar
//! proportions, screen flashes, event messages, and end-of-game banners.

use crate::config::{ENEMY_HEALTH, HERO_MAX_HEALTH};
use crate::game::{GameEvent, Tile, TurnResult};
use macroquad::prelude::{Color, BLACK, BROWN, DARKGRAY, GOLD, GREEN, LIGHTGRAY, RED, SKYBLUE};

/// How long a screen flash stays visible, in seconds.
pub const FLASH_DURATION: f64 = 0.2;

/// Fill color of a cell.
pub fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::Wall => DARKGRAY,
        Tile::Floor => LIGHTGRAY,
        Tile::Sword => SKYBLUE,
        Tile::Potion => GOLD,
        Tile::Hero { .. } => GREEN,
        Tile::Enemy { .. } => BROWN,
    }
}

/// Health bar fill, as a fraction of the bar drawn over an actor tile.
///
/// Hero bars are measured against the hero's cap and enemy bars against the
/// starting enemy health. Other tiles have no bar.
pub fn health_fraction(tile: Tile) -> Option<f32> {
    let (health, max) = match tile {
        Tile::Hero { health } => (health, HERO_MAX_HEALTH),
        Tile::Enemy { health, .. } => (health, ENEMY_HEALTH),
        _ => return None,
    };
    Some((health as f32 / max as f32).clamp(0.0, 1.0))
}

/// What triggered a full-screen flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    /// The hero's attack connected
    Attack,
    /// The hero was struck
    Damage,
}

impl FlashKind {
    pub fn color(self) -> Color {
        match self {
            FlashKind::Attack => Color::new(1.0, 1.0, 1.0, 0.35),
            FlashKind::Damage => Color::new(1.0, 0.0, 0.0, 0.35),
        }
    }
}

/// Flash overlays on screen. Attack and damage flashes run independently, so
/// a turn that does both shows both.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Flash {
    attack_started: Option<f64>,
    damage_started: Option<f64>,
}

impl Flash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a flash of `kind` at time `now`, restarting it if it is running.
    pub fn trigger(&mut self, kind: FlashKind, now: f64) {
        match kind {
            FlashKind::Attack => self.attack_started = Some(now),
            FlashKind::Damage => self.damage_started = Some(now),
        }
    }

    /// The flashes to draw at time `now`, attack first.
    pub fn active(&self, now: f64) -> Vec<FlashKind> {
        [
            (FlashKind::Attack, self.attack_started),
            (FlashKind::Damage, self.damage_started),
        ]
        .into_iter()
        .filter_map(|(kind, started)| match started {
            Some(started) if now - started < FLASH_DURATION => Some(kind),
            _ => None,
        })
        .collect()
    }

    /// The flashes a batch of turn events calls for.
    pub fn kinds_for_events(events: &[GameEvent]) -> Vec<FlashKind> {
        let landed = events
            .iter()
            .any(|event| matches!(event, GameEvent::HeroAttacked { hits, .. } if *hits > 0));
        let hit = events
            .iter()
            .any(|event| matches!(event, GameEvent::HeroHit { .. }));

        let mut kinds = Vec::new();
        if landed {
            kinds.push(FlashKind::Attack);
        }
        if hit {
            kinds.push(FlashKind::Damage);
        }
        kinds
    }
}

/// One-line message for the log panel.
pub fn event_message(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::PotionConsumed { health, .. } => {
            Some(format!("You drink a potion. Health is now {}.", health))
        }
        GameEvent::SwordCollected { attack_power, .. } => {
            Some(format!("You pick up a sword. Attack is now {}.", attack_power))
        }
        GameEvent::HeroAttacked { hits: 0, .. } => Some("You swing at nothing.".to_string()),
        GameEvent::EnemyDefeated { .. } => Some("An enemy falls.".to_string()),
        GameEvent::HeroHit { damage, .. } => Some(format!("An enemy hits you for {}.", damage)),
        GameEvent::GameWon => Some(banner_text(TurnResult::Victory)?.to_string()),
        GameEvent::GameLost => Some(banner_text(TurnResult::Defeat)?.to_string()),
        _ => None,
    }
}

/// Text shown once the game has ended.
pub fn banner_text(result: TurnResult) -> Option<&'static str> {
    match result {
        TurnResult::Defeat => Some("Game over! Your hero has fallen."),
        TurnResult::Victory => Some("Victory! All enemies defeated."),
        TurnResult::NoOp | TurnResult::Continued => None,
    }
}

/// Banner text color.
pub fn banner_color(result: TurnResult) -> Color {
    match result {
        TurnResult::Defeat => RED,
        TurnResult::Victory => GREEN,
        TurnResult::NoOp | TurnResult::Continued => BLACK,
    }
}
