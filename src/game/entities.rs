//! # Entities
//!
//! The hero, enemies, and pickup kinds that live on a level.

use crate::config::{ENEMY_ATTACK, ENEMY_HEALTH, HERO_BASE_ATTACK, HERO_MAX_HEALTH};
use crate::game::Position;
use serde::{Deserialize, Serialize};

/// The player-controlled hero.
///
/// Health is clamped to [`HERO_MAX_HEALTH`] when healing but not when taking
/// damage, so it can drop below zero before the defeat check runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub position: Position,
    pub health: i32,
    pub attack_power: i32,
}

impl Hero {
    /// Creates a hero at full health with base attack power.
    ///
    /// # Examples
    ///
    /// ```
    /// use delver::{Hero, Position};
    ///
    /// let hero = Hero::new(Position::new(3, 3));
    /// assert_eq!(hero.health, 100);
    /// assert_eq!(hero.attack_power, 20);
    /// ```
    pub fn new(position: Position) -> Self {
        Self {
            position,
            health: HERO_MAX_HEALTH,
            attack_power: HERO_BASE_ATTACK,
        }
    }

    /// Restores health, never above the maximum.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(HERO_MAX_HEALTH);
    }

    /// Applies damage without clamping.
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new(Position::origin())
    }
}

/// An autonomous enemy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub position: Position,
    pub health: i32,
    pub attack_power: i32,
}

impl Enemy {
    /// Creates a freshly spawned enemy.
    pub fn new(position: Position) -> Self {
        Self::with_health(position, ENEMY_HEALTH)
    }

    /// Creates an enemy with custom health and the fixed attack power.
    pub fn with_health(position: Position, health: i32) -> Self {
        Self {
            position,
            health,
            attack_power: ENEMY_ATTACK,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Consumable items lying on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Adds attack power
    Sword,
    /// Restores health
    Potion,
}
