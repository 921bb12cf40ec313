//! # Hero Actions
//!
//! Resolution of the hero's buffered intent: a single cardinal step, or an
//! attack on every adjacent enemy at once.

use crate::game::{Direction, GameEvent, Level, PickupKind, TileKind};
use crate::input::Intent;

/// Resolves one hero intent against the level, recording what happened.
pub fn resolve_intent(level: &mut Level, intent: Intent, events: &mut Vec<GameEvent>) {
    match intent {
        Intent::Move(direction) => {
            move_hero(level, direction, events);
        }
        Intent::Attack => {
            hero_attack(level, events);
        }
    }
}

/// Steps the hero one cell in `direction`.
///
/// The step happens only if the destination is walkable and not held by an
/// enemy. Returns whether the hero moved.
pub fn move_hero(level: &mut Level, direction: Direction, events: &mut Vec<GameEvent>) -> bool {
    let from = level.hero().position;
    let to = from + direction.to_delta();

    let grid = level.grid();
    if !grid.is_walkable(to) || grid.get(to).kind() == TileKind::Enemy {
        events.push(GameEvent::MoveBlocked { from, to });
        return false;
    }

    match level.move_hero(to) {
        Some(PickupKind::Potion) => events.push(GameEvent::PotionConsumed {
            position: to,
            health: level.hero().health,
        }),
        Some(PickupKind::Sword) => events.push(GameEvent::SwordCollected {
            position: to,
            attack_power: level.hero().attack_power,
        }),
        None => {}
    }
    events.push(GameEvent::HeroMoved { from, to });
    true
}

/// Strikes all eight neighbouring cells with the hero's full attack power.
///
/// Every adjacent enemy takes the same damage; those brought to zero health
/// or below are removed. Returns the number of enemies hit, which is zero for
/// an attack into empty air.
pub fn hero_attack(level: &mut Level, events: &mut Vec<GameEvent>) -> u32 {
    let origin = level.hero().position;
    let damage = level.hero().attack_power;
    let mut hits = 0;

    for target in origin.adjacent_positions() {
        if !level.grid().in_bounds(target) || level.grid().get(target).kind() != TileKind::Enemy {
            continue;
        }

        if let Some(remaining) = level.damage_enemy_at(target, damage) {
            hits += 1;
            events.push(GameEvent::EnemyDamaged {
                position: target,
                damage,
                remaining,
            });
            if remaining <= 0 {
                events.push(GameEvent::EnemyDefeated { position: target });
            }
        }
    }

    events.push(GameEvent::HeroAttacked {
        position: origin,
        hits,
    });
    hits
}
