//! # Enemy AI
//!
//! Greedy chase-and-melee. Each enemy steps one cell along the axis where it
//! is furthest from the hero, then strikes if it ends up adjacent.

use crate::game::{GameEvent, Level, Position, Tile};

/// The cell an enemy at `from` wants to step into while chasing `target`.
///
/// Moves along x only when the horizontal gap is strictly larger; equal gaps
/// move vertically.
///
/// # Examples
///
/// ```
/// use delver::{chase_step, Position};
///
/// assert_eq!(chase_step(Position::new(0, 0), Position::new(5, 1)), Position::new(1, 0));
/// assert_eq!(chase_step(Position::new(0, 0), Position::new(2, 2)), Position::new(0, 1));
/// ```
pub fn chase_step(from: Position, target: Position) -> Position {
    let dx = (from.x - target.x).abs();
    let dy = (from.y - target.y).abs();

    if dx > dy {
        let step = if from.x > target.x { -1 } else { 1 };
        Position::new(from.x + step, from.y)
    } else {
        let step = if from.y > target.y { -1 } else { 1 };
        Position::new(from.x, from.y + step)
    }
}

/// Runs one enemy phase in roster order.
///
/// An enemy only steps onto plain floor, so pickups, the hero, and other
/// enemies all block it. Every enemy adjacent to the hero after its step
/// deals its attack power, and damage from several enemies stacks.
pub fn run_enemy_phase(level: &mut Level, events: &mut Vec<GameEvent>) {
    for index in 0..level.enemies().len() {
        let hero_pos = level.hero().position;
        let from = level.enemies()[index].position;
        let to = chase_step(from, hero_pos);

        if level.grid().is_walkable(to) && level.grid().get(to) == Tile::Floor {
            level.move_enemy(index, to);
            log::trace!("enemy {} steps {:?} -> {:?}", index, from, to);
            events.push(GameEvent::EnemyMoved { from, to });
        }

        let enemy = &level.enemies()[index];
        if enemy.position.chebyshev_distance(hero_pos) <= 1 {
            let by = enemy.position;
            let damage = enemy.attack_power;
            level.damage_hero(damage);
            events.push(GameEvent::HeroHit {
                by,
                damage,
                remaining: level.hero().health,
            });
        }
    }
}
