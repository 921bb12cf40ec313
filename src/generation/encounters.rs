//! # Encounter Placement
//!
//! Puts the hero and the enemy pack onto random floor cells.

use crate::game::{Enemy, Hero, Level};
use crate::generation::{utils, GenerationConfig, RandomSource};
use crate::DelverResult;

/// Places the hero, then the configured number of enemies.
///
/// Returns whether the hero was placed and how many enemies were.
pub fn place_encounters(
    level: &mut Level,
    config: &GenerationConfig,
    rng: &mut dyn RandomSource,
) -> DelverResult<(bool, u32)> {
    let hero = place_hero(level, rng)?;
    let enemies = place_enemies(level, config.enemy_count, rng)?;
    Ok((hero, enemies))
}

/// Places a fresh hero on a random floor cell, if one is left.
pub fn place_hero(level: &mut Level, rng: &mut dyn RandomSource) -> DelverResult<bool> {
    match utils::random_floor_position(level.grid(), rng) {
        Some(pos) => {
            level.place_hero(Hero::new(pos))?;
            Ok(true)
        }
        None => {
            log::debug!("no floor left for the hero");
            Ok(false)
        }
    }
}

/// Places up to `count` fresh enemies on random floor cells.
pub fn place_enemies(
    level: &mut Level,
    count: u32,
    rng: &mut dyn RandomSource,
) -> DelverResult<u32> {
    let mut placed = 0;

    for _ in 0..count {
        if let Some(pos) = utils::random_floor_position(level.grid(), rng) {
            level.place_enemy(Enemy::new(pos))?;
            placed += 1;
        }
    }

    if placed < count {
        log::debug!("placed {} of {} enemies", placed, count);
    }
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, Position, Tile, TileKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn room(width: u32, height: u32) -> Level {
        let mut grid = Grid::new(width, height);
        for y in 1..height as i32 - 1 {
            for x in 1..width as i32 - 1 {
                grid.set(Position::new(x, y), Tile::Floor);
            }
        }
        Level::from_grid(grid).unwrap()
    }

    #[test]
    fn test_encounters_fill_rosters() {
        let mut level = room(8, 8);
        let mut rng = StdRng::seed_from_u64(10);
        let config = GenerationConfig::new(10);

        assert_eq!(place_encounters(&mut level, &config, &mut rng).unwrap(), (true, 10));
        let hero = level.hero();
        assert_eq!(level.grid().get(hero.position), Tile::Hero { health: 100 });
        for enemy in level.enemies() {
            assert_eq!(
                level.grid().get(enemy.position),
                Tile::Enemy {
                    health: 100,
                    attack_power: 5
                }
            );
        }
        level.check_consistency().unwrap();
    }

    #[test]
    fn test_no_floor_places_nothing() {
        let mut level = Level::new(5, 5);
        let mut rng = StdRng::seed_from_u64(10);

        assert!(!place_hero(&mut level, &mut rng).unwrap());
        assert_eq!(place_enemies(&mut level, 4, &mut rng).unwrap(), 0);
        assert!(!level.hero_placed());
        assert_eq!(level.grid().count_kind(TileKind::Enemy), 0);
    }
}
