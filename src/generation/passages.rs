//! # Passages
//!
//! Straight floor lines cut across the whole grid, independent of rooms.

use crate::game::{Grid, Position, Tile};
use crate::generation::{GenerationConfig, RandomSource};

/// Cuts full-width rows and full-height columns of floor.
///
/// Both counts are drawn first, then the rows (from `1..=height - 2`), then
/// the columns (from `1..=width - 2`). Lines may cross or repeat. Returns the
/// number of rows and columns cut.
pub fn inject_passages(
    grid: &mut Grid,
    config: &GenerationConfig,
    rng: &mut dyn RandomSource,
) -> (u32, u32) {
    let rows = rng.next_int(config.min_passages as i32, config.max_passages as i32) as u32;
    let columns = rng.next_int(config.min_passages as i32, config.max_passages as i32) as u32;

    for _ in 0..rows {
        let y = rng.next_int(1, grid.height() as i32 - 2);
        for x in 0..grid.width() as i32 {
            grid.set(Position::new(x, y), Tile::Floor);
        }
    }

    for _ in 0..columns {
        let x = rng.next_int(1, grid.width() as i32 - 2);
        for y in 0..grid.height() as i32 {
            grid.set(Position::new(x, y), Tile::Floor);
        }
    }

    (rows, columns)
}
