//! # Generation Module
//!
//! Procedural content generation for a single dungeon level.
//!
//! The pipeline runs in a fixed order: rooms are placed, connected by
//! corridors, crossed by full-length passages, and only then populated with
//! pickups, the hero, and enemies. Carving never runs after placement, so no
//! entity is ever overwritten by floor.

pub mod corridors;
pub mod dungeon;
pub mod encounters;
pub mod items;
pub mod passages;

pub use corridors::*;
pub use dungeon::*;
pub use encounters::*;
pub use items::*;
pub use passages::*;

use crate::config::{DEFAULT_DUNGEON_HEIGHT, DEFAULT_DUNGEON_WIDTH};
use crate::game::{Level, Position};
use crate::{DelverError, DelverResult};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for procedural generation.
///
/// Every field has a default, so a JSON config file only needs to list the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Minimum number of room placement rounds
    pub min_rooms: u32,
    /// Maximum number of room placement rounds
    pub max_rooms: u32,
    /// Minimum room side length
    pub min_room_size: u32,
    /// Maximum room side length
    pub max_room_size: u32,
    /// Placement attempts per room before it is skipped
    pub placement_attempts: u32,
    /// Extra corridors are drawn from `0..=rooms / divisor`
    pub extra_corridor_divisor: u32,
    /// Redraws of the second endpoint when it equals the first
    pub extra_corridor_retries: u32,
    /// Minimum number of passages along each axis
    pub min_passages: u32,
    /// Maximum number of passages along each axis
    pub max_passages: u32,
    /// Swords to scatter
    pub sword_count: u32,
    /// Health potions to scatter
    pub potion_count: u32,
    /// Enemies to scatter
    pub enemy_count: u32,
}

impl GenerationConfig {
    /// Creates the standard generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delver::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!((config.width, config.height), (40, 24));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: DEFAULT_DUNGEON_WIDTH,
            height: DEFAULT_DUNGEON_HEIGHT,
            min_rooms: 5,
            max_rooms: 10,
            min_room_size: 3,
            max_room_size: 8,
            placement_attempts: 10,
            extra_corridor_divisor: 3,
            extra_corridor_retries: 10,
            min_passages: 3,
            max_passages: 5,
            sword_count: 2,
            potion_count: 10,
            enemy_count: 10,
        }
    }

    /// Creates a configuration for testing with smaller, sparser levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            width: 20,
            height: 12,
            min_rooms: 2,
            max_rooms: 4,
            max_room_size: 5,
            min_passages: 1,
            max_passages: 2,
            sword_count: 1,
            potion_count: 2,
            enemy_count: 3,
            ..Self::new(seed)
        }
    }

    /// Returns a copy with different grid dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DelverResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the generators can run with these values.
    pub fn validate(&self) -> DelverResult<()> {
        if self.width < 3 || self.height < 3 {
            return Err(DelverError::InvalidConfig(format!(
                "grid must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        let ranges = [
            ("rooms", self.min_rooms, self.max_rooms),
            ("room size", self.min_room_size, self.max_room_size),
            ("passages", self.min_passages, self.max_passages),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(DelverError::InvalidConfig(format!(
                    "{} range is inverted: {} > {}",
                    name, min, max
                )));
            }
        }
        if self.min_room_size == 0 {
            return Err(DelverError::InvalidConfig(
                "rooms must be at least 1 tile wide".to_string(),
            ));
        }
        if self.extra_corridor_divisor == 0 {
            return Err(DelverError::InvalidConfig(
                "extra corridor divisor must be positive".to_string(),
            ));
        }
        // Every value below is drawn through `RandomSource::next_int`, which works in i32.
        let drawn = [
            ("width", self.width),
            ("height", self.height),
            ("min_rooms", self.min_rooms),
            ("max_rooms", self.max_rooms),
            ("min_room_size", self.min_room_size),
            ("max_room_size", self.max_room_size),
            ("min_passages", self.min_passages),
            ("max_passages", self.max_passages),
        ];
        for (name, value) in drawn {
            if i32::try_from(value).is_err() {
                return Err(DelverError::InvalidConfig(format!(
                    "{} = {} exceeds {}",
                    name,
                    value,
                    i32::MAX
                )));
            }
        }
        // Floor cells are indexed with i32 when drawn for placement.
        if self.width as u64 * self.height as u64 > i32::MAX as u64 {
            return Err(DelverError::InvalidConfig(format!(
                "grid of {}x{} cells is too large",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Represents a rectangular room carved during generation.
///
/// Rooms only live for the duration of generation; the finished level keeps
/// just the tiles they carved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Top-left corner of the room's floor
    pub top_left: Position,
    /// Width of the room in tiles
    pub width: u32,
    /// Height of the room in tiles
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use delver::{Room, Position};
    ///
    /// let room = Room::new(Position::new(5, 5), 4, 3);
    /// assert_eq!(room.center(), Position::new(7, 6));
    /// assert!(room.contains(Position::new(8, 7)));
    /// assert!(!room.contains(Position::new(9, 7)));
    /// ```
    pub fn new(top_left: Position, width: u32, height: u32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Gets the bottom-right floor cell of the room.
    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 - 1,
            self.top_left.y + self.height as i32 - 1,
        )
    }

    /// Gets the center position of the room, rounded toward the top-left.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width as i32
            && pos.y < self.top_left.y + self.height as i32
    }

    /// The room grown by `margin` tiles on every side.
    pub fn expanded(&self, margin: u32) -> Room {
        Room::new(
            Position::new(
                self.top_left.x - margin as i32,
                self.top_left.y - margin as i32,
            ),
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }

    /// Checks if this room overlaps with another room.
    pub fn overlaps(&self, other: &Room) -> bool {
        !(self.top_left.x >= other.top_left.x + other.width as i32
            || other.top_left.x >= self.top_left.x + self.width as i32
            || self.top_left.y >= other.top_left.y + other.height as i32
            || other.top_left.y >= self.top_left.y + self.height as i32)
    }

    /// Gets all positions within this room, row-major.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area() as usize);

        for y in self.top_left.y..(self.top_left.y + self.height as i32) {
            for x in self.top_left.x..(self.top_left.x + self.width as i32) {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }
}

/// Source of randomness for generation.
///
/// Only the interface is fixed; any seedable generator can sit behind it.
pub trait RandomSource {
    /// Uniform integer in `min..=max`.
    ///
    /// # Panics
    ///
    /// Implementations may panic when `min > max`.
    fn next_int(&mut self, min: i32, max: i32) -> i32;

    /// Fair coin flip.
    fn next_bool(&mut self) -> bool;
}

impl<R: RngCore> RandomSource for R {
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        self.gen_range(min..=max)
    }

    fn next_bool(&mut self) -> bool {
        self.gen_bool(0.5)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random source.
    fn generate(&self, config: &GenerationConfig, rng: &mut dyn RandomSource)
        -> DelverResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelverResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Generates a fully populated level with the default dungeon generator.
pub fn generate_level(
    config: &GenerationConfig,
    rng: &mut dyn RandomSource,
) -> DelverResult<Level> {
    DungeonGenerator::new().generate(config, rng)
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::game::{Grid, Tile, TileKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashSet, VecDeque};

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Picks a uniformly random floor cell, scanning the grid afresh.
    pub fn random_floor_position(grid: &Grid, rng: &mut dyn RandomSource) -> Option<Position> {
        let floor = grid.positions_of_kind(TileKind::Floor);
        if floor.is_empty() {
            return None;
        }
        let index = rng.next_int(0, floor.len() as i32 - 1);
        Some(floor[index as usize])
    }

    /// Flood fill over cardinal neighbours whose tiles satisfy `passable`.
    ///
    /// The start cell is included only if it is in bounds and passable.
    pub fn reachable_from(
        grid: &Grid,
        start: Position,
        passable: impl Fn(Tile) -> bool,
    ) -> HashSet<Position> {
        let mut visited = HashSet::new();
        if !grid.in_bounds(start) || !passable(grid.get(start)) {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            for next in pos.cardinal_adjacent_positions() {
                if grid.in_bounds(next) && !visited.contains(&next) && passable(grid.get(next)) {
                    visited.insert(next);
                    queue.push_back(next);
                }
            }
        }

        visited
    }

    /// Checks that every room center can reach every other through cells
    /// accepted by `passable`.
    pub fn validate_connectivity(
        grid: &Grid,
        rooms: &[Room],
        passable: impl Fn(Tile) -> bool,
    ) -> DelverResult<()> {
        let Some(first) = rooms.first() else {
            return Ok(());
        };

        let reachable = reachable_from(grid, first.center(), passable);
        for (index, room) in rooms.iter().enumerate() {
            if !reachable.contains(&room.center()) {
                return Err(DelverError::InvalidState(format!(
                    "room {} at {:?} is not connected to room 0",
                    index, room.top_left
                )));
            }
        }
        Ok(())
    }

    /// Checks that every room sits `margin` tiles inside the grid edge and
    /// that no room comes within `margin` tiles of another.
    pub fn validate_room_layout(grid: &Grid, rooms: &[Room], margin: u32) -> DelverResult<()> {
        let inset = 2 * margin;
        if grid.width() <= inset || grid.height() <= inset {
            return match rooms.first() {
                Some(room) => Err(DelverError::InvalidState(format!(
                    "room at {:?} does not fit a {}x{} grid",
                    room.top_left,
                    grid.width(),
                    grid.height()
                ))),
                None => Ok(()),
            };
        }
        let interior = Room::new(
            Position::new(margin as i32, margin as i32),
            grid.width() - inset,
            grid.height() - inset,
        );

        for (index, room) in rooms.iter().enumerate() {
            if !interior.contains(room.top_left) || !interior.contains(room.bottom_right()) {
                return Err(DelverError::InvalidState(format!(
                    "room {} at {:?} breaks the grid margin",
                    index, room.top_left
                )));
            }
            for (other_index, other) in rooms.iter().enumerate().skip(index + 1) {
                if room.expanded(margin).overlaps(other) {
                    return Err(DelverError::InvalidState(format!(
                        "rooms {} and {} are closer than {} tiles",
                        index, other_index, margin
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validates that a level meets basic requirements.
    pub fn validate_level(level: &Level) -> DelverResult<()> {
        if level.grid().count_kind(TileKind::Wall) == level.grid().positions().count() {
            return Err(DelverError::InvalidState(
                "level has no walkable tiles".to_string(),
            ));
        }
        level.check_consistency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, Tile};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!((config.min_rooms, config.max_rooms), (5, 10));
        assert_eq!((config.min_room_size, config.max_room_size), (3, 8));
        assert_eq!(
            (config.sword_count, config.potion_count, config.enemy_count),
            (2, 10, 10)
        );
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(GenerationConfig::new(1).with_size(2, 10).validate().is_err());

        let mut config = GenerationConfig::new(1);
        config.min_passages = 6;
        assert!(matches!(
            config.validate(),
            Err(DelverError::InvalidConfig(_))
        ));

        let mut config = GenerationConfig::new(1);
        config.extra_corridor_divisor = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_values_beyond_i32_are_rejected() {
        let mut config = GenerationConfig::new(1);
        config.max_rooms = 3_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(DelverError::InvalidConfig(_))
        ));
        let mut rng = utils::create_rng(&config);
        assert!(generate_level(&config, &mut rng).is_err());

        let mut config = GenerationConfig::new(1);
        config.max_passages = 4_000_000_000;
        let mut rng = utils::create_rng(&config);
        assert!(generate_level(&config, &mut rng).is_err());

        let mut config = GenerationConfig::new(1);
        config.max_room_size = u32::MAX;
        assert!(config.validate().is_err());

        let config = GenerationConfig::new(1).with_size(70_000, 70_000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "seed": 9, "enemy_count": 4 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.enemy_count, 4);
        assert_eq!(config.width, 40);
        assert_eq!(config.potion_count, 10);
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(Position::new(5, 5), 10, 8);

        assert_eq!(room.bottom_right(), Position::new(14, 12));
        assert_eq!(room.center(), Position::new(10, 9));
        assert_eq!(room.area(), 80);
        assert_eq!(room.positions().len(), 80);

        assert!(room.contains(Position::new(5, 5)));
        assert!(room.contains(Position::new(14, 12)));
        assert!(!room.contains(Position::new(4, 5)));
        assert!(!room.contains(Position::new(15, 12)));
    }

    #[test]
    fn test_room_center_rounds_down() {
        assert_eq!(Room::new(Position::new(2, 2), 3, 3).center(), Position::new(3, 3));
        assert_eq!(Room::new(Position::new(2, 2), 4, 5).center(), Position::new(4, 4));
    }

    #[test]
    fn test_room_overlap_and_margin() {
        let room1 = Room::new(Position::new(5, 5), 10, 8);
        let room2 = Room::new(Position::new(10, 8), 6, 6);
        let room3 = Room::new(Position::new(20, 20), 5, 5);
        // room1 spans x 5..=14; its 1-tile margin reaches x = 15
        let adjacent = Room::new(Position::new(15, 5), 3, 3);
        let one_gap = Room::new(Position::new(16, 5), 3, 3);

        assert!(room1.overlaps(&room2));
        assert!(room2.overlaps(&room1));
        assert!(!room1.overlaps(&room3));
        assert!(!room1.overlaps(&adjacent));
        assert!(room1.expanded(1).overlaps(&adjacent));
        assert!(!room1.expanded(1).overlaps(&one_gap));

        let grown = room3.expanded(1);
        assert_eq!(grown.top_left, Position::new(19, 19));
        assert_eq!((grown.width, grown.height), (7, 7));
    }

    #[test]
    fn test_validate_room_layout() {
        let grid = Grid::new(20, 12);
        let left = Room::new(Position::new(1, 1), 4, 4);
        let right = Room::new(Position::new(6, 1), 4, 4);
        assert!(utils::validate_room_layout(&grid, &[left, right], 1).is_ok());

        let touching = Room::new(Position::new(5, 1), 4, 4);
        assert!(utils::validate_room_layout(&grid, &[left, touching], 1).is_err());

        let on_edge = Room::new(Position::new(16, 8), 4, 4);
        assert!(utils::validate_room_layout(&grid, &[on_edge], 1).is_err());
        assert!(utils::validate_room_layout(&Grid::new(2, 2), &[], 1).is_ok());
    }

    #[test]
    fn test_random_source_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let value = rng.next_int(3, 5);
            assert!((3..=5).contains(&value));
        }
        assert_eq!(rng.next_int(4, 4), 4);
    }

    #[test]
    fn test_random_floor_position() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut grid = Grid::new(6, 6);
        assert_eq!(utils::random_floor_position(&grid, &mut rng), None);

        grid.set(Position::new(4, 1), Tile::Floor);
        assert_eq!(
            utils::random_floor_position(&grid, &mut rng),
            Some(Position::new(4, 1))
        );
    }

    #[test]
    fn test_reachable_from() {
        let mut grid = Grid::new(7, 3);
        for x in 1..3 {
            grid.set(Position::new(x, 1), Tile::Floor);
        }
        grid.set(Position::new(5, 1), Tile::Floor);

        let reached = utils::reachable_from(&grid, Position::new(1, 1), |t| t == Tile::Floor);
        assert_eq!(reached.len(), 2);
        assert!(!reached.contains(&Position::new(5, 1)));
        assert!(utils::reachable_from(&grid, Position::new(0, 0), |t| t == Tile::Floor).is_empty());

        let rooms = [
            Room::new(Position::new(1, 1), 2, 1),
            Room::new(Position::new(5, 1), 1, 1),
        ];
        assert!(utils::validate_connectivity(&grid, &rooms, |t| t == Tile::Floor).is_err());
        assert!(utils::validate_connectivity(&grid, &rooms[..1], |t| t == Tile::Floor).is_ok());
    }
}
