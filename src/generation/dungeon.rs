//! # Dungeon Generation
//!
//! Room placement and the end-to-end level pipeline.
//!
//! The generator:
//! 1. Fills the grid with walls and places non-overlapping rooms, each kept
//!    apart from everything already carved by a wall margin
//! 2. Connects the rooms with L-shaped corridors, nearest pair first
//! 3. Cuts full-length passages across the grid
//! 4. Scatters pickups, the hero, and enemies onto the remaining floor

use crate::game::{Grid, Level, Position, Tile};
use crate::generation::{
    connect_rooms, inject_passages, place_encounters, place_items, utils, GenerationConfig,
    Generator, RandomSource, Room,
};
use crate::DelverResult;

/// Walls kept around every room at placement time.
pub const ROOM_MARGIN: u32 = 1;

/// Primary dungeon generator using the room-and-corridor algorithm.
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    /// Wall tiles required between a new room and anything already carved
    pub room_margin: u32,
}

impl DungeonGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use delver::{DungeonGenerator, GenerationConfig, Generator};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let generator = DungeonGenerator::new();
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let level = generator.generate(&GenerationConfig::new(1), &mut rng).unwrap();
    /// assert!(level.hero_placed());
    /// ```
    pub fn new() -> Self {
        Self {
            room_margin: ROOM_MARGIN,
        }
    }

    /// Carves rooms, corridors, and passages, but places no entities.
    ///
    /// Returns the carved grid together with the rooms that were placed.
    pub fn carve_layout(
        &self,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> DelverResult<(Grid, Vec<Room>)> {
        config.validate()?;

        let mut grid = Grid::new(config.width, config.height);
        let rooms = self.place_rooms(&mut grid, config, rng);
        let corridors = connect_rooms(&mut grid, &rooms, config, rng);
        let (rows, columns) = inject_passages(&mut grid, config, rng);

        log::debug!(
            "carved {} rooms, {} corridors, {} row and {} column passages",
            rooms.len(),
            corridors,
            rows,
            columns
        );
        Ok((grid, rooms))
    }

    /// Places up to a random number of rooms, skipping any that don't fit.
    pub fn place_rooms(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> Vec<Room> {
        let mut rooms = Vec::new();
        let room_count = rng.next_int(config.min_rooms as i32, config.max_rooms as i32);

        for index in 0..room_count {
            match self.try_place_room(grid, config, rng) {
                Some(room) => {
                    carve_room(grid, &room);
                    rooms.push(room);
                }
                None => log::debug!(
                    "room {} skipped after {} placement attempts",
                    index,
                    config.placement_attempts
                ),
            }
        }

        rooms
    }

    /// Attempts to place a single room.
    ///
    /// Each attempt draws a size, then a top-left corner that keeps the room
    /// and its margin on the grid. An attempt whose size leaves no room for a
    /// corner fails like any other.
    fn try_place_room(
        &self,
        grid: &Grid,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> Option<Room> {
        let margin = self.room_margin as i32;

        for _ in 0..config.placement_attempts {
            let width = rng.next_int(config.min_room_size as i32, config.max_room_size as i32);
            let height = rng.next_int(config.min_room_size as i32, config.max_room_size as i32);

            let max_x = grid.width() as i32 - width - margin;
            let max_y = grid.height() as i32 - height - margin;
            if max_x < margin || max_y < margin {
                continue;
            }

            let x = rng.next_int(margin, max_x);
            let y = rng.next_int(margin, max_y);
            let room = Room::new(Position::new(x, y), width as u32, height as u32);

            if self.can_place_room(grid, &room) {
                return Some(room);
            }
        }

        None
    }

    /// True when the room plus its margin lies on the grid over walls only.
    pub fn can_place_room(&self, grid: &Grid, room: &Room) -> bool {
        room.expanded(self.room_margin)
            .positions()
            .into_iter()
            .all(|pos| grid.in_bounds(pos) && grid.get(pos) == Tile::Wall)
    }
}

/// Carves out a room in the grid by setting its tiles to floor.
pub fn carve_room(grid: &mut Grid, room: &Room) {
    for pos in room.positions() {
        grid.set(pos, Tile::Floor);
    }
}

impl Generator<Level> for DungeonGenerator {
    fn generate(
        &self,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> DelverResult<Level> {
        let (grid, rooms) = self.carve_layout(config, rng)?;

        if let Err(e) = utils::validate_room_layout(&grid, &rooms, self.room_margin) {
            log::warn!("carved layout breaks the room margin: {}", e);
        }
        if let Err(e) = utils::validate_connectivity(&grid, &rooms, |tile| tile == Tile::Floor) {
            log::warn!("carved layout is not fully connected: {}", e);
        }

        let mut level = Level::from_grid(grid)?;
        place_items(&mut level, config, rng)?;
        place_encounters(&mut level, config, rng)?;

        log::info!(
            "generated {}x{} level (seed {}): {} rooms, {} enemies, {} swords, {} potions",
            level.width(),
            level.height(),
            config.seed,
            rooms.len(),
            level.enemies().len(),
            level.swords().len(),
            level.potions().len()
        );
        log::debug!("level layout:\n{}", level);

        Ok(level)
    }

    fn validate(&self, level: &Level, _config: &GenerationConfig) -> DelverResult<()> {
        utils::validate_level(level)
    }

    fn generator_type(&self) -> &'static str {
        "DungeonGenerator"
    }
}

impl Default for DungeonGenerator {
    fn default() -> Self {
        Self::new()
    }
}
