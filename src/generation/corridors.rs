//! # Corridors
//!
//! L-shaped corridor carving and the greedy nearest-pair room connector.

use crate::game::{Grid, Position, Tile};
use crate::generation::{GenerationConfig, RandomSource, Room};

/// Carves an L-shaped floor path between two points.
///
/// A coin flip decides whether the horizontal or the vertical leg comes
/// first. Whatever lies on the path becomes floor.
pub fn carve_corridor(grid: &mut Grid, from: Position, to: Position, rng: &mut dyn RandomSource) {
    let horizontal_first = rng.next_bool();
    carve_l_path(grid, from, to, horizontal_first);
}

/// Carves an L-shaped path with a fixed leg order.
///
/// # Examples
///
/// ```
/// use delver::{carve_l_path, Grid, Position, Tile};
///
/// let mut grid = Grid::new(6, 6);
/// carve_l_path(&mut grid, Position::new(1, 1), Position::new(4, 3), true);
/// assert_eq!(grid.get(Position::new(4, 1)), Tile::Floor); // the bend
/// assert_eq!(grid.get(Position::new(1, 3)), Tile::Wall);
/// ```
pub fn carve_l_path(grid: &mut Grid, from: Position, to: Position, horizontal_first: bool) {
    let mut current = from;
    grid.set(current, Tile::Floor);

    if horizontal_first {
        walk_x(grid, &mut current, to.x);
        walk_y(grid, &mut current, to.y);
    } else {
        walk_y(grid, &mut current, to.y);
        walk_x(grid, &mut current, to.x);
    }
}

fn walk_x(grid: &mut Grid, current: &mut Position, target_x: i32) {
    while current.x != target_x {
        current.x += if current.x < target_x { 1 } else { -1 };
        grid.set(*current, Tile::Floor);
    }
}

fn walk_y(grid: &mut Grid, current: &mut Position, target_y: i32) {
    while current.y != target_y {
        current.y += if current.y < target_y { 1 } else { -1 };
        grid.set(*current, Tile::Floor);
    }
}

/// Connects every room to the network, then adds a few random loops.
///
/// Starting from the first room, the closest (connected, unconnected) pair of
/// centers is joined until nothing is left unconnected; ties go to the pair
/// found first. Afterwards `0..=rooms / divisor` extra corridors join random
/// pairs. Returns the number of corridors carved.
pub fn connect_rooms(
    grid: &mut Grid,
    rooms: &[Room],
    config: &GenerationConfig,
    rng: &mut dyn RandomSource,
) -> usize {
    if rooms.len() < 2 {
        return 0;
    }

    let mut carved = 0;
    let mut connected = vec![rooms[0]];
    let mut unconnected: Vec<Room> = rooms[1..].to_vec();

    while !unconnected.is_empty() {
        let mut best: Option<(f64, Position, usize)> = None;

        for room_a in &connected {
            for (index, room_b) in unconnected.iter().enumerate() {
                let distance = room_a.center().euclidean_distance(room_b.center());
                if best.map_or(true, |(best_distance, _, _)| distance < best_distance) {
                    best = Some((distance, room_a.center(), index));
                }
            }
        }

        let Some((_, from, index)) = best else {
            break;
        };
        let room = unconnected.remove(index);
        carve_corridor(grid, from, room.center(), rng);
        connected.push(room);
        carved += 1;
    }

    let last = rooms.len() as i32 - 1;
    let extra = rng.next_int(0, (rooms.len() as u32 / config.extra_corridor_divisor) as i32);
    for _ in 0..extra {
        let first = rng.next_int(0, last);
        let mut second = rng.next_int(0, last);

        let mut attempts = 0;
        while first == second && attempts < config.extra_corridor_retries {
            second = rng.next_int(0, last);
            attempts += 1;
        }

        if first != second {
            carve_corridor(
                grid,
                rooms[first as usize].center(),
                rooms[second as usize].center(),
                rng,
            );
            carved += 1;
        }
    }

    carved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TileKind;
    use crate::generation::utils;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Always answers the same coin flip and the lowest value of any range.
    struct Fixed(bool);

    impl RandomSource for Fixed {
        fn next_int(&mut self, min: i32, _max: i32) -> i32 {
            min
        }

        fn next_bool(&mut self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_horizontal_first_bends_at_target_column() {
        let mut grid = Grid::new(8, 8);
        carve_corridor(&mut grid, Position::new(1, 1), Position::new(5, 4), &mut Fixed(true));

        for x in 1..=5 {
            assert_eq!(grid.get(Position::new(x, 1)), Tile::Floor);
        }
        for y in 1..=4 {
            assert_eq!(grid.get(Position::new(5, y)), Tile::Floor);
        }
        assert_eq!(grid.count_kind(TileKind::Floor), 8);
    }

    #[test]
    fn test_vertical_first_bends_at_target_row() {
        let mut grid = Grid::new(8, 8);
        carve_corridor(&mut grid, Position::new(5, 4), Position::new(1, 1), &mut Fixed(false));

        for y in 1..=4 {
            assert_eq!(grid.get(Position::new(5, y)), Tile::Floor);
        }
        for x in 1..=5 {
            assert_eq!(grid.get(Position::new(x, 1)), Tile::Floor);
        }
        assert_eq!(grid.get(Position::new(1, 4)), Tile::Wall);
    }

    #[test]
    fn test_zero_length_corridor_carves_its_point() {
        let mut grid = Grid::new(4, 4);
        carve_l_path(&mut grid, Position::new(2, 2), Position::new(2, 2), true);
        assert_eq!(grid.count_kind(TileKind::Floor), 1);
    }

    #[test]
    fn test_corridor_overwrites_anything() {
        let mut grid = Grid::new(6, 3);
        grid.set(Position::new(2, 1), Tile::Potion);
        carve_l_path(&mut grid, Position::new(0, 1), Position::new(5, 1), true);
        assert_eq!(grid.get(Position::new(2, 1)), Tile::Floor);
    }

    #[test]
    fn test_connector_picks_nearest_pairs() {
        let rooms = [
            Room::new(Position::new(1, 1), 3, 3),   // center (2, 2)
            Room::new(Position::new(20, 1), 3, 3),  // center (21, 2)
            Room::new(Position::new(8, 1), 3, 3),   // center (9, 2)
        ];
        let mut grid = Grid::new(30, 6);
        let config = GenerationConfig::new(1);

        // `Fixed` draws zero extra corridors.
        let carved = connect_rooms(&mut grid, &rooms, &config, &mut Fixed(true));
        assert_eq!(carved, 2);
        for x in 2..=21 {
            assert_eq!(grid.get(Position::new(x, 2)), Tile::Floor);
        }
        assert_eq!(grid.count_kind(TileKind::Floor), 20);
    }

    #[test]
    fn test_single_room_needs_no_corridor() {
        let rooms = [Room::new(Position::new(1, 1), 3, 3)];
        let mut grid = Grid::new(6, 6);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(connect_rooms(&mut grid, &rooms, &GenerationConfig::new(1), &mut rng), 0);
        assert_eq!(grid.count_kind(TileKind::Floor), 0);
    }

    #[test]
    fn test_connected_rooms_reach_each_other() {
        let rooms = [
            Room::new(Position::new(1, 1), 3, 3),
            Room::new(Position::new(12, 2), 4, 3),
            Room::new(Position::new(3, 9), 5, 2),
            Room::new(Position::new(14, 9), 3, 3),
        ];
        let mut grid = Grid::new(20, 14);
        for room in &rooms {
            crate::generation::carve_room(&mut grid, room);
        }
        let mut rng = StdRng::seed_from_u64(99);
        let carved = connect_rooms(&mut grid, &rooms, &GenerationConfig::new(1), &mut rng);

        assert!(carved >= 3);
        assert!(utils::validate_connectivity(&grid, &rooms, |t| t == Tile::Floor).is_ok());
    }
}
