//! # World Representation
//!
//! The tile grid and the level that keeps tiles and entity rosters in step.
//!
//! Every cell holds exactly one [`Tile`]. Actor and pickup tiles mirror the
//! rosters held by [`Level`]: an `Enemy` tile exists exactly where a live
//! enemy stands, one `Hero` tile marks the hero, and `Sword`/`Potion` tiles
//! match the pickup lists. All mutations after generation go through the
//! `Level` helpers so both sides change together.

use crate::config::{POTION_HEAL, SWORD_BONUS};
use crate::game::{Enemy, Hero, PickupKind, Position};
use crate::{DelverError, DelverResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contents of a single grid cell.
///
/// Actor variants carry their cached stats so a renderer can draw health bars
/// straight from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
    Sword,
    Potion,
    Hero { health: i32 },
    Enemy { health: i32, attack_power: i32 },
}

/// Tile discriminant without the per-variant payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    Sword,
    Potion,
    Hero,
    Enemy,
}

impl Tile {
    pub fn kind(&self) -> TileKind {
        match self {
            Tile::Wall => TileKind::Wall,
            Tile::Floor => TileKind::Floor,
            Tile::Sword => TileKind::Sword,
            Tile::Potion => TileKind::Potion,
            Tile::Hero { .. } => TileKind::Hero,
            Tile::Enemy { .. } => TileKind::Enemy,
        }
    }

    /// Health carried by actor tiles.
    pub fn health(&self) -> Option<i32> {
        match self {
            Tile::Hero { health } | Tile::Enemy { health, .. } => Some(*health),
            _ => None,
        }
    }

    /// Anything but a wall can be stepped on or carved through.
    pub fn is_passable(&self) -> bool {
        !matches!(self, Tile::Wall)
    }

    /// ASCII glyph used by the text snapshot.
    pub fn glyph(&self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Sword => '/',
            Tile::Potion => '!',
            Tile::Hero { .. } => '@',
            Tile::Enemy { .. } => 'e',
        }
    }
}

/// Fixed-size rectangular tile array, row-major, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid filled with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use delver::{Grid, Position, TileKind};
    ///
    /// let grid = Grid::new(10, 8);
    /// assert_eq!(grid.get(Position::new(9, 7)).kind(), TileKind::Wall);
    /// assert!(!grid.in_bounds(Position::new(10, 0)));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Wall; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// True when the position is on the grid and not a wall.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.get(pos).is_passable()
    }

    /// Returns the tile at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn get(&self, pos: Position) -> Tile {
        self.tiles[self.index(pos)]
    }

    /// Overwrites the tile at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, tile: Tile) {
        let index = self.index(pos);
        self.tiles[index] = tile;
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// All positions whose tile is of the given kind, row-major.
    pub fn positions_of_kind(&self, kind: TileKind) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.get(pos).kind() == kind)
            .collect()
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| tile.kind() == kind).count()
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.in_bounds(pos),
            "position ({}, {}) is outside the {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        pos.y as usize * self.width as usize + pos.x as usize
    }
}

/// A generated level: the grid plus every roster that mirrors it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    grid: Grid,
    hero: Hero,
    hero_placed: bool,
    enemies: Vec<Enemy>,
    swords: Vec<Position>,
    potions: Vec<Position>,
}

impl Level {
    /// Creates an all-wall level with no entities.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            hero: Hero::default(),
            hero_placed: false,
            enemies: Vec::new(),
            swords: Vec::new(),
            potions: Vec::new(),
        }
    }

    /// Wraps a carved grid that holds only walls and floor.
    pub fn from_grid(grid: Grid) -> DelverResult<Self> {
        if let Some(pos) = grid
            .positions()
            .find(|&pos| !matches!(grid.get(pos), Tile::Wall | Tile::Floor))
        {
            return Err(DelverError::InvalidState(format!(
                "cannot adopt grid with an entity tile at ({}, {})",
                pos.x, pos.y
            )));
        }

        Ok(Self {
            grid,
            hero: Hero::default(),
            hero_placed: false,
            enemies: Vec::new(),
            swords: Vec::new(),
            potions: Vec::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn hero_placed(&self) -> bool {
        self.hero_placed
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn swords(&self) -> &[Position] {
        &self.swords
    }

    pub fn potions(&self) -> &[Position] {
        &self.potions
    }

    pub fn enemy_at(&self, pos: Position) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.position == pos)
    }

    /// Puts a sword on a floor cell.
    pub fn place_sword(&mut self, pos: Position) -> DelverResult<()> {
        self.require_floor(pos, "sword")?;
        self.grid.set(pos, Tile::Sword);
        self.swords.push(pos);
        Ok(())
    }

    /// Puts a potion on a floor cell.
    pub fn place_potion(&mut self, pos: Position) -> DelverResult<()> {
        self.require_floor(pos, "potion")?;
        self.grid.set(pos, Tile::Potion);
        self.potions.push(pos);
        Ok(())
    }

    /// Places the hero on a floor cell, replacing any earlier placement.
    pub fn place_hero(&mut self, hero: Hero) -> DelverResult<()> {
        self.require_floor(hero.position, "hero")?;
        if self.hero_placed {
            self.grid.set(self.hero.position, Tile::Floor);
        }
        self.grid.set(
            hero.position,
            Tile::Hero {
                health: hero.health,
            },
        );
        self.hero = hero;
        self.hero_placed = true;
        Ok(())
    }

    /// Places an enemy on a floor cell and appends it to the roster.
    pub fn place_enemy(&mut self, enemy: Enemy) -> DelverResult<()> {
        self.require_floor(enemy.position, "enemy")?;
        self.grid.set(enemy.position, enemy_tile(&enemy));
        self.enemies.push(enemy);
        Ok(())
    }

    /// Moves the hero onto `to`, consuming any pickup found there.
    ///
    /// The caller has already checked that `to` is walkable and not an enemy.
    /// The vacated cell becomes floor and the destination carries the hero's
    /// health after the pickup took effect.
    pub fn move_hero(&mut self, to: Position) -> Option<PickupKind> {
        let pickup = match self.grid.get(to) {
            Tile::Potion => {
                remove_position(&mut self.potions, to);
                self.hero.heal(POTION_HEAL);
                Some(PickupKind::Potion)
            }
            Tile::Sword => {
                remove_position(&mut self.swords, to);
                self.hero.attack_power += SWORD_BONUS;
                Some(PickupKind::Sword)
            }
            _ => None,
        };

        self.grid.set(self.hero.position, Tile::Floor);
        self.hero.position = to;
        self.sync_hero_tile();
        pickup
    }

    /// Deals damage to the hero and mirrors the new health onto its tile.
    pub fn damage_hero(&mut self, amount: i32) {
        self.hero.take_damage(amount);
        self.sync_hero_tile();
    }

    /// Moves the enemy at roster `index` onto `to`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a roster index.
    pub fn move_enemy(&mut self, index: usize, to: Position) {
        let enemy = &mut self.enemies[index];
        self.grid.set(enemy.position, Tile::Floor);
        enemy.position = to;
        self.grid.set(to, enemy_tile(enemy));
    }

    /// Damages the enemy standing on `pos`, if any.
    ///
    /// Returns the enemy's remaining health. An enemy brought to zero or below
    /// is removed from the roster (survivors keep their order) and its cell
    /// becomes floor.
    pub fn damage_enemy_at(&mut self, pos: Position, amount: i32) -> Option<i32> {
        let index = self.enemies.iter().position(|enemy| enemy.position == pos)?;
        let enemy = &mut self.enemies[index];
        enemy.health -= amount;
        let remaining = enemy.health;

        if enemy.is_alive() {
            self.grid.set(pos, enemy_tile(enemy));
        } else {
            self.grid.set(pos, Tile::Floor);
            self.enemies.retain(|enemy| enemy.position != pos);
        }
        Some(remaining)
    }

    /// Verifies that the grid and the rosters describe the same world.
    pub fn check_consistency(&self) -> DelverResult<()> {
        let hero_tiles = self.grid.positions_of_kind(TileKind::Hero);
        let expected_hero: Vec<Position> = if self.hero_placed {
            vec![self.hero.position]
        } else {
            Vec::new()
        };
        if hero_tiles != expected_hero {
            return Err(DelverError::InvalidState(format!(
                "hero tiles {:?} do not match hero at {:?}",
                hero_tiles, expected_hero
            )));
        }

        let mut enemy_tiles = self.grid.positions_of_kind(TileKind::Enemy);
        let mut roster: Vec<Position> = self.enemies.iter().map(|e| e.position).collect();
        enemy_tiles.sort_by_key(|pos| (pos.y, pos.x));
        roster.sort_by_key(|pos| (pos.y, pos.x));
        if enemy_tiles != roster {
            return Err(DelverError::InvalidState(format!(
                "enemy tiles {:?} do not match roster {:?}",
                enemy_tiles, roster
            )));
        }

        for (kind, list) in [
            (TileKind::Sword, &self.swords),
            (TileKind::Potion, &self.potions),
        ] {
            let mut tiles = self.grid.positions_of_kind(kind);
            let mut recorded = list.clone();
            tiles.sort_by_key(|pos| (pos.y, pos.x));
            recorded.sort_by_key(|pos| (pos.y, pos.x));
            if tiles != recorded {
                return Err(DelverError::InvalidState(format!(
                    "{:?} tiles {:?} do not match recorded {:?}",
                    kind, tiles, recorded
                )));
            }
        }

        Ok(())
    }

    fn sync_hero_tile(&mut self) {
        self.grid.set(
            self.hero.position,
            Tile::Hero {
                health: self.hero.health,
            },
        );
    }

    fn require_floor(&self, pos: Position, what: &str) -> DelverResult<()> {
        match self.grid.get(pos) {
            Tile::Floor => Ok(()),
            other => Err(DelverError::InvalidState(format!(
                "cannot place {} on {:?} at ({}, {})",
                what,
                other.kind(),
                pos.x,
                pos.y
            ))),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.grid.height() as i32 {
            let row: String = (0..self.grid.width() as i32)
                .map(|x| self.grid.get(Position::new(x, y)).glyph())
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

fn enemy_tile(enemy: &Enemy) -> Tile {
    Tile::Enemy {
        health: enemy.health,
        attack_power: enemy.attack_power,
    }
}

fn remove_position(list: &mut Vec<Position>, pos: Position) {
    if let Some(index) = list.iter().position(|&p| p == pos) {
        list.remove(index);
    }
}
