//! Integration tests for turn resolution: movement, pickups, combat, the
//! enemy phase, and terminal states.

use delver::{
    DelverResult, Enemy, GameSession, GenerationConfig, Grid, Hero, Intent, Level, Position, Tile,
    TileKind, TurnResult,
};
use proptest::prelude::*;

/// A 10x10 wall grid with the floor rectangle (2,2)-(6,6) carved out.
fn room_level() -> Level {
    let mut grid = Grid::new(10, 10);
    for y in 2..=6 {
        for x in 2..=6 {
            grid.set(Position::new(x, y), Tile::Floor);
        }
    }
    Level::from_grid(grid).unwrap()
}

fn session(hero: Hero, enemies: &[Enemy]) -> GameSession {
    let mut level = room_level();
    level.place_hero(hero).unwrap();
    for enemy in enemies {
        level.place_enemy(enemy.clone()).unwrap();
    }
    GameSession::new(level).unwrap()
}

#[test]
fn test_single_move_then_idle_ticks() -> DelverResult<()> {
    let mut session = session(
        Hero::new(Position::new(3, 3)),
        &[Enemy::new(Position::new(3, 5))],
    );

    session.submit_input("up".parse::<Intent>()?);
    assert_eq!(session.tick(), TurnResult::Continued);
    assert_eq!(session.tick(), TurnResult::NoOp);
    assert_eq!(session.tick(), TurnResult::NoOp);

    assert_eq!(session.hero().position, Position::new(3, 2));
    assert_eq!(session.enemies()[0].position, Position::new(3, 4));
    assert_eq!(session.hero().health, 100);
    assert_eq!(session.turn_number(), 1);
    session.level().check_consistency()
}

#[test]
fn test_potion_heal_is_capped() {
    let mut hero = Hero::new(Position::new(2, 2));
    hero.health = 90;
    let mut level = room_level();
    level.place_hero(hero).unwrap();
    level.place_potion(Position::new(3, 2)).unwrap();
    level.place_enemy(Enemy::new(Position::new(6, 6))).unwrap();
    let mut session = GameSession::new(level).unwrap();

    session.submit_input(Intent::RIGHT);
    assert_eq!(session.tick(), TurnResult::Continued);
    assert_eq!(session.hero().health, 100);
    assert!(session.potions().is_empty());
    assert_eq!(session.grid().get(Position::new(3, 2)), Tile::Hero { health: 100 });
    assert_eq!(session.statistics().potions_consumed, 1);
}

#[test]
fn test_sword_raises_attack() {
    let mut level = room_level();
    level.place_hero(Hero::new(Position::new(2, 2))).unwrap();
    level.place_sword(Position::new(2, 3)).unwrap();
    level.place_enemy(Enemy::new(Position::new(6, 6))).unwrap();
    let mut session = GameSession::new(level).unwrap();

    session.submit_input(Intent::DOWN);
    session.tick();
    assert_eq!(session.hero().attack_power, 30);
    assert!(session.swords().is_empty());
}

#[test]
fn test_attack_kills_weak_enemy_and_frees_its_cell() {
    let mut session = session(
        Hero::new(Position::new(4, 4)),
        &[
            Enemy::with_health(Position::new(5, 5), 15),
            Enemy::new(Position::new(2, 2)),
        ],
    );

    session.submit_input(Intent::Attack);
    assert_eq!(session.tick(), TurnResult::Continued);
    assert_eq!(session.grid().get(Position::new(5, 5)), Tile::Floor);
    assert_eq!(session.enemies().len(), 1);
    assert_eq!(session.statistics().enemies_defeated, 1);
}

#[test]
fn test_attack_hits_every_neighbour() {
    let mut session = session(
        Hero::new(Position::new(4, 4)),
        &[
            Enemy::new(Position::new(3, 3)),
            Enemy::new(Position::new(5, 4)),
            Enemy::new(Position::new(4, 5)),
            Enemy::new(Position::new(6, 6)),
        ],
    );

    session.submit_input(Intent::Attack);
    session.tick();

    let healths: Vec<i32> = session.enemies().iter().map(|e| e.health).collect();
    assert_eq!(healths, vec![80, 80, 80, 100]);
}

#[test]
fn test_adjacent_enemy_damage_stacks() {
    let mut session = session(
        Hero::new(Position::new(4, 4)),
        &[
            Enemy::new(Position::new(4, 3)),
            Enemy::new(Position::new(3, 4)),
            Enemy::new(Position::new(5, 4)),
        ],
    );

    // Walk into an enemy: the move is blocked and the turn still runs.
    session.submit_input(Intent::UP);
    assert_eq!(session.tick(), TurnResult::Continued);
    assert_eq!(session.hero().position, Position::new(4, 4));
    assert_eq!(session.hero().health, 85);
    assert_eq!(session.grid().get(Position::new(4, 4)), Tile::Hero { health: 85 });
    assert_eq!(session.statistics().damage_taken, 15);
}

#[test]
fn test_walls_block_movement() {
    let mut session = session(
        Hero::new(Position::new(2, 2)),
        &[Enemy::new(Position::new(6, 6))],
    );

    session.submit_input(Intent::LEFT);
    assert_eq!(session.tick(), TurnResult::Continued);
    assert_eq!(session.hero().position, Position::new(2, 2));
    assert_eq!(session.turn_number(), 1);
    assert_eq!(session.statistics().steps_taken, 0);
}

#[test]
fn test_defeat_is_final() {
    let mut hero = Hero::new(Position::new(2, 2));
    hero.health = 5;
    let mut session = session(hero, &[Enemy::new(Position::new(3, 2))]);

    session.submit_input(Intent::LEFT);
    assert_eq!(session.tick(), TurnResult::Defeat);
    assert!(session.is_game_ended());
    assert_eq!(session.hero().health, 0);

    let enemy_before = session.enemies().to_vec();
    session.submit_input(Intent::Attack);
    assert_eq!(session.tick(), TurnResult::Defeat);
    assert_eq!(session.enemies(), enemy_before.as_slice());
    assert_eq!(session.turn_number(), 1);
}

#[test]
fn test_enemies_chase_around_pickups_not_through_them() {
    let mut level = room_level();
    level.place_hero(Hero::new(Position::new(2, 2))).unwrap();
    level.place_potion(Position::new(2, 5)).unwrap();
    level.place_enemy(Enemy::new(Position::new(2, 6))).unwrap();
    let mut session = GameSession::new(level).unwrap();

    session.submit_input(Intent::RIGHT);
    session.tick();

    // Target (3,2): dx = 1, dy = -4, so the enemy tries (2,5) and stays put.
    assert_eq!(session.enemies()[0].position, Position::new(2, 6));
    assert_eq!(session.potions(), &[Position::new(2, 5)]);
}

fn any_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::LEFT),
        Just(Intent::UP),
        Just(Intent::DOWN),
        Just(Intent::RIGHT),
        Just(Intent::Attack),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn tiles_match_rosters_after_every_tick(
        seed in any::<u64>(),
        intents in prop::collection::vec(any_intent(), 1..120),
    ) {
        let config = GenerationConfig::for_testing(seed);
        let mut session = GameSession::generate(&config).unwrap();
        let mut outcome = None;

        for intent in intents {
            let before = session.level().clone();
            session.submit_input(intent);
            let result = session.tick();

            let level = session.level();
            prop_assert!(level.check_consistency().is_ok());
            prop_assert_eq!(level.grid().count_kind(TileKind::Hero), 1);
            prop_assert_eq!(level.grid().get(level.hero().position).kind(), TileKind::Hero);
            prop_assert_eq!(level.grid().count_kind(TileKind::Enemy), level.enemies().len());

            if let Some(terminal) = outcome {
                prop_assert_eq!(result, terminal);
                prop_assert_eq!(level, &before);
            } else if result.is_terminal() {
                outcome = Some(result);
            } else {
                prop_assert_eq!(result, TurnResult::Continued);
            }
        }
    }
}
