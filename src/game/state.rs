//! # Game State Module
//!
//! The session object that owns a level and advances it one turn at a time.
//!
//! A turn runs only when an intent is buffered: the hero acts, every enemy
//! takes its step and strike, and the terminal conditions are checked. Once
//! the hero is dead or the last enemy has fallen, the session is frozen and
//! every further tick reports the same outcome.

use crate::game::{resolve_intent, run_enemy_phase, Enemy, Grid, Hero, Level, Position};
use crate::generation::{generate_level, utils, GenerationConfig};
use crate::input::{InputBuffer, Intent};
use crate::{DelverError, DelverResult};
use serde::{Deserialize, Serialize};

/// Outcome of a single [`GameSession::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnResult {
    /// No intent was buffered; nothing happened
    NoOp,
    /// A turn was resolved and the game goes on
    Continued,
    /// Every enemy is dead
    Victory,
    /// The hero is dead
    Defeat,
}

impl TurnResult {
    pub fn is_terminal(self) -> bool {
        matches!(self, TurnResult::Victory | TurnResult::Defeat)
    }
}

/// Something observable that happened during a turn.
///
/// The presentation layer drains these after each tick to drive messages and
/// screen flashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The hero stepped to a new cell
    HeroMoved { from: Position, to: Position },
    /// The hero tried to step into a wall, off the grid, or into an enemy
    MoveBlocked { from: Position, to: Position },
    /// The hero drank a potion
    PotionConsumed { position: Position, health: i32 },
    /// The hero picked up a sword
    SwordCollected { position: Position, attack_power: i32 },
    /// The hero swung at all neighbouring cells
    HeroAttacked { position: Position, hits: u32 },
    /// An enemy took damage from the hero
    EnemyDamaged {
        position: Position,
        damage: i32,
        remaining: i32,
    },
    /// An enemy was removed from the level
    EnemyDefeated { position: Position },
    /// An enemy stepped toward the hero
    EnemyMoved { from: Position, to: Position },
    /// An adjacent enemy struck the hero
    HeroHit {
        by: Position,
        damage: i32,
        remaining: i32,
    },
    /// The last enemy fell
    GameWon,
    /// The hero fell
    GameLost,
}

/// Running totals for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Number of turns resolved
    pub turns_taken: u64,
    /// Number of successful hero steps
    pub steps_taken: u64,
    /// Number of enemies defeated
    pub enemies_defeated: u32,
    /// Number of potions consumed
    pub potions_consumed: u32,
    /// Number of swords collected
    pub swords_collected: u32,
    /// Total damage dealt by the hero
    pub damage_dealt: u64,
    /// Total damage taken by the hero
    pub damage_taken: u64,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::HeroMoved { .. } => {
                self.steps_taken += 1;
            }
            GameEvent::PotionConsumed { .. } => {
                self.potions_consumed += 1;
            }
            GameEvent::SwordCollected { .. } => {
                self.swords_collected += 1;
            }
            GameEvent::EnemyDamaged { damage, .. } => {
                self.damage_dealt += *damage as u64;
            }
            GameEvent::EnemyDefeated { .. } => {
                self.enemies_defeated += 1;
            }
            GameEvent::HeroHit { damage, .. } => {
                self.damage_taken += *damage as u64;
            }
            _ => {}
        }
    }
}

/// A live single-level game: the level, the input buffer, and turn tracking.
#[derive(Debug, Clone)]
pub struct GameSession {
    level: Level,
    input: InputBuffer,
    turn_number: u64,
    statistics: GameStatistics,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Starts a session on a populated level.
    ///
    /// Fails if the level has no hero or its tiles disagree with its rosters.
    pub fn new(level: Level) -> DelverResult<Self> {
        if !level.hero_placed() {
            return Err(DelverError::InvalidState(
                "level has no hero to control".to_string(),
            ));
        }
        level.check_consistency()?;

        Ok(Self {
            level,
            input: InputBuffer::new(),
            turn_number: 0,
            statistics: GameStatistics::new(),
            events: Vec::new(),
        })
    }

    /// Generates a level from the config's seed and starts a session on it.
    ///
    /// # Examples
    ///
    /// ```
    /// use delver::{GameSession, GenerationConfig};
    ///
    /// let session = GameSession::generate(&GenerationConfig::new(12345)).unwrap();
    /// assert_eq!(session.turn_number(), 0);
    /// assert_eq!(session.hero().health, 100);
    /// ```
    pub fn generate(config: &GenerationConfig) -> DelverResult<Self> {
        let mut rng = utils::create_rng(config);
        let level = generate_level(config, &mut rng)?;
        Self::new(level)
    }

    /// Buffers an intent for the next tick, replacing any unconsumed one.
    pub fn submit_input(&mut self, intent: Intent) {
        self.input.submit(intent);
    }

    pub fn pending_input(&self) -> Option<Intent> {
        self.input.peek()
    }

    /// Advances the game by exactly one turn if an intent is buffered.
    ///
    /// A terminal session is never mutated again; it keeps returning its
    /// outcome.
    pub fn tick(&mut self) -> TurnResult {
        if let Some(outcome) = self.outcome() {
            return outcome;
        }

        let Some(intent) = self.input.take() else {
            return TurnResult::NoOp;
        };

        self.turn_number += 1;
        let mut events = Vec::new();
        resolve_intent(&mut self.level, intent, &mut events);
        run_enemy_phase(&mut self.level, &mut events);

        let result = match self.outcome() {
            Some(TurnResult::Defeat) => {
                log::info!("hero fell on turn {}", self.turn_number);
                events.push(GameEvent::GameLost);
                TurnResult::Defeat
            }
            Some(TurnResult::Victory) => {
                log::info!("all enemies defeated on turn {}", self.turn_number);
                events.push(GameEvent::GameWon);
                TurnResult::Victory
            }
            _ => TurnResult::Continued,
        };

        self.statistics.turns_taken += 1;
        for event in &events {
            self.statistics.update_from_event(event);
        }
        log::debug!(
            "turn {}: {:?} -> {:?} ({} events)",
            self.turn_number,
            intent,
            result,
            events.len()
        );
        self.events.extend(events);

        result
    }

    /// The terminal outcome, if the session has reached one.
    pub fn outcome(&self) -> Option<TurnResult> {
        if !self.level.hero().is_alive() {
            Some(TurnResult::Defeat)
        } else if self.level.enemies().is_empty() {
            Some(TurnResult::Victory)
        } else {
            None
        }
    }

    pub fn is_game_ended(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn grid(&self) -> &Grid {
        self.level.grid()
    }

    pub fn hero(&self) -> &Hero {
        self.level.hero()
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.level.enemies()
    }

    pub fn swords(&self) -> &[Position] {
        self.level.swords()
    }

    pub fn potions(&self) -> &[Position] {
        self.level.potions()
    }

    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    pub fn statistics(&self) -> &GameStatistics {
        &self.statistics
    }

    /// Events recorded since the last [`take_events`](Self::take_events).
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drains the recorded events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
