//! Session module - frame-driven play on top of a [`Level`]
//!
//! The front end calls [`Session::tick`] once per frame. The snake moves every
//! `floor(frame_rate / speed)` frames (every frame when that is zero), basic
//! food is topped up after each move, and a special food appears once per
//! special-food period, replacing the previous one.

use arrayvec::ArrayVec;
use rand::Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::level::{Level, LevelState, StepOutcome};
use crate::rng::SimpleRng;
use crate::settings::Settings;
use crate::types::{Direction, Food, Vector, FRAME_RATE, SPECIAL_FOOD_PERIOD_SECS};

/// Steering inputs queued between moves
pub const DIRECTION_BUFFER_CAPACITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub frame_rate: u32,
    pub special_food_period_secs: u32,
    /// Seed for picking which special food appears
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            special_food_period_secs: SPECIAL_FOOD_PERIOD_SECS,
            seed: 1,
        }
    }
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            frame_rate: settings.frame_rate,
            special_food_period_secs: settings.special_food_period_secs,
            seed: settings.seed.unwrap_or(1),
        }
    }

    fn special_period_ticks(&self) -> u64 {
        u64::from(self.frame_rate) * u64::from(self.special_food_period_secs)
    }
}

/// Small FIFO of pending turns.
///
/// Lets a quick "up, left" between two moves register as two turns. A turn is
/// dropped if it repeats the last queued heading or reverses it.
#[derive(Debug, Clone, Default)]
pub struct DirectionBuffer {
    queue: ArrayVec<Direction, DIRECTION_BUFFER_CAPACITY>,
}

impl DirectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `direction`. `heading` is the snake's current direction, used
    /// when nothing is queued yet.
    pub fn push(&mut self, direction: Direction, heading: Option<Direction>) -> bool {
        if self.queue.is_full() {
            return false;
        }
        if let Some(last) = self.queue.last().copied().or(heading) {
            if direction == last || direction == last.opposite() {
                return false;
            }
        }
        self.queue.push(direction);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.queue.pop_at(0)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Set when the snake moved this frame
    pub step: Option<StepOutcome>,
    pub special_spawned: Option<Vector>,
}

impl TickReport {
    pub fn moved(&self) -> bool {
        self.step.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    level: Level,
    config: SessionConfig,
    specials: Vec<Food>,
    buffer: DirectionBuffer,
    tick: u64,
    paused: bool,
    /// Last special food placed and where
    special: Option<(Vector, Food)>,
    rng: SimpleRng,
}

impl Session {
    pub fn new(level: Level, config: SessionConfig, specials: Vec<Food>) -> Self {
        Self {
            level,
            rng: SimpleRng::new(config.seed),
            config,
            specials,
            buffer: DirectionBuffer::new(),
            tick: 0,
            paused: false,
            special: None,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn into_level(self) -> Level {
        self.level
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn state(&self) -> LevelState {
        self.level.state()
    }

    pub fn pending_directions(&self) -> &DirectionBuffer {
        &self.buffer
    }

    pub fn special_location(&self) -> Option<Vector> {
        self.special.map(|(location, _)| location)
    }

    /// Returns the new paused flag
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        self.paused
    }

    /// Queue a turn for an upcoming move; false if it was dropped
    pub fn push_direction(&mut self, direction: Direction) -> bool {
        let heading = self.level.field().snake().head().map(|part| part.direction);
        self.buffer.push(direction, heading)
    }

    /// Frames between two moves at the current speed; zero means every frame
    pub fn ticks_per_move(&self) -> u64 {
        let speed = self.level.field().snake().speed();
        (f64::from(self.config.frame_rate) / speed).floor() as u64
    }

    /// Advance one frame. Paused or finished sessions do nothing.
    pub fn tick(&mut self) -> Result<TickReport> {
        let mut report = TickReport::default();
        if self.paused || self.level.state() != LevelState::Playing {
            return Ok(report);
        }

        let ticks_per_move = self.ticks_per_move();
        if ticks_per_move == 0 || self.tick % ticks_per_move == 0 {
            let outcome = self.level.step_snake(self.buffer.pop())?;
            if outcome.life_lost {
                self.buffer.clear();
            }
            if outcome.state == LevelState::Playing && self.level.field().foods().len() <= 1 {
                let basic = self.level.basic_food();
                ignore_full_field(self.level.generate_food(basic))?;
            }
            report.step = Some(outcome);
        }

        let period = self.config.special_period_ticks();
        if period > 0
            && self.tick >= 1
            && (self.tick - 1) % period == 0
            && !self.specials.is_empty()
            && self.level.state() == LevelState::Playing
        {
            report.special_spawned = self.spawn_special()?;
        }

        self.tick += 1;
        Ok(report)
    }

    fn spawn_special(&mut self) -> Result<Option<Vector>> {
        if let Some((location, food)) = self.special.take() {
            if self.level.field().food_at(location) == Some(&food) {
                self.level.field_mut().remove_food(location);
            }
        }

        let food = self.specials[self.rng.random_range(0..self.specials.len())];
        let placed = ignore_full_field(self.level.generate_food(food))?;
        if let Some(location) = placed {
            self.special = Some((location, food));
        }
        Ok(placed)
    }
}

fn ignore_full_field(result: Result<Vector>) -> Result<Option<Vector>> {
    match result {
        Ok(location) => Ok(Some(location)),
        Err(Error::NoEmptyCell) => Ok(None),
        Err(err) => Err(err),
    }
}
