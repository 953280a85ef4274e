//! Level module - one play session and its state machine
//!
//! A level wraps a [`Field`] and tracks score, health and the win/game-over
//! flags. [`Level::step_snake`] is the single authoritative per-move
//! transition:
//!
//! 1. Move the snake, wrapping around the field.
//! 2. On a crash (walls or own body) or a snake of one segment or less, lose a
//!    life. Losing resets score and snake while health remains, otherwise the
//!    game is over and the move ends here.
//! 3. Eat the food under the head, if any, including the head of a snake that
//!    was just reset. Eating the basic food first spawns a replacement so there
//!    is always basic food on the field.
//! 4. Reaching the max score wins the level.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::field::Field;
use crate::map;
use crate::rng::SimpleRng;
use crate::snake::Snake;
use crate::types::{Direction, Food, Vector};

/// Where a level stands after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    Playing,
    Won,
    GameOver,
}

/// What a single move did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub state: LevelState,
    /// Food eaten on this move
    pub eaten: Option<Food>,
    pub life_lost: bool,
}

#[derive(Debug, Clone)]
pub struct Level {
    field: Field,
    max_score: i32,
    score: i32,
    health: u32,
    win: bool,
    game_over: bool,
    name: String,
    /// Snake as the level started, restored after each lost life
    initial_snake: Snake,
    /// Food that is always kept on the field
    basic_food: Food,
    rng: SimpleRng,
}

impl Level {
    /// Ad-hoc level (editor, tests); the name is empty
    pub fn new(field: Field, max_score: i32, health: u32) -> Self {
        let initial_snake = field.snake().clone();
        Self {
            field,
            max_score,
            score: 0,
            health,
            win: false,
            game_over: false,
            name: String::new(),
            initial_snake,
            basic_food: Food::BASIC,
            rng: SimpleRng::default(),
        }
    }

    /// Named level parsed from a map file
    pub fn from_map(name: &str, path: &Path, health: u32) -> Result<Self> {
        let (field, max_score) = map::read_map(path)?;
        info!(level = name, path = %path.display(), max_score, "level loaded");
        Ok(Self::new(field, max_score, health).with_name(name))
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Seed the random source used for food placement
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.rng = SimpleRng::new(seed);
        self
    }

    pub fn with_basic_food(mut self, food: Food) -> Self {
        self.basic_food = food;
        self
    }

    pub fn with_max_score(mut self, max_score: i32) -> Self {
        self.max_score = max_score;
        self
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn max_score(&self) -> i32 {
        self.max_score
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn is_won(&self) -> bool {
        self.win
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn basic_food(&self) -> Food {
        self.basic_food
    }

    pub fn initial_snake(&self) -> &Snake {
        &self.initial_snake
    }

    pub fn state(&self) -> LevelState {
        if self.game_over {
            LevelState::GameOver
        } else if self.win {
            LevelState::Won
        } else {
            LevelState::Playing
        }
    }

    /// Advance the snake by one cell. A finished level does not move.
    pub fn step_snake(&mut self, direction: Option<Direction>) -> Result<StepOutcome> {
        if self.state() != LevelState::Playing {
            return Ok(StepOutcome {
                state: self.state(),
                eaten: None,
                life_lost: false,
            });
        }

        let size = self.field.size();
        self.field.snake_mut().step(direction, Some(size))?;

        let life_lost = self.field.is_crash() || self.field.snake().len() <= 1;
        if life_lost {
            self.lose();
            if self.game_over {
                return Ok(StepOutcome {
                    state: self.state(),
                    eaten: None,
                    life_lost,
                });
            }
        }

        // Runs against the reset snake too
        let eaten = self.eat_food_under_head()?;

        if self.score >= self.max_score {
            self.win = true;
            info!(level = %self.name, score = self.score, "level won");
        }

        Ok(StepOutcome {
            state: self.state(),
            eaten,
            life_lost,
        })
    }

    fn eat_food_under_head(&mut self) -> Result<Option<Food>> {
        let head = match self.field.snake().head() {
            Some(part) => part.location,
            None => return Ok(None),
        };
        let food = match self.field.food_at(head) {
            Some(food) => *food,
            None => return Ok(None),
        };

        if food == self.basic_food {
            match self.generate_food(self.basic_food) {
                Ok(_) | Err(Error::NoEmptyCell) => {}
                Err(err) => return Err(err),
            }
        }
        self.eat_food()?;
        Ok(Some(food))
    }

    /// Eat the food under the snake's head and bank its score
    pub fn eat_food(&mut self) -> Result<()> {
        self.score += self.field.eat_food(None)?;
        Ok(())
    }

    /// Place food with the level's own random source
    pub fn generate_food(&mut self, food: Food) -> Result<Vector> {
        match self.field.generate_food(food, &mut self.rng) {
            Err(Error::NoEmptyCell) => {
                debug!(level = %self.name, "no room for more food");
                Err(Error::NoEmptyCell)
            }
            other => other,
        }
    }

    /// Lose a life: reset while health remains, otherwise end the game
    pub fn lose(&mut self) {
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.game_over = true;
            info!(level = %self.name, score = self.score, "game over");
        } else {
            info!(level = %self.name, health = self.health, "life lost");
            self.reset();
        }
    }

    /// Zero the score and restore the starting snake
    pub fn reset(&mut self) {
        self.score = 0;
        self.field.set_snake(self.initial_snake.clone());
    }

    /// Cells left for the snake to fill; used as the free-play target
    pub fn free_play_target(&self) -> i32 {
        (self.field.open_cells().len() as i32) - (self.field.snake().len() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::SnakePart;
    use std::collections::HashSet;

    /// 3x3 field, wall row at y=2, snake along y=1 heading right
    fn level() -> Level {
        let walls: HashSet<Vector> = (0..3).map(|x| Vector::new(x, 2)).collect();
        let snake = Snake::new(vec![
            SnakePart::new(Vector::new(2, 1), Direction::Right),
            SnakePart::new(Vector::new(1, 1), Direction::Right),
            SnakePart::new(Vector::new(0, 1), Direction::Right),
        ]);
        let field = Field::new(snake, walls, (3, 3)).unwrap();
        Level::new(field, 5, 3).with_name("level")
    }

    #[test]
    fn starts_playing() {
        let level = level();
        assert_eq!(level.state(), LevelState::Playing);
        assert_eq!(level.score(), 0);
        assert_eq!(level.name(), "level");
    }

    #[test]
    fn reset_restores_starting_snake() {
        let mut level = level();
        level.step_snake(Some(Direction::Up)).unwrap();
        assert_ne!(level.field().snake(), level.initial_snake());

        level.reset();
        assert_eq!(level.field().snake(), level.initial_snake());
        assert_eq!(level.score(), 0);
    }

    #[test]
    fn lose_with_health_left_resets() {
        let mut level = level();
        level.lose();
        assert_eq!(level.health(), 2);
        assert!(!level.is_game_over());
    }

    #[test]
    fn lose_last_life_is_game_over() {
        let mut level = level();
        level.health = 1;
        level.lose();
        assert!(level.is_game_over());
        assert_eq!(level.state(), LevelState::GameOver);
    }

    #[test]
    fn eat_food_adds_score() {
        let mut level = level();
        let food = Food::new(1.0, 1, 10).unwrap();
        level.field_mut().insert_food(Vector::new(2, 1), food);
        level.eat_food().unwrap();
        assert_eq!(level.score(), 10);
    }

    #[test]
    fn reaching_max_score_wins() {
        let mut level = level();
        level.score = level.max_score();
        let outcome = level.step_snake(None).unwrap();
        assert_eq!(outcome.state, LevelState::Won);
        assert!(level.is_won());
        assert!(!level.is_game_over());
    }

    #[test]
    fn crash_into_wall_loses_life() {
        let mut level = level();
        level.field_mut().add_wall(Vector::new(0, 1));
        // Head moves from (2, 1) to (0, 1) by wrapping
        let outcome = level.step_snake(None).unwrap();
        assert!(outcome.life_lost);
        assert_eq!(level.health(), 2);
    }

    #[test]
    fn reset_head_eats_food_on_the_losing_move() {
        let mut level = level();
        level.health = 2;
        level.field_mut().add_wall(Vector::new(0, 1));
        let special = Food::new(1.0, 1, 3).unwrap();
        level.field_mut().insert_food(Vector::new(2, 1), special);

        let outcome = level.step_snake(None).unwrap();
        assert!(outcome.life_lost);
        assert_eq!(outcome.state, LevelState::Playing);
        assert_eq!(outcome.eaten, Some(special));
        assert_eq!(level.health(), 1);
        assert_eq!(level.score(), 3);
        assert!(level.field().foods().is_empty());
    }

    #[test]
    fn game_over_move_eats_nothing() {
        let mut level = level();
        level.health = 1;
        level.field_mut().add_wall(Vector::new(0, 1));
        level.field_mut().insert_food(Vector::new(0, 1), Food::new(1.0, 1, 50).unwrap());

        let outcome = level.step_snake(None).unwrap();
        assert!(outcome.life_lost);
        assert_eq!(outcome.state, LevelState::GameOver);
        assert!(level.is_game_over());
        assert!(!level.is_won());
        assert_eq!(level.health(), 0);
        assert_eq!(outcome.eaten, None);
        assert_eq!(level.field().foods().len(), 1);
    }

    #[test]
    fn crash_resets_score_and_snake() {
        let mut level = level();
        level.field_mut().insert_food(Vector::new(2, 0), Food::new(1.0, 1, 2).unwrap());
        level.step_snake(Some(Direction::Up)).unwrap();
        assert_eq!(level.score(), 2);
        assert_ne!(level.field().snake(), level.initial_snake());

        // Head at (2, 0) heading up wraps into the wall row at y=2
        let outcome = level.step_snake(None).unwrap();
        assert!(outcome.life_lost);
        assert_eq!(level.score(), 0);
        assert_eq!(level.health(), 2);
        assert_eq!(level.field().snake(), level.initial_snake());

        let initial = level.initial_snake().clone();
        level.step_snake(Some(Direction::Up)).unwrap();
        assert_ne!(level.field().snake(), &initial);
        assert_eq!(level.initial_snake(), &initial);
    }

    #[test]
    fn generated_food_round_trips_through_eat() {
        let mut level = level().with_seed(7);
        let food = Food::new(1.0, 2, 4).unwrap();
        let location = level.generate_food(food).unwrap();
        assert_eq!(level.field().food_at(location), Some(&food));

        let score = level.field_mut().eat_food(Some(location)).unwrap();
        assert_eq!(score, food.score());
        assert!(level.field().food_at(location).is_none());
    }

    #[test]
    fn eating_basic_food_spawns_replacement() {
        let mut level = level();
        level.field_mut().insert_food(Vector::new(0, 1), Food::BASIC);
        let outcome = level.step_snake(None).unwrap();

        assert_eq!(outcome.eaten, Some(Food::BASIC));
        assert_eq!(level.score(), 1);
        assert_eq!(level.field().foods().len(), 1);
        assert!(level.field().foods().values().all(Food::is_basic));
    }

    #[test]
    fn eating_special_food_spawns_nothing() {
        let mut level = level();
        let special = Food::new(2.0, 2, 2).unwrap();
        level.field_mut().insert_food(Vector::new(0, 1), special);
        let outcome = level.step_snake(None).unwrap();

        assert_eq!(outcome.eaten, Some(special));
        assert!(level.field().foods().is_empty());
        assert_eq!(level.score(), 2);
    }

    #[test]
    fn finished_level_does_not_move() {
        let mut level = level();
        level.lose();
        level.lose();
        level.lose();
        let before = level.field().snake().clone();
        let outcome = level.step_snake(None).unwrap();
        assert_eq!(outcome.state, LevelState::GameOver);
        assert_eq!(level.field().snake(), &before);
    }

    #[test]
    fn free_play_target_counts_open_cells() {
        let level = level();
        assert_eq!(level.free_play_target(), 6 - 3);
    }
}
