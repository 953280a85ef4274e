//! Level editor model: paint walls, erase, drop a snake, save as a map
//!
//! Only the model lives here. The terminal binary has no editor screen; maps
//! written by [`LevelEditor::save`] load like any bundled level.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::field::Field;
use crate::map;
use crate::snake::Snake;
use crate::types::{Direction, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Wall,
    Eraser,
    /// Three-segment snake centred on the cell
    Snake(Direction),
}

#[derive(Debug, Clone)]
pub struct LevelEditor {
    field: Field,
    max_score: i32,
}

impl LevelEditor {
    pub fn new(width: i32, height: i32, max_score: i32) -> Result<Self> {
        Ok(Self {
            field: Field::new(Snake::empty(), HashSet::new(), (width, height))?,
            max_score,
        })
    }

    /// Continue editing an existing map
    pub fn open(path: &Path) -> Result<Self> {
        let (field, max_score) = map::read_map(path)?;
        Ok(Self { field, max_score })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn max_score(&self) -> i32 {
        self.max_score
    }

    pub fn set_max_score(&mut self, max_score: i32) {
        self.max_score = max_score;
    }

    /// Use `tool` on `cell`. Returns whether anything changed.
    pub fn apply(&mut self, tool: Tool, cell: Vector) -> bool {
        if !self.field.in_bounds(cell) {
            return false;
        }
        match tool {
            Tool::Wall => !self.field.snake().contains(cell) && self.field.add_wall(cell),
            Tool::Eraser => {
                if self.field.snake().contains(cell) {
                    self.field.set_snake(Snake::empty());
                    true
                } else {
                    self.field.remove_wall(cell)
                }
            }
            Tool::Snake(direction) => {
                let snake = Snake::centered(cell, direction);
                let fits = snake
                    .locations()
                    .all(|part| self.field.in_bounds(part) && !self.field.walls().contains(&part));
                if fits {
                    self.field.set_snake(snake);
                }
                fits
            }
        }
    }

    /// Write the map; fails unless a snake has been placed
    pub fn save(&self, path: &Path) -> Result<()> {
        map::write_map(path, &self.field, self.max_score)?;
        info!(path = %path.display(), "map saved");
        Ok(())
    }
}
