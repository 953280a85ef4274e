//! Field module - the grid the snake lives on
//!
//! Holds the walls, the live snake and the food currently lying around.
//! Cells not covered by a wall are precomputed in row-major order, which keeps
//! food placement reproducible for a seeded random source.

use std::collections::{HashMap, HashSet};

use rand::{Rng, RngCore};
use tracing::debug;

use crate::error::{Error, Result};
use crate::snake::Snake;
use crate::types::{Food, Vector};

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    snake: Snake,
    walls: HashSet<Vector>,
    foods: HashMap<Vector, Food>,
    width: i32,
    height: i32,
    /// In-bounds cells without a wall, row-major
    open_cells: Vec<Vector>,
}

impl Field {
    pub fn new(snake: Snake, walls: HashSet<Vector>, size: (i32, i32)) -> Result<Self> {
        let (width, height) = size;
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidSize { width, height });
        }
        let mut field = Self {
            snake,
            walls,
            foods: HashMap::new(),
            width,
            height,
            open_cells: Vec::new(),
        };
        field.refresh_open_cells();
        Ok(field)
    }

    fn refresh_open_cells(&mut self) {
        self.open_cells = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Vector::new(x, y)))
            .filter(|cell| !self.walls.contains(cell))
            .collect();
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    /// Replace the live snake wholesale
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    pub fn walls(&self) -> &HashSet<Vector> {
        &self.walls
    }

    pub fn foods(&self) -> &HashMap<Vector, Food> {
        &self.foods
    }

    pub fn food_at(&self, cell: Vector) -> Option<&Food> {
        self.foods.get(&cell)
    }

    /// Cells not covered by a wall, row-major
    pub fn open_cells(&self) -> &[Vector] {
        &self.open_cells
    }

    pub fn in_bounds(&self, cell: Vector) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Add a wall during editing. Returns false if the cell already was a wall.
    pub fn add_wall(&mut self, cell: Vector) -> bool {
        let added = self.walls.insert(cell);
        if added {
            self.refresh_open_cells();
        }
        added
    }

    /// Remove a wall during editing. Returns false if there was none.
    pub fn remove_wall(&mut self, cell: Vector) -> bool {
        let removed = self.walls.remove(&cell);
        if removed {
            self.refresh_open_cells();
        }
        removed
    }

    /// Snake overlaps itself or a wall
    pub fn is_crash(&self) -> bool {
        self.snake.check_intersection(&self.walls)
    }

    /// Open cells holding neither snake nor food, row-major
    pub fn empty_cells(&self) -> Vec<Vector> {
        let occupied: HashSet<Vector> = self.snake.locations().collect();
        self.open_cells
            .iter()
            .copied()
            .filter(|cell| !occupied.contains(cell) && !self.foods.contains_key(cell))
            .collect()
    }

    /// Put `food` on a uniformly random empty cell and return that cell.
    pub fn generate_food<R: RngCore>(&mut self, food: Food, rng: &mut R) -> Result<Vector> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return Err(Error::NoEmptyCell);
        }
        let location = empty[rng.random_range(0..empty.len())];
        self.foods.insert(location, food);
        debug!(%location, ?food, "food placed");
        Ok(location)
    }

    /// Place food on a known cell, replacing whatever food was there
    pub fn insert_food(&mut self, location: Vector, food: Food) -> Option<Food> {
        self.foods.insert(location, food)
    }

    pub fn remove_food(&mut self, location: Vector) -> Option<Food> {
        self.foods.remove(&location)
    }

    /// Feed the snake the food at `location` (default: under its head).
    ///
    /// Returns the food's score.
    pub fn eat_food(&mut self, location: Option<Vector>) -> Result<i32> {
        let location = match location {
            Some(cell) => cell,
            None => self.snake.head().ok_or(Error::EmptyQueue)?.location,
        };
        let food = self
            .foods
            .remove(&location)
            .ok_or(Error::MissingFood(location))?;
        self.snake.eat_food(&food);
        Ok(food.score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::snake::SnakePart;
    use crate::types::Direction;

    fn field() -> Field {
        let snake = Snake::new(vec![
            SnakePart::new(Vector::new(3, 0), Direction::Right),
            SnakePart::new(Vector::new(2, 0), Direction::Right),
        ]);
        let walls = HashSet::from([Vector::new(3, 1), Vector::new(2, 1), Vector::new(1, 1)]);
        Field::new(snake, walls, (4, 4)).unwrap()
    }

    #[test]
    fn rejects_empty_size() {
        let err = Field::new(Snake::empty(), HashSet::new(), (0, 3)).unwrap_err();
        assert!(matches!(err, Error::InvalidSize { width: 0, height: 3 }));
    }

    #[test]
    fn open_cells_exclude_walls() {
        let field = field();
        assert_eq!(field.open_cells().len(), 16 - 3);
        assert!(!field.open_cells().contains(&Vector::new(2, 1)));
        assert_eq!(field.open_cells()[0], Vector::new(0, 0));
        assert_eq!(field.open_cells()[4], Vector::new(0, 1));
    }

    #[test]
    fn editing_walls_recomputes_open_cells() {
        let mut field = field();
        assert!(field.add_wall(Vector::new(0, 3)));
        assert!(!field.add_wall(Vector::new(0, 3)));
        assert_eq!(field.open_cells().len(), 12);

        assert!(field.remove_wall(Vector::new(2, 1)));
        assert!(!field.remove_wall(Vector::new(2, 1)));
        assert_eq!(field.open_cells().len(), 13);
        assert!(field.open_cells().contains(&Vector::new(2, 1)));
    }

    #[test]
    fn is_crash() {
        let mut field = field();
        assert!(!field.is_crash());

        field.set_snake(Snake::new(vec![SnakePart::new(Vector::new(1, 1), Direction::Right)]));
        assert!(field.is_crash());
    }

    #[test]
    fn eat_food_at_location_and_at_head() {
        let mut field = field();
        let food = Food::new(1.0, 1, 3).unwrap();

        field.insert_food(Vector::new(0, 3), food);
        assert_eq!(field.eat_food(Some(Vector::new(0, 3))).unwrap(), 3);
        assert!(field.foods().is_empty());

        field.insert_food(Vector::new(3, 0), food);
        assert_eq!(field.eat_food(None).unwrap(), 3);
        assert_eq!(field.snake().pending_length_change(), 2);
    }

    #[test]
    fn eat_missing_food_fails() {
        let mut field = field();
        let err = field.eat_food(Some(Vector::new(0, 0))).unwrap_err();
        assert!(matches!(err, Error::MissingFood(v) if v == Vector::new(0, 0)));
    }

    #[test]
    fn generate_food_avoids_walls_snake_and_food() {
        let mut field = field();
        let mut rng = SimpleRng::new(42);
        let food = Food::new(1.0, 2, 3).unwrap();

        let mut placed = HashSet::new();
        // 13 open cells, 2 taken by the snake
        for _ in 0..11 {
            let location = field.generate_food(food, &mut rng).unwrap();
            assert!(field.in_bounds(location));
            assert!(!field.walls().contains(&location));
            assert!(!field.snake().contains(location));
            assert!(placed.insert(location));
        }
        assert_eq!(field.foods().len(), 11);
        assert!(field.foods().values().all(|f| *f == food));
        assert!(matches!(
            field.generate_food(food, &mut rng),
            Err(Error::NoEmptyCell)
        ));
    }

    #[test]
    fn generated_food_is_eaten_back_for_its_score() {
        let mut field = field();
        let food = Food::new(0.5, -1, 6).unwrap();
        let location = field.generate_food(food, &mut SimpleRng::new(3)).unwrap();
        assert_eq!(field.foods().get(&location), Some(&food));

        assert_eq!(field.eat_food(Some(location)).unwrap(), food.score());
        assert!(!field.foods().contains_key(&location));
        assert!(matches!(
            field.eat_food(Some(location)),
            Err(Error::MissingFood(cell)) if cell == location
        ));
    }

    #[test]
    fn generate_food_is_reproducible() {
        let mut a = field();
        let mut b = field();
        let first = a.generate_food(Food::BASIC, &mut SimpleRng::new(5)).unwrap();
        let second = b.generate_food(Food::BASIC, &mut SimpleRng::new(5)).unwrap();
        assert_eq!(first, second);
    }
}
