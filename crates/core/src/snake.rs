//! Snake module - segment-queue movement model
//!
//! The body is a [`SegmentQueue`] whose oldest element is the tail and whose
//! newest element is the head. A move enqueues a new head and dequeues the old
//! tail; growth simply skips the dequeue. Each segment remembers the direction
//! it was moving in when it was placed, which the renderer uses for corners.

use std::collections::{vec_deque, HashSet};
use std::iter::Rev;

use crate::error::{Error, Result};
use crate::queue::SegmentQueue;
use crate::types::{Direction, Food, Vector, DEFAULT_SNAKE_SPEED};

/// One occupied cell of the snake body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnakePart {
    pub location: Vector,
    pub direction: Direction,
}

impl SnakePart {
    pub fn new(location: Vector, direction: Direction) -> Self {
        Self {
            location,
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Stored tail -> head
    body: SegmentQueue<SnakePart>,
    /// Cells per second, always > 0
    speed: f64,
    /// Growth (> 0) or shrink (< 0) still owed, one unit per move
    pending_length_change: i32,
}

impl Snake {
    /// Build a snake from parts listed head -> tail
    pub fn new(parts: Vec<SnakePart>) -> Self {
        Self::with_speed(parts, DEFAULT_SNAKE_SPEED)
    }

    pub fn with_speed(parts: Vec<SnakePart>, speed: f64) -> Self {
        Self {
            body: parts.into_iter().rev().collect(),
            speed,
            pending_length_change: 0,
        }
    }

    /// Placeholder used by the editor before a snake is placed
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Three segments centred on `mid`, all facing `direction`
    pub fn centered(mid: Vector, direction: Direction) -> Self {
        let offset = direction.offset();
        Self::new(vec![
            SnakePart::new(mid + offset, direction),
            SnakePart::new(mid, direction),
            SnakePart::new(mid - offset, direction),
        ])
    }

    /// Most recently placed segment
    pub fn head(&self) -> Option<&SnakePart> {
        self.body.peek_tail()
    }

    /// Oldest segment
    pub fn tail(&self) -> Option<&SnakePart> {
        self.body.peek_head()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn pending_length_change(&self) -> i32 {
        self.pending_length_change
    }

    pub fn set_pending_length_change(&mut self, delta: i32) {
        self.pending_length_change = delta;
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Segments from head to tail
    pub fn iter(&self) -> Rev<vec_deque::Iter<'_, SnakePart>> {
        self.body.iter().rev()
    }

    pub fn contains(&self, cell: Vector) -> bool {
        self.body.iter().any(|part| part.location == cell)
    }

    pub fn locations(&self) -> impl Iterator<Item = Vector> + '_ {
        self.body.iter().map(|part| part.location)
    }

    /// Apply a food's effect; the body changes over the following moves
    pub fn eat_food(&mut self, food: &Food) {
        self.speed *= food.speed_change();
        self.pending_length_change += food.length_change();
    }

    /// Direction the next move will actually take.
    ///
    /// No input keeps the current heading, and a reversal is ignored.
    pub fn direction_for_step(&self, proposed: Option<Direction>) -> Option<Direction> {
        let current = self.head()?.direction;
        Some(match proposed {
            Some(dir) if dir != current.opposite() => dir,
            _ => current,
        })
    }

    /// Move one cell.
    ///
    /// With `wrap` set to `(width, height)` the new head wraps around the field.
    /// Fails with [`Error::EmptyQueue`] when there is no head to move from.
    pub fn step(&mut self, proposed: Option<Direction>, wrap: Option<(i32, i32)>) -> Result<()> {
        let head = *self.head().ok_or(Error::EmptyQueue)?;
        let direction = self.direction_for_step(proposed).unwrap_or(head.direction);

        let mut location = head.location + direction.offset();
        if let Some((width, height)) = wrap {
            location = location.wrapped(width, height);
        }
        self.body.enqueue_tail(SnakePart::new(location, direction));

        if self.pending_length_change > 0 {
            self.pending_length_change -= 1;
            return Ok(());
        }
        if self.pending_length_change < 0 {
            self.pending_length_change += 1;
            self.body.dequeue_head()?;
        }
        self.body.dequeue_head()?;
        Ok(())
    }

    /// True if any two cells among the body and `extra` coincide.
    ///
    /// With an empty `extra` this is a self-collision test; passing the walls
    /// turns it into a crash test.
    pub fn check_intersection(&self, extra: &HashSet<Vector>) -> bool {
        let mut seen = extra.clone();
        let mut count = extra.len();
        for location in self.locations() {
            count += 1;
            seen.insert(location);
        }
        count != seen.len()
    }
}

impl<'a> IntoIterator for &'a Snake {
    type Item = &'a SnakePart;
    type IntoIter = Rev<vec_deque::Iter<'a, SnakePart>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn right(x: i32, y: i32) -> SnakePart {
        SnakePart::new(Vector::new(x, y), Direction::Right)
    }

    fn two_segments() -> Snake {
        Snake::new(vec![right(3, 0), right(2, 0)])
    }

    fn parts(snake: &Snake) -> Vec<SnakePart> {
        snake.iter().copied().collect()
    }

    #[test]
    fn head_and_tail() {
        let snake = two_segments();
        assert_eq!(snake.head(), Some(&right(3, 0)));
        assert_eq!(snake.tail(), Some(&right(2, 0)));
        assert_eq!(snake.len(), 2);
        assert_eq!(parts(&snake), vec![right(3, 0), right(2, 0)]);
    }

    #[test]
    fn eat_food_changes_speed_and_pending_length() {
        let mut snake = two_segments();
        let food = Food::new(2.0, 2, 2).unwrap();
        snake.eat_food(&food);
        assert_eq!(snake.speed(), DEFAULT_SNAKE_SPEED * 2.0);
        assert_eq!(snake.pending_length_change(), 2);
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn direction_for_step_ignores_reversal() {
        let snake = two_segments();
        assert_eq!(snake.direction_for_step(None), Some(Direction::Right));
        assert_eq!(snake.direction_for_step(Some(Direction::Right)), Some(Direction::Right));
        assert_eq!(snake.direction_for_step(Some(Direction::Left)), Some(Direction::Right));
        assert_eq!(snake.direction_for_step(Some(Direction::Down)), Some(Direction::Down));
        assert_eq!(Snake::empty().direction_for_step(None), None);
    }

    #[test]
    fn step_keeps_heading() {
        for proposed in [None, Some(Direction::Right), Some(Direction::Left)] {
            let mut snake = two_segments();
            snake.step(proposed, None).unwrap();
            assert_eq!(parts(&snake), vec![right(4, 0), right(3, 0)]);
        }
    }

    #[test]
    fn step_turns() {
        let mut snake = two_segments();
        snake.step(Some(Direction::Up), None).unwrap();
        assert_eq!(
            parts(&snake),
            vec![SnakePart::new(Vector::new(3, -1), Direction::Up), right(3, 0)]
        );
    }

    #[test]
    fn step_wraps_around_field() {
        let mut snake = two_segments();
        snake.step(None, Some((4, 4))).unwrap();
        assert_eq!(parts(&snake), vec![right(0, 0), right(3, 0)]);
    }

    #[test]
    fn step_grows_when_pending_positive() {
        let mut snake = Snake::new(vec![right(4, 0), right(3, 0)]);
        snake.set_pending_length_change(1);
        snake.step(None, None).unwrap();
        assert_eq!(parts(&snake), vec![right(5, 0), right(4, 0), right(3, 0)]);
        assert_eq!(snake.pending_length_change(), 0);
    }

    #[test]
    fn step_shrinks_when_pending_negative() {
        let mut snake = two_segments();
        snake.set_pending_length_change(-1);
        snake.step(None, None).unwrap();
        assert_eq!(parts(&snake), vec![right(4, 0)]);
        assert_eq!(snake.pending_length_change(), 0);
    }

    #[test]
    fn step_on_empty_snake_fails() {
        let mut snake = Snake::empty();
        assert!(matches!(snake.step(None, None), Err(Error::EmptyQueue)));
    }

    #[test]
    fn length_is_conserved_without_pending_change() {
        let mut snake = Snake::centered(Vector::new(5, 5), Direction::Up);
        for i in 0..40 {
            let turn = Direction::ALL[i % 4];
            snake.step(Some(turn), Some((10, 10))).unwrap();
            assert_eq!(snake.len(), 3);
        }
    }

    #[test]
    fn check_intersection() {
        let snake = two_segments();
        assert!(!snake.check_intersection(&HashSet::new()));
        assert!(snake.check_intersection(&HashSet::from([Vector::new(3, 0)])));
        assert!(!snake.check_intersection(&HashSet::from([Vector::new(1, 1)])));

        let folded = Snake::new(vec![right(0, 0), right(0, 0)]);
        assert!(folded.check_intersection(&HashSet::new()));
        assert!(folded.check_intersection(&HashSet::from([Vector::new(1, 1)])));
    }

    #[test]
    fn centered_snake_is_three_cells_along_direction() {
        let snake = Snake::centered(Vector::new(2, 2), Direction::Down);
        let cells: Vec<Vector> = snake.iter().map(|p| p.location).collect();
        assert_eq!(cells, vec![Vector::new(2, 3), Vector::new(2, 2), Vector::new(2, 1)]);
        assert!(snake.iter().all(|p| p.direction == Direction::Down));
        assert!(snake.contains(Vector::new(2, 1)));
        assert!(!snake.contains(Vector::new(1, 1)));
    }

    #[test]
    fn clone_is_deep() {
        let original = two_segments();
        let mut copy = original.clone();
        copy.step(Some(Direction::Down), None).unwrap();
        assert_eq!(parts(&original), vec![right(3, 0), right(2, 0)]);
        assert_ne!(parts(&original), parts(&copy));
    }
}
