//! Segment queue - double-ended sequence backing the snake body
//!
//! Elements enter at the tail and leave from the head, so the head is always
//! the oldest element. Backed by a ring buffer: both ends are amortized O(1).

use std::collections::vec_deque;
use std::collections::VecDeque;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentQueue<T> {
    items: VecDeque<T>,
}

impl<T> SegmentQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Append behind the newest element
    pub fn enqueue_tail(&mut self, value: T) {
        self.items.push_back(value);
    }

    /// Remove and return the oldest element
    pub fn dequeue_head(&mut self) -> Result<T> {
        self.items.pop_front().ok_or(Error::EmptyQueue)
    }

    /// Oldest element
    pub fn peek_head(&self) -> Option<&T> {
        self.items.front()
    }

    /// Newest element
    pub fn peek_tail(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate from the oldest to the newest element
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for SegmentQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for SegmentQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a SegmentQueue<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
