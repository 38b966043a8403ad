//! In-memory FIFO queue.

use std::collections::VecDeque;

use crate::core::TaskQueue;

/// In-memory queue storing pending items in arrival order.
#[derive(Debug)]
pub struct InMemoryQueue<I> {
    items: VecDeque<I>,
}

impl<I> InMemoryQueue<I> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Create an empty queue with room for `capacity` items before reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
        }
    }
}

impl<I> Default for InMemoryQueue<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> TaskQueue<I> for InMemoryQueue<I> {
    fn push(&mut self, item: I) {
        self.items.push_back(item);
    }

    fn pop_front(&mut self) -> Option<I> {
        self.items.pop_front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
