//! Queue abstraction for pending tasks.

/// FIFO storage for tasks that have not been dispatched yet.
///
/// Implementations are driven from behind the request queue's state lock, so
/// they need no synchronization of their own. Removal is only ever from the
/// head; the first item pushed is the first item popped.
pub trait TaskQueue<I> {
    /// Append an item at the tail.
    fn push(&mut self, item: I);
    /// Remove and return the head, or `None` when empty.
    fn pop_front(&mut self) -> Option<I>;
    /// Current depth.
    fn len(&self) -> usize;
    /// Whether the queue holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
