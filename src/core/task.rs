//! The task entity and its lifecycle states.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::core::{AppResult, TaskHooks};

/// Identifier assigned to each task in enqueue order.
pub type TaskIndex = u64;

/// Boxed work factory. Called once per attempt.
pub type BoxWork<T> = Box<dyn FnMut() -> BoxFuture<'static, AppResult<T>> + Send + 'static>;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TaskState {
    /// Waiting in the queue for a free slot.
    Pending,
    /// Running an attempt; holds the number of retries still available.
    Attempting(u32),
    /// Work produced a value.
    Succeeded,
    /// Every attempt failed.
    Failed,
}

impl TaskState {
    /// Whether the task has reached an outcome.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// One unit of submitted work together with its hooks.
pub struct Task<T> {
    index: TaskIndex,
    work: BoxWork<T>,
    pub(crate) hooks: TaskHooks<T>,
    state: TaskState,
}

impl<T: Send + 'static> Task<T> {
    /// Wrap a work factory and its hooks into a pending task.
    pub fn new<F, Fut>(index: TaskIndex, mut work: F, hooks: TaskHooks<T>) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        Self {
            index,
            work: Box::new(move || work().boxed()),
            hooks,
            state: TaskState::Pending,
        }
    }
}

impl<T> Task<T> {
    /// Index assigned at enqueue time.
    #[must_use]
    pub const fn index(&self) -> TaskIndex {
        self.index
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Start one attempt of the work.
    pub(crate) fn attempt(&mut self) -> BoxFuture<'static, AppResult<T>> {
        (self.work)()
    }

    pub(crate) fn transition(&mut self, next: TaskState) {
        debug_assert!(
            !self.state.is_terminal(),
            "task {} left terminal state {:?}",
            self.index,
            self.state
        );
        tracing::trace!(task = self.index, from = ?self.state, to = ?next, "task transition");
        self.state = next;
    }
}

impl<T> fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("index", &self.index)
            .field("state", &self.state)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
