//! Error types for scheduler operations.

use thiserror::Error;

use crate::core::TaskIndex;

/// Errors produced while constructing or configuring a request queue.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// No async runtime is available to drive task execution.
    #[error("runtime unavailable: {0}")]
    Runtime(String),
}

/// Terminal failure of a queued task, delivered to its `on_error` hook.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Every attempt failed and the retry budget is spent.
    #[error("task {index} failed after {retries} retries")]
    RetryExhausted {
        /// Index of the failed task.
        index: TaskIndex,
        /// Configured number of retries after the first attempt.
        retries: u32,
        /// Error raised by the final attempt.
        #[source]
        last_error: anyhow::Error,
    },
}

impl TaskError {
    /// Index of the task this error belongs to.
    #[must_use]
    pub const fn index(&self) -> TaskIndex {
        match self {
            Self::RetryExhausted { index, .. } => *index,
        }
    }

    /// Error raised by the last attempt before the task gave up.
    #[must_use]
    pub const fn last_error(&self) -> &anyhow::Error {
        match self {
            Self::RetryExhausted { last_error, .. } => last_error,
        }
    }
}

/// Result type returned by a unit of work. Any error counts as a failed attempt.
pub type AppResult<T> = Result<T, anyhow::Error>;
