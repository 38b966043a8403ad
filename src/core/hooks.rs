//! Per-task completion hooks.
//!
//! Every hook is optional. The success and error hooks are `FnOnce` and are
//! consumed by the task's terminal transition, so neither can fire twice.
//! The retry hook fires once per failed attempt that will be retried.
//!
//! ```rust,ignore
//! use prometheus_request_queue::core::TaskHooks;
//!
//! let hooks = TaskHooks::new()
//!     .on_success(|value: u64| tracing::info!(value, "loaded"))
//!     .on_retry(|err| tracing::warn!(error = %err, "retrying"))
//!     .on_error(|err| tracing::error!(error = %err, "gave up"));
//! ```

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::core::{TaskError, TaskIndex};

type SuccessHook<T> = Box<dyn FnOnce(T) + Send + 'static>;
type ErrorHook = Box<dyn FnOnce(TaskError) + Send + 'static>;
type RetryHook = Box<dyn FnMut(&anyhow::Error) + Send + 'static>;

/// Optional callbacks attached to a single task.
pub struct TaskHooks<T> {
    success: Option<SuccessHook<T>>,
    error: Option<ErrorHook>,
    retry: Option<RetryHook>,
}

impl<T> TaskHooks<T> {
    /// Create an empty hook set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            success: None,
            error: None,
            retry: None,
        }
    }

    /// Alias for [`TaskHooks::new`], reads better at call sites that want no hooks.
    #[must_use]
    pub const fn none() -> Self {
        Self::new()
    }

    /// Called once with the result value when the task succeeds.
    #[must_use]
    pub fn on_success<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.success = Some(Box::new(hook));
        self
    }

    /// Called once with the final error when every attempt has failed.
    #[must_use]
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(TaskError) + Send + 'static,
    {
        self.error = Some(Box::new(hook));
        self
    }

    /// Called with the attempt's error each time a failed attempt will be retried.
    #[must_use]
    pub fn on_retry<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&anyhow::Error) + Send + 'static,
    {
        self.retry = Some(Box::new(hook));
        self
    }

    /// Whether an error hook is attached.
    #[must_use]
    pub const fn has_error_hook(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn fire_retry(&mut self, index: TaskIndex, error: &anyhow::Error) {
        if let Some(hook) = self.retry.as_mut() {
            guarded(index, "on_retry", || hook(error));
        }
    }

    pub(crate) fn fire_success(&mut self, index: TaskIndex, value: T) {
        if let Some(hook) = self.success.take() {
            guarded(index, "on_success", || hook(value));
        }
    }

    /// Delivers the error to the hook, or hands it back when no hook is attached.
    pub(crate) fn fire_error(&mut self, index: TaskIndex, error: TaskError) -> Option<TaskError> {
        match self.error.take() {
            Some(hook) => {
                guarded(index, "on_error", || hook(error));
                None
            }
            None => Some(error),
        }
    }
}

impl<T> Default for TaskHooks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TaskHooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHooks")
            .field("on_success", &self.success.is_some())
            .field("on_error", &self.error.is_some())
            .field("on_retry", &self.retry.is_some())
            .finish()
    }
}

/// Run a caller hook, containing any panic so the scheduler keeps going.
fn guarded<F: FnOnce()>(index: TaskIndex, hook: &'static str, f: F) {
    if let Err(panic) = catch_unwind(AssertUnwindSafe(f)) {
        tracing::error!(
            task = index,
            hook,
            panic = %panic_message(panic.as_ref()),
            "task hook panicked"
        );
    }
}

/// Best-effort extraction of a panic payload's message.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".into())
}
