//! Fixed-delay retry executor.
//!
//! A task gets one first attempt plus `retries` more. Between a failed attempt
//! and the next one the executor waits [`RETRY_BACKOFF`]. The slot the task
//! occupies is claimed by the admission path before the first attempt and is
//! held across every retry.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;

use crate::core::hooks::panic_message;
use crate::core::{AuditEvent, AuditSink, Task, TaskAction, TaskError, TaskIndex, TaskState};

/// Delay between a failed attempt and the next one.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(1000);

/// Run a task's work until it succeeds or its retry budget is spent.
///
/// Fires the task's `on_retry` hook for each failed attempt that will be
/// retried. The success and error hooks are left to the caller.
///
/// # Errors
///
/// Returns [`TaskError::RetryExhausted`] wrapping the last attempt's error once
/// `retries + 1` attempts have failed.
pub async fn run_with_retry<T>(
    task: &mut Task<T>,
    retries: u32,
    audit: Option<&dyn AuditSink>,
) -> Result<T, TaskError> {
    let index = task.index();
    let mut attempts_remaining = retries;

    loop {
        task.transition(TaskState::Attempting(attempts_remaining));
        record(audit, index, TaskAction::AttemptStarted { attempts_remaining });
        tracing::debug!(task = index, attempts_remaining, "task attempt started");

        let outcome = AssertUnwindSafe(async { task.attempt().await })
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(anyhow::anyhow!(
                    "task {index} panicked: {}",
                    panic_message(panic.as_ref())
                ))
            });

        let error = match outcome {
            Ok(value) => {
                task.transition(TaskState::Succeeded);
                return Ok(value);
            }
            Err(error) => error,
        };

        if attempts_remaining == 0 {
            tracing::warn!(task = index, retries, error = %error, "task retries exhausted");
            task.transition(TaskState::Failed);
            return Err(TaskError::RetryExhausted {
                index,
                retries,
                last_error: error,
            });
        }

        tracing::warn!(
            task = index,
            attempts_remaining,
            error = %error,
            "task attempt failed, retrying after {:?}",
            RETRY_BACKOFF
        );
        task.hooks.fire_retry(index, &error);
        record(audit, index, TaskAction::RetryScheduled { attempts_remaining });

        tokio::time::sleep(RETRY_BACKOFF).await;
        attempts_remaining -= 1;
    }
}

fn record(audit: Option<&dyn AuditSink>, index: TaskIndex, action: TaskAction) {
    if let Some(sink) = audit {
        sink.record(AuditEvent::now(index, action));
    }
}
