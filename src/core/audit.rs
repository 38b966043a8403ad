//! Audit sink implementations.
//!
//! The request queue reports every lifecycle step of every task to an optional
//! [`AuditSink`]. [`InMemoryAuditSink`] keeps a bounded trail for tests and dev.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::core::TaskIndex;

/// Lifecycle step recorded for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    /// Appended to the queue.
    Enqueued,
    /// Claimed a concurrency slot.
    Admitted,
    /// An attempt of the work began.
    AttemptStarted {
        /// Retries still available after this attempt.
        attempts_remaining: u32,
    },
    /// An attempt failed and another will follow after the backoff delay.
    RetryScheduled {
        /// Retries still available before the next attempt runs.
        attempts_remaining: u32,
    },
    /// Work produced a value.
    Succeeded,
    /// Every attempt failed.
    Failed,
}

/// Audit event structure.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// Task the event belongs to.
    pub index: TaskIndex,
    /// Action taken.
    pub action: TaskAction,
    /// When the action happened.
    pub at: Instant,
}

impl AuditEvent {
    /// Build an event stamped with the current time.
    #[must_use]
    pub fn now(index: TaskIndex, action: TaskAction) -> Self {
        Self {
            index,
            action,
            at: Instant::now(),
        }
    }
}

/// Audit sink abstraction.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: AuditEvent);
}

/// In-memory audit sink for testing and dev.
///
/// Clones share the same buffer, so a caller can keep one handle and pass
/// another to the queue.
#[derive(Clone)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<VecDeque<AuditEvent>>>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(max_events.min(1024)))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Snapshot of the events recorded for one task, oldest first.
    #[must_use]
    pub fn events_for(&self, index: TaskIndex) -> Vec<AuditEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.index == index)
            .cloned()
            .collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, event: AuditEvent) {
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}
