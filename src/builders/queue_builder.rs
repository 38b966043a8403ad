//! Builder for request queues.

use std::sync::Arc;

use crate::config::QueueConfig;
use crate::core::{AuditSink, RequestQueue, SchedulerError, Spawn, Task, TaskQueue};
use crate::infra::queue::InMemoryQueue;
use crate::runtime::TokioSpawner;

/// Assembles a [`RequestQueue`] from configuration and optional components.
#[derive(Default)]
pub struct RequestQueueBuilder {
    config: QueueConfig,
    audit: Option<Arc<dyn AuditSink>>,
}

impl RequestQueueBuilder {
    /// Start from default limits (3 concurrent, 3 retries).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn from_config(config: QueueConfig) -> Self {
        Self {
            config,
            audit: None,
        }
    }

    /// Set the slot limit.
    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.config.max_concurrent = max_concurrent;
        self
    }

    /// Set the number of retries after the first attempt.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: impl AuditSink + 'static) -> Self {
        self.audit = Some(Arc::new(audit));
        self
    }

    /// Configuration collected so far.
    #[must_use]
    pub const fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Build an in-memory queue that runs tasks on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid or no tokio runtime is active.
    pub fn build<T: Send + 'static>(self) -> Result<RequestQueue<T>, SchedulerError> {
        let spawner = TokioSpawner::current()?;
        self.build_with(InMemoryQueue::new(), spawner)
    }

    /// Build with a caller-supplied queue backend and spawner.
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid.
    pub fn build_with<T, Q, S>(
        self,
        queue: Q,
        spawner: S,
    ) -> Result<RequestQueue<T, Q, S>, SchedulerError>
    where
        T: Send + 'static,
        Q: TaskQueue<Task<T>> + Send + 'static,
        S: Spawn + Send + Sync + 'static,
    {
        tracing::debug!(config = ?self.config, audit = self.audit.is_some(), "building request queue");
        RequestQueue::from_parts(self.config, queue, spawner, self.audit)
    }
}
