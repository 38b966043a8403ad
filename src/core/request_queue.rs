//! Bounded-concurrency request queue.
//!
//! Tasks are appended to a FIFO queue and admitted while fewer than
//! `max_concurrent` of them hold a slot. An admitted task keeps its slot
//! through all of its retries. When it reaches an outcome the slot is
//! released, exactly one of its terminal hooks fires, and the next queued
//! task is admitted.
//!
//! The queue and the running counter sit behind a single `parking_lot::Mutex`,
//! so the admission check (`running < max`, pop, `running += 1`) is atomic even
//! when enqueues and completions race on different runtime threads.
//!
//! A task whose work never settles holds its slot forever. Callers that need
//! deadlines build them into the work itself.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::config::QueueConfig;
use crate::core::retry::run_with_retry;
use crate::core::{
    AppResult, AuditEvent, AuditSink, SchedulerError, Task, TaskAction, TaskError, TaskHooks,
    TaskIndex, TaskQueue,
};
use crate::infra::queue::InMemoryQueue;
use crate::runtime::TokioSpawner;

/// Abstraction for spawning task execution on a runtime.
pub trait Spawn {
    /// Spawn a future that runs to completion in the background.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Point-in-time view of a queue's load and history.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QueueStats {
    /// Configured slot limit.
    pub max_concurrent: usize,
    /// Configured retries after the first attempt.
    pub retries: u32,
    /// Tasks currently holding a slot.
    pub running: usize,
    /// Tasks waiting for a slot.
    pub queued: usize,
    /// Tasks accepted since construction.
    pub submitted: u64,
    /// Tasks that produced a value.
    pub succeeded: u64,
    /// Tasks that exhausted their retries.
    pub failed: u64,
}

/// Mutable scheduling state; only ever touched under the lock.
struct SlotState<Q> {
    queue: Q,
    running: usize,
    next_index: TaskIndex,
}

struct Shared<T, Q, S> {
    max_concurrent: usize,
    retries: u32,
    state: Mutex<SlotState<Q>>,
    spawner: S,
    audit: Option<Arc<dyn AuditSink>>,
    idle: Notify,
    submitted: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    _result: std::marker::PhantomData<fn() -> T>,
}

/// Async request queue with bounded concurrency and fixed-delay retries.
///
/// Cloning is cheap; clones share the same queue and slots.
pub struct RequestQueue<T, Q = InMemoryQueue<Task<T>>, S = TokioSpawner> {
    shared: Arc<Shared<T, Q, S>>,
}

impl<T, Q, S> Clone for RequestQueue<T, Q, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + 'static> RequestQueue<T> {
    /// Create a queue backed by an in-memory FIFO, running tasks on the
    /// current tokio runtime.
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid or no tokio runtime is active.
    pub fn new(config: QueueConfig) -> Result<Self, SchedulerError> {
        Self::from_parts(config, InMemoryQueue::new(), TokioSpawner::current()?, None)
    }
}

impl<T, Q, S> RequestQueue<T, Q, S>
where
    T: Send + 'static,
    Q: TaskQueue<Task<T>> + Send + 'static,
    S: Spawn + Send + Sync + 'static,
{
    /// Create a queue from explicit components.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidConfig`] when `config` fails validation.
    pub fn from_parts(
        config: QueueConfig,
        queue: Q,
        spawner: S,
        audit: Option<Arc<dyn AuditSink>>,
    ) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;
        tracing::debug!(
            max_concurrent = config.max_concurrent,
            retries = config.retries,
            "request queue created"
        );
        Ok(Self {
            shared: Arc::new(Shared {
                max_concurrent: config.max_concurrent,
                retries: config.retries,
                state: Mutex::new(SlotState {
                    queue,
                    running: 0,
                    next_index: 0,
                }),
                spawner,
                audit,
                idle: Notify::new(),
                submitted: AtomicU64::new(0),
                succeeded: AtomicU64::new(0),
                failed: AtomicU64::new(0),
                _result: std::marker::PhantomData,
            }),
        })
    }

    /// Submit work with no hooks. A failure is not reported anywhere.
    pub fn enqueue<F, Fut>(&self, work: F) -> TaskIndex
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        self.enqueue_with(work, TaskHooks::none())
    }

    /// Submit work with hooks.
    ///
    /// Returns once the task is queued and one admission attempt has run. The
    /// task's own outcome is only observable through its hooks.
    pub fn enqueue_with<F, Fut>(&self, work: F, hooks: TaskHooks<T>) -> TaskIndex
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let index = {
            let mut state = self.shared.state.lock();
            let index = state.next_index;
            state.next_index += 1;
            state.queue.push(Task::new(index, work, hooks));
            index
        };
        self.shared.submitted.fetch_add(1, Ordering::Relaxed);
        self.shared.record(index, TaskAction::Enqueued);
        tracing::debug!(task = index, "task enqueued");

        self.shared.admit_next();
        index
    }

    /// Wait until no task is running and none is queued.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.shared.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.shared.is_idle() {
                return;
            }
            notified.await;
        }
    }

    /// Snapshot of current load and counters.
    #[must_use]
    pub fn stats(&self) -> QueueStats {
        let (running, queued) = {
            let state = self.shared.state.lock();
            (state.running, state.queue.len())
        };
        QueueStats {
            max_concurrent: self.shared.max_concurrent,
            retries: self.shared.retries,
            running,
            queued,
            submitted: self.shared.submitted.load(Ordering::Relaxed),
            succeeded: self.shared.succeeded.load(Ordering::Relaxed),
            failed: self.shared.failed.load(Ordering::Relaxed),
        }
    }

    /// Configured slot limit.
    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.shared.max_concurrent
    }

    /// Configured retries after the first attempt.
    #[must_use]
    pub fn retries(&self) -> u32 {
        self.shared.retries
    }
}

impl<T, Q, S> Shared<T, Q, S>
where
    T: Send + 'static,
    Q: TaskQueue<Task<T>> + Send + 'static,
    S: Spawn + Send + Sync + 'static,
{
    /// Admit the head of the queue if a slot is free.
    fn admit_next(self: &Arc<Self>) {
        let (task, running) = {
            let mut state = self.state.lock();
            if state.running >= self.max_concurrent {
                return;
            }
            let Some(task) = state.queue.pop_front() else {
                return;
            };
            state.running += 1;
            (task, state.running)
        };

        self.record(task.index(), TaskAction::Admitted);
        tracing::info!(task = task.index(), running, "task admitted");
        self.spawner.spawn(Arc::clone(self).run(task));
    }

    /// Drive one admitted task to its outcome, then hand off the slot.
    fn run(self: Arc<Self>, mut task: Task<T>) -> BoxFuture<'static, ()> {
        async move {
            let outcome = run_with_retry(&mut task, self.retries, self.audit.as_deref()).await;
            self.complete(task, outcome);
        }
        .boxed()
    }

    /// Release the slot, fire the terminal hook, then admit the next task.
    fn complete(self: &Arc<Self>, mut task: Task<T>, outcome: Result<T, TaskError>) {
        let index = task.index();
        {
            let mut state = self.state.lock();
            state.running -= 1;
        }

        match outcome {
            Ok(value) => {
                self.succeeded.fetch_add(1, Ordering::Relaxed);
                self.record(index, TaskAction::Succeeded);
                tracing::info!(task = index, "task succeeded");
                task.hooks.fire_success(index, value);
            }
            Err(error) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                self.record(index, TaskAction::Failed);
                tracing::info!(task = index, error = %error, "task failed");
                if let Some(unhandled) = task.hooks.fire_error(index, error) {
                    tracing::warn!(
                        task = index,
                        error = %unhandled,
                        "task failed with no error hook"
                    );
                }
            }
        }
        drop(task);

        self.admit_next();
        if self.is_idle() {
            self.idle.notify_waiters();
        }
    }

    fn is_idle(&self) -> bool {
        let state = self.state.lock();
        state.running == 0 && state.queue.is_empty()
    }

    fn record(&self, index: TaskIndex, action: TaskAction) {
        if let Some(sink) = &self.audit {
            sink.record(AuditEvent::now(index, action));
        }
    }
}
