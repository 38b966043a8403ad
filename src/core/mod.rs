//! Core scheduling abstractions and slot accounting.

pub mod audit;
pub mod error;
pub mod hooks;
pub mod queue;
pub mod request_queue;
pub mod retry;
pub mod task;

pub use audit::{AuditEvent, AuditSink, InMemoryAuditSink, TaskAction};
pub use error::{AppResult, SchedulerError, TaskError};
pub use hooks::TaskHooks;
pub use queue::TaskQueue;
pub use request_queue::{QueueStats, RequestQueue, Spawn};
pub use retry::{run_with_retry, RETRY_BACKOFF};
pub use task::{BoxWork, Task, TaskIndex, TaskState};
