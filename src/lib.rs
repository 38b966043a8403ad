//! # Prometheus Request Queue
//!
//! A bounded-concurrency async request queue with fixed-delay retries.
//!
//! Callers submit asynchronous units of work. The queue runs at most
//! `max_concurrent` of them at a time, retries a failing unit up to `retries`
//! more times with a fixed one-second pause between attempts, and reports
//! each unit's outcome through per-task hooks.
//!
//! ## Key Properties
//!
//! - **Bounded concurrency**: at most `max_concurrent` tasks hold a slot at
//!   any instant; a task keeps its slot for its whole retry lifetime
//! - **FIFO admission**: queued tasks are admitted strictly in enqueue order
//! - **Bounded retries**: a task is attempted at most `retries + 1` times
//! - **Exactly-once outcome**: one of `on_success` / `on_error` fires once per task
//! - **Isolation**: a failing or panicking task never stalls the rest of the queue
//!
//! ## Example
//!
//! ```rust,no_run
//! use prometheus_request_queue::builders::RequestQueueBuilder;
//! use prometheus_request_queue::core::TaskHooks;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let queue = RequestQueueBuilder::new()
//!     .with_max_concurrent(3)
//!     .with_retries(3)
//!     .build::<String>()?;
//!
//! queue.enqueue_with(
//!     || async { Ok("loaded".to_string()) },
//!     TaskHooks::new()
//!         .on_success(|value| println!("done: {value}"))
//!         .on_error(|err| eprintln!("{err}")),
//! );
//!
//! queue.wait_idle().await;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions: tasks, hooks, retries, and the request queue.
pub mod core;
/// Configuration models for queue limits.
pub mod config;
/// Builders to construct request queues from configuration.
pub mod builders;
/// Infrastructure adapters for queue backends.
pub mod infra;
/// Runtime adapters.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::builders::RequestQueueBuilder;
pub use crate::config::QueueConfig;
pub use crate::core::{RequestQueue, TaskError, TaskHooks};
