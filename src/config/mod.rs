//! Configuration models for the request queue.

pub mod queue;

pub use queue::{QueueConfig, ENV_MAX_CONCURRENT, ENV_RETRIES};
