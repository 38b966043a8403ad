//! Builders to construct request queues from configuration.

pub mod queue_builder;

pub use queue_builder::RequestQueueBuilder;
