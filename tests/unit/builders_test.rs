//! Tests for builder modules

use prometheus_request_queue::builders::RequestQueueBuilder;
use prometheus_request_queue::config::QueueConfig;
use prometheus_request_queue::core::{InMemoryAuditSink, RequestQueue, SchedulerError, TaskAction};

#[test]
fn test_builder_defaults() {
    let builder = RequestQueueBuilder::new();
    assert_eq!(builder.config(), &QueueConfig::default());
}

#[test]
fn test_builder_overrides() {
    let builder = RequestQueueBuilder::from_config(QueueConfig::default())
        .with_max_concurrent(7)
        .with_retries(0);
    assert_eq!(builder.config().max_concurrent, 7);
    assert_eq!(builder.config().retries, 0);
}

#[test]
fn test_build_outside_runtime_fails() {
    let result = RequestQueueBuilder::new().build::<()>();
    assert!(matches!(result, Err(SchedulerError::Runtime(_))));
}

#[tokio::test]
async fn test_build_rejects_zero_concurrency() {
    let result = RequestQueueBuilder::new().with_max_concurrent(0).build::<()>();
    assert!(matches!(result, Err(SchedulerError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_build_wires_audit_sink() {
    let sink = InMemoryAuditSink::new(16);
    let queue: RequestQueue<u8> = RequestQueueBuilder::new()
        .with_max_concurrent(2)
        .with_retries(1)
        .with_audit(sink.clone())
        .build()
        .unwrap();
    assert_eq!(queue.max_concurrent(), 2);
    assert_eq!(queue.retries(), 1);

    queue.enqueue(|| async { Ok(1) });
    queue.wait_idle().await;

    let actions: Vec<_> = sink.events().into_iter().map(|e| e.action).collect();
    assert_eq!(actions.first(), Some(&TaskAction::Enqueued));
    assert_eq!(actions.last(), Some(&TaskAction::Succeeded));
}

#[tokio::test]
async fn test_request_queue_new_uses_current_runtime() {
    let queue = RequestQueue::<u8>::new(QueueConfig::default()).unwrap();
    assert_eq!(queue.stats().max_concurrent, 3);
}
