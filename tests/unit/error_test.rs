//! Tests for error types

use prometheus_request_queue::core::{SchedulerError, TaskError};

#[test]
fn test_invalid_config_error() {
    let err = SchedulerError::InvalidConfig("max_concurrent must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: max_concurrent must be greater than 0"
    );
}

#[test]
fn test_runtime_error() {
    let err = SchedulerError::Runtime("no reactor running".to_string());
    assert_eq!(format!("{}", err), "runtime unavailable: no reactor running");
}

#[test]
fn test_retry_exhausted_error() {
    let err = TaskError::RetryExhausted {
        index: 12,
        retries: 3,
        last_error: anyhow::anyhow!("timeout"),
    };
    assert_eq!(format!("{}", err), "task 12 failed after 3 retries");
    assert_eq!(err.index(), 12);
    assert_eq!(format!("{:#}", anyhow::Error::from(err)), "task 12 failed after 3 retries: timeout");
}
