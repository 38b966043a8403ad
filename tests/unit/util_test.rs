//! Tests for utility functions

use prometheus_request_queue::util::{init_tracing, init_tracing_with_default};

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing_with_default("debug");
    init_tracing();
    tracing::info!("subscriber installed");
}
