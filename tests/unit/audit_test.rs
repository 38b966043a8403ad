//! Tests for audit sink

use prometheus_request_queue::core::{AuditEvent, AuditSink, InMemoryAuditSink, TaskAction};

#[test]
fn test_in_memory_audit_sink() {
    let sink = InMemoryAuditSink::new(10);

    sink.record(AuditEvent::now(1, TaskAction::Enqueued));
    sink.record(AuditEvent::now(1, TaskAction::AttemptStarted { attempts_remaining: 2 }));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].index, 1);
    assert_eq!(
        events[1].action,
        TaskAction::AttemptStarted { attempts_remaining: 2 }
    );
    assert!(events[1].at >= events[0].at);
}

#[test]
fn test_audit_sink_overflow() {
    let sink = InMemoryAuditSink::new(2);

    sink.record(AuditEvent::now(1, TaskAction::Enqueued));
    sink.record(AuditEvent::now(2, TaskAction::Enqueued));
    sink.record(AuditEvent::now(3, TaskAction::Enqueued));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].index, 2); // First one popped
    assert_eq!(events[1].index, 3);
}
