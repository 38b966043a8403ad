//! Tests for configuration validation

use prometheus_request_queue::config::QueueConfig;

#[test]
fn test_defaults() {
    let config = QueueConfig::default();
    assert_eq!(config.max_concurrent, 3);
    assert_eq!(config.retries, 3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_max_concurrent_invalid() {
    let invalid = QueueConfig {
        max_concurrent: 0,
        retries: 3,
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_zero_retries_valid() {
    let config = QueueConfig {
        max_concurrent: 1,
        retries: 0,
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_json() {
    let json = r#"{ "max_concurrent": 8, "retries": 1 }"#;
    let config = QueueConfig::from_json_str(json).unwrap();
    assert_eq!(config.max_concurrent, 8);
    assert_eq!(config.retries, 1);
}

#[test]
fn test_from_json_fills_defaults() {
    let config = QueueConfig::from_json_str(r#"{ "retries": 5 }"#).unwrap();
    assert_eq!(config.max_concurrent, 3);
    assert_eq!(config.retries, 5);
}

#[test]
fn test_from_json_rejects_invalid() {
    assert!(QueueConfig::from_json_str(r#"{ "max_concurrent": 0 }"#).is_err());
    assert!(QueueConfig::from_json_str(r#"{ "retries": -1 }"#).is_err());
    assert!(QueueConfig::from_json_str("not json").is_err());
}
