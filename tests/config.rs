//! Configuration Tests

use push_worker::config::{MalformedPayloadPolicy, WorkerConfig};
use std::collections::HashMap;

fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<WorkerConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    WorkerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_apply_when_unset() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.event_queue_capacity, 64);
    assert_eq!(config.malformed_payload, MalformedPayloadPolicy::Reject);
    assert_eq!(config.platform_latency_ms, 0);
}

#[test]
fn values_are_read_from_lookup() {
    let config = config_from(&[
        ("WORKER_EVENT_QUEUE", "8"),
        ("PUSH_MALFORMED_PAYLOAD", "Fallback"),
        ("PLATFORM_LATENCY_MS", "250"),
    ])
    .unwrap();

    assert_eq!(config.event_queue_capacity, 8);
    assert_eq!(config.malformed_payload, MalformedPayloadPolicy::Fallback);
    assert_eq!(config.platform_latency_ms, 250);
}

#[test]
fn invalid_values_name_the_variable() {
    let err = config_from(&[("PLATFORM_LATENCY_MS", "soon")]).unwrap_err();
    assert!(err.to_string().contains("invalid PLATFORM_LATENCY_MS"));

    let err = config_from(&[("PUSH_MALFORMED_PAYLOAD", "ignore")]).unwrap_err();
    assert!(err.to_string().contains("invalid PUSH_MALFORMED_PAYLOAD"));

    let err = config_from(&[("WORKER_EVENT_QUEUE", "0")]).unwrap_err();
    assert!(err.to_string().contains("invalid WORKER_EVENT_QUEUE"));
}
