#![allow(dead_code)]

use serde_json::Value;

use push_worker::app::PushWorker;
use push_worker::config::{MalformedPayloadPolicy, WorkerConfig};
use push_worker::domain::event::{NotificationClickEvent, PushEvent};
use push_worker::domain::notification::Notification;
use push_worker::infra::memory::InMemoryPlatform;
use push_worker::jobs::event_loop::{self, WorkerHandle};

// ---------------------------------------------------------------------------
// TestWorker: handlers bound to a fresh in-memory platform per test
// ---------------------------------------------------------------------------

pub struct TestWorker {
    pub worker: PushWorker,
    pub platform: InMemoryPlatform,
}

pub fn worker() -> TestWorker {
    worker_with(WorkerConfig::default())
}

pub fn hardened_worker() -> TestWorker {
    worker_with(WorkerConfig {
        malformed_payload: MalformedPayloadPolicy::Fallback,
        ..WorkerConfig::default()
    })
}

pub fn slow_worker(latency_ms: u64) -> TestWorker {
    worker_with(WorkerConfig {
        platform_latency_ms: latency_ms,
        ..WorkerConfig::default()
    })
}

pub fn worker_with(config: WorkerConfig) -> TestWorker {
    let (worker, platform) = push_worker::in_memory_worker(&config);
    TestWorker { worker, platform }
}

impl TestWorker {
    pub async fn push_json(&self, payload: Value) -> Notification {
        self.worker
            .handle_push(&PushEvent::with_json(&payload))
            .await
            .expect("push handler failed")
    }

    pub async fn push_empty(&self) -> Notification {
        self.worker
            .handle_push(&PushEvent::empty())
            .await
            .expect("push handler failed")
    }

    pub async fn click(&self, notification: Notification) -> anyhow::Result<String> {
        self.worker
            .handle_notification_click(&NotificationClickEvent { notification })
            .await
    }

    pub fn spawn(&self) -> WorkerHandle {
        event_loop::spawn(self.worker.clone(), 8)
    }

    pub fn only_active(&self) -> Notification {
        let active = self.platform.active();
        assert_eq!(active.len(), 1, "expected exactly one active notification");
        active.into_iter().next().unwrap()
    }
}
