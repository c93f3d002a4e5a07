pub mod app;
pub mod config;
pub mod domain;
pub mod infra;
pub mod jobs;

use std::sync::Arc;

use crate::app::PushWorker;
use crate::config::WorkerConfig;
use crate::infra::memory::InMemoryPlatform;

/// Binds a worker to the in-memory platform using `config`.
pub fn in_memory_worker(config: &WorkerConfig) -> (PushWorker, InMemoryPlatform) {
    let platform = InMemoryPlatform::from_config(config);
    let worker = PushWorker::new(
        Arc::new(platform.clone()),
        Arc::new(platform.clone()),
        config.malformed_payload,
    );
    (worker, platform)
}
