use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::WorkerConfig;
use crate::domain::notification::{Notification, NotificationId, NotificationOptions};
use crate::infra::platform::{NotificationDisplay, WindowClients};

#[derive(Default)]
struct PlatformState {
    active: Vec<Notification>,
    close_calls: HashMap<NotificationId, usize>,
    opened_windows: Vec<String>,
    block_windows: bool,
}

/// Host platform that keeps everything in memory.
///
/// Display and window-open settle after `latency`, so callers that stop
/// awaiting early leave the operation unfinished.
#[derive(Clone, Default)]
pub struct InMemoryPlatform {
    state: Arc<Mutex<PlatformState>>,
    latency: Duration,
}

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &WorkerConfig) -> Self {
        Self::new().with_latency(Duration::from_millis(config.platform_latency_ms))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes every subsequent window-open fail, as a popup blocker would.
    pub fn block_windows(&self, blocked: bool) {
        self.lock().block_windows = blocked;
    }

    pub fn active(&self) -> Vec<Notification> {
        self.lock().active.clone()
    }

    pub fn find(&self, id: NotificationId) -> Option<Notification> {
        self.lock()
            .active
            .iter()
            .find(|notification| notification.id == id)
            .cloned()
    }

    pub fn close_count(&self, id: NotificationId) -> usize {
        self.lock().close_calls.get(&id).copied().unwrap_or(0)
    }

    pub fn opened_windows(&self) -> Vec<String> {
        self.lock().opened_windows.clone()
    }

    fn lock(&self) -> MutexGuard<'_, PlatformState> {
        // Every mutation is a single push or remove, so a poisoned lock
        // still guards consistent state.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn settle(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl NotificationDisplay for InMemoryPlatform {
    fn show_notification<'a>(
        &'a self,
        title: &'a str,
        options: NotificationOptions,
    ) -> BoxFuture<'a, Result<Notification>> {
        async move {
            self.settle().await;
            let rendered = serde_json::to_string(&options)?;
            let notification = Notification {
                id: NotificationId::new(),
                title: title.to_string(),
                options,
                shown_at: OffsetDateTime::now_utc(),
            };
            info!(
                notification_id = %notification.id,
                title = %notification.title,
                options = %rendered,
                "notification shown"
            );
            self.lock().active.push(notification.clone());
            Ok(notification)
        }
        .boxed()
    }

    fn close_notification(&self, notification: &Notification) {
        let mut state = self.lock();
        state.active.retain(|active| active.id != notification.id);
        *state.close_calls.entry(notification.id).or_insert(0) += 1;
        debug!(notification_id = %notification.id, "notification closed");
    }
}

impl WindowClients for InMemoryPlatform {
    fn open_window<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<()>> {
        async move {
            self.settle().await;
            let mut state = self.lock();
            if state.block_windows {
                return Err(anyhow!("window open blocked: {}", url));
            }
            state.opened_windows.push(url.to_string());
            info!(url = %url, "window opened");
            Ok(())
        }
        .boxed()
    }
}
