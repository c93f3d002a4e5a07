pub mod click;
pub mod push;

use anyhow::Result;
use std::sync::Arc;

use crate::config::MalformedPayloadPolicy;
use crate::domain::event::{NotificationClickEvent, PushEvent, WorkerEvent};
use crate::domain::notification::Notification;
use crate::infra::platform::{NotificationDisplay, WindowClients};

/// The push and notification-click handlers bound to a host platform.
///
/// Holds no state between events; each call is independent.
#[derive(Clone)]
pub struct PushWorker {
    display: Arc<dyn NotificationDisplay>,
    clients: Arc<dyn WindowClients>,
    malformed_payload: MalformedPayloadPolicy,
}

impl PushWorker {
    pub fn new(
        display: Arc<dyn NotificationDisplay>,
        clients: Arc<dyn WindowClients>,
        malformed_payload: MalformedPayloadPolicy,
    ) -> Self {
        Self {
            display,
            clients,
            malformed_payload,
        }
    }

    pub async fn handle_push(&self, event: &PushEvent) -> Result<Notification> {
        push::on_push(self.display.as_ref(), event, self.malformed_payload).await
    }

    /// Returns the URL the window was opened at.
    pub async fn handle_notification_click(&self, event: &NotificationClickEvent) -> Result<String> {
        click::on_notification_click(self.display.as_ref(), self.clients.as_ref(), event).await
    }

    pub async fn handle(&self, event: &WorkerEvent) -> Result<()> {
        match event {
            WorkerEvent::Push(push) => self.handle_push(push).await.map(|_| ()),
            WorkerEvent::NotificationClick(click) => {
                self.handle_notification_click(click).await.map(|_| ())
            }
        }
    }
}
