use anyhow::{Context, Result};
use tracing::info;

use crate::domain::event::NotificationClickEvent;
use crate::domain::payload::DEFAULT_URL;
use crate::infra::platform::{NotificationDisplay, WindowClients};

pub async fn on_notification_click(
    display: &dyn NotificationDisplay,
    clients: &dyn WindowClients,
    event: &NotificationClickEvent,
) -> Result<String> {
    let notification = &event.notification;
    info!(notification_id = %notification.id, "notification clicked");

    display.close_notification(notification);

    let url = notification.target_url().unwrap_or(DEFAULT_URL);
    clients
        .open_window(url)
        .await
        .with_context(|| format!("failed to open window for {}", url))?;

    Ok(url.to_string())
}
