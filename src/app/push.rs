use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::MalformedPayloadPolicy;
use crate::domain::event::PushEvent;
use crate::domain::notification::Notification;
use crate::domain::payload::PushPayload;
use crate::infra::platform::NotificationDisplay;

pub async fn on_push(
    display: &dyn NotificationDisplay,
    event: &PushEvent,
    policy: MalformedPayloadPolicy,
) -> Result<Notification> {
    let payload = read_payload(event, policy)?;
    let resolved = payload.resolve();
    debug!(title = %resolved.title, url = ?resolved.options.data.url, "resolved push payload");

    let notification = display
        .show_notification(&resolved.title, resolved.options)
        .await
        .context("failed to display notification")?;

    info!(notification_id = %notification.id, "push handled");
    Ok(notification)
}

fn read_payload(event: &PushEvent, policy: MalformedPayloadPolicy) -> Result<PushPayload> {
    let data = match &event.data {
        Some(data) => data,
        None => {
            info!("push received without payload");
            return Ok(PushPayload::no_payload());
        }
    };

    info!(bytes = data.bytes().len(), "push received");
    match data.json() {
        Ok(payload) => Ok(payload),
        Err(err) => match policy {
            MalformedPayloadPolicy::Reject => Err(err.context("failed to parse push payload")),
            MalformedPayloadPolicy::Fallback => {
                warn!(error = ?err, body = %data.text(), "malformed push payload, using defaults");
                Ok(PushPayload::no_payload())
            }
        },
    }
}
