use anyhow::Result;
use futures::future::BoxFuture;

use crate::domain::notification::{Notification, NotificationOptions};

/// Notification display surface of the host (`registration.showNotification`).
pub trait NotificationDisplay: Send + Sync {
    /// Resolves once the notification is visible.
    fn show_notification<'a>(
        &'a self,
        title: &'a str,
        options: NotificationOptions,
    ) -> BoxFuture<'a, Result<Notification>>;

    fn close_notification(&self, notification: &Notification);
}

/// Window management surface of the host (`clients.openWindow`).
pub trait WindowClients: Send + Sync {
    fn open_window<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<()>>;
}
