use anyhow::Result;
use bytes::Bytes;
use std::borrow::Cow;

use crate::domain::notification::Notification;
use crate::domain::payload::PushPayload;

/// Raw body of a push message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessageData {
    bytes: Bytes,
}

impl PushMessageData {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn json(&self) -> Result<PushPayload> {
        PushPayload::from_json(&self.bytes)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PushEvent {
    pub data: Option<PushMessageData>,
}

impl PushEvent {
    pub fn empty() -> Self {
        Self { data: None }
    }

    pub fn with_data(bytes: impl Into<Bytes>) -> Self {
        Self {
            data: Some(PushMessageData::new(bytes)),
        }
    }

    pub fn with_json(value: &serde_json::Value) -> Self {
        Self::with_data(value.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct NotificationClickEvent {
    pub notification: Notification,
}

#[derive(Debug, Clone)]
pub enum WorkerEvent {
    Push(PushEvent),
    NotificationClick(NotificationClickEvent),
}

impl WorkerEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            WorkerEvent::Push(_) => "push",
            WorkerEvent::NotificationClick(_) => "notificationclick",
        }
    }
}

impl From<PushEvent> for WorkerEvent {
    fn from(event: PushEvent) -> Self {
        WorkerEvent::Push(event)
    }
}

impl From<NotificationClickEvent> for WorkerEvent {
    fn from(event: NotificationClickEvent) -> Self {
        WorkerEvent::NotificationClick(event)
    }
}
