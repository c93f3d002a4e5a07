use anyhow::{anyhow, Result};
use serde_json::{Map, Number, Value};

use crate::domain::notification::{NotificationData, NotificationOptions};

pub const DEFAULT_TITLE: &str = "Default Title";
pub const DEFAULT_BODY: &str = "Default body";
pub const DEFAULT_ICON: &str = "/icon.png";
pub const DEFAULT_BADGE: &str = "/badge.png";
pub const DEFAULT_URL: &str = "/";

// Substituted when the push message carries no body at all. Note the
// capitalised "Body", which differs from the per-field fallback.
const NO_PAYLOAD_TITLE: &str = "Default Title";
const NO_PAYLOAD_BODY: &str = "Default Body";

/// Structured push message body. Every field is optional and unknown keys
/// are ignored, since senders merge arbitrary data keys into the top level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub icon: Option<String>,
    pub badge: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNotification {
    pub title: String,
    pub options: NotificationOptions,
}

impl PushPayload {
    pub fn no_payload() -> Self {
        Self {
            title: Some(NO_PAYLOAD_TITLE.to_string()),
            body: Some(NO_PAYLOAD_BODY.to_string()),
            ..Self::default()
        }
    }

    /// Parses a JSON push body.
    ///
    /// The body is decoded lossily before parsing, so invalid UTF-8 becomes
    /// U+FFFD instead of failing. Falsy field values (`null`, `false`, `0`,
    /// `""`) are absent; any other value is kept in its string form. With
    /// duplicate keys the last one wins. Non-object values other than `null`
    /// carry no fields. A top-level `null` is malformed.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(bytes);
        let value: Value = serde_json::from_str(&text)?;
        match value {
            Value::Null => Err(anyhow!("push payload is null")),
            Value::Object(fields) => Ok(Self {
                title: field(&fields, "title"),
                body: field(&fields, "body"),
                icon: field(&fields, "icon"),
                badge: field(&fields, "badge"),
                url: field(&fields, "url"),
            }),
            _ => Ok(Self::default()),
        }
    }

    /// Substitutes defaults for every absent field.
    pub fn resolve(&self) -> ResolvedNotification {
        ResolvedNotification {
            title: or_default(&self.title, DEFAULT_TITLE),
            options: NotificationOptions {
                body: or_default(&self.body, DEFAULT_BODY),
                icon: or_default(&self.icon, DEFAULT_ICON),
                badge: or_default(&self.badge, DEFAULT_BADGE),
                data: NotificationData {
                    url: Some(or_default(&self.url, DEFAULT_URL)),
                },
            },
        }
    }
}

fn field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::String(text) if text.is_empty() => None,
        value => Some(display_string(value)),
    }
}

// String conversion as the sending ecosystem performs it: arrays join their
// elements with commas, objects all render the same.
fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_string(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_string(number: &Number) -> String {
    if number.is_f64() {
        // f64 Display drops a zero fraction: 2.0 renders as "2".
        number.as_f64().map(|float| float.to_string()).unwrap_or_default()
    } else {
        number.to_string()
    }
}

fn or_default(field: &Option<String>, default: &str) -> String {
    field.clone().unwrap_or_else(|| default.to_string())
}
