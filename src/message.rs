// src/message.rs
use chrono::{Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response fields tried in order when picking the text to display.
pub const DISPLAY_FIELDS: [&str; 4] = ["response", "message", "output", "text"];

/// Body posted to the relay endpoint and forwarded to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub message: String,
    pub timestamp: String,
    pub session_id: String,
}

impl RelayRequest {
    /// Stamps the request with the current UTC time, e.g. `2024-05-01T12:00:00.000Z`.
    pub fn new(message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            session_id: session_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
    System,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub text: String,
    pub kind: MessageKind,
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
}

impl ChatMessage {
    pub fn now(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            kind,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

/// Picks the display text out of a webhook response.
///
/// The first of [`DISPLAY_FIELDS`] holding a truthy value wins. Null, `false`,
/// zero and the empty string are skipped. Strings are shown as they are, any
/// other value as JSON. When nothing matches, the whole body is serialized.
pub fn extract_display_text(data: &Value) -> String {
    DISPLAY_FIELDS
        .iter()
        .filter_map(|field| data.get(field))
        .find(|value| is_truthy(value))
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| data.to_string())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
