// src/services/relay.rs
use axum::body::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

use crate::error::RelayError;

/// Posts `body` untouched to the webhook and parses its JSON reply.
pub async fn forward_to_webhook(
    client: &reqwest::Client,
    webhook_url: &str,
    body: Bytes,
) -> Result<Value, RelayError> {
    let response = client
        .post(webhook_url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RelayError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    let data = serde_json::from_slice(&bytes)?;
    debug!(status = status.as_u16(), len = bytes.len(), "webhook replied");
    Ok(data)
}
