// src/state.rs
use std::sync::Arc;

use crate::config::WebhookUrlSource;

pub type SharedState = Arc<AppState>;

/// Read-only state shared by every relay call.
pub struct AppState {
    pub webhook_url: WebhookUrlSource,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(webhook_url: WebhookUrlSource) -> Self {
        Self {
            webhook_url,
            http: reqwest::Client::new(),
        }
    }
}
