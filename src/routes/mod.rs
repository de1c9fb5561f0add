// src/routes/mod.rs
pub mod webhook;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{any, get},
};
use tower_http::trace::TraceLayer;
use webhook::relay_handler;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/api/webhook", any(relay_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}
