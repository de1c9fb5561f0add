// src/error.rs
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures of the relay endpoint. Each one becomes a JSON error response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Server configuration error")]
    Configuration,

    #[error("Failed to communicate with chatbot")]
    Upstream(#[from] RelayError),
}

/// What went wrong while talking to the external webhook.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook responded with status: {0}")]
    Status(u16),

    #[error("{0}")]
    InvalidBody(#[from] serde_json::Error),
}

/// Client side failures of a send. The UI shows them all the same way.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error! status: {0}")]
    Http(u16),

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "POST")],
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            AppError::Configuration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            AppError::Upstream(ref source) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": self.to_string(),
                    "message": source.to_string(),
                })),
            )
                .into_response(),
        }
    }
}
