// src/routes/webhook.rs
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderValue, Method, header},
    response::{IntoResponse, Response},
};
use tracing::{Instrument, error, info_span};
use uuid::Uuid;

use crate::{error::AppError, services::relay::forward_to_webhook, state::SharedState};

/// `/api/webhook`: relays a POSTed JSON body to the configured webhook.
pub async fn relay_handler(
    State(state): State<SharedState>,
    method: Method,
    body: Bytes,
) -> Result<Response, AppError> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let Some(webhook_url) = state.webhook_url.resolve() else {
        error!(source = %state.webhook_url, "webhook URL is not configured");
        return Err(AppError::Configuration);
    };

    let span = info_span!("relay", request_id = %Uuid::new_v4());
    let data = forward_to_webhook(&state.http, &webhook_url, body)
        .instrument(span.clone())
        .await
        .map_err(|err| {
            span.in_scope(|| error!(error = %err, "error forwarding to webhook"));
            AppError::from(err)
        })?;

    let mut response = Json(data).into_response();
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    Ok(response)
}
