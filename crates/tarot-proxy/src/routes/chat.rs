//! Chat completion forwarding.
//!
//! The request body is passed to the upstream unchanged apart from the model,
//! which is filled in when absent. The server key is attached here and never
//! leaves the proxy.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ProxyError, Result};
use crate::state::AppState;

/// `POST /api/chat`
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    // Availability comes first, whatever the body holds.
    let upstream = state.config.upstream().ok_or(ProxyError::Unavailable)?;

    let mut body: Value = serde_json::from_slice(&body)
        .map_err(|e| ProxyError::InvalidRequest(format!("body is not valid JSON: {}", e)))?;

    let request = body
        .as_object_mut()
        .ok_or_else(|| ProxyError::InvalidRequest("body must be a JSON object".into()))?;

    let model_missing = request
        .get("model")
        .and_then(Value::as_str)
        .map_or(true, |model| model.trim().is_empty());
    if model_missing {
        request.insert("model".into(), Value::from(state.config.default_model()));
    }
    let stream = request
        .get("stream")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    info!(model = ?request.get("model"), stream, "Forwarding chat request");

    let url = upstream.chat_url();
    debug!("Sending chat request to {}", url);

    let response = state
        .http
        .post(&url)
        .bearer_auth(upstream.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let details = response.text().await.unwrap_or_default();
        return Err(ProxyError::UpstreamStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            details,
        });
    }

    let builder = Response::builder().status(StatusCode::OK);
    let response = if stream {
        builder
            .header(header::CONTENT_TYPE, "text/event-stream")
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::CONNECTION, "keep-alive")
            .body(Body::from_stream(response.bytes_stream()))
    } else {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProxyError::Upstream(e.to_string()))?;
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
    };

    response.map_err(|e| ProxyError::Internal(e.to_string()))
}
