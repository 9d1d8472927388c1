//! Error types for the proxy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors returned by proxy routes. Every variant renders as a JSON body
/// with an `error` field.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The default credentials are disabled or incomplete.
    #[error("Default LLM configuration is disabled or incomplete")]
    Unavailable,

    /// The request body is not a JSON object.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The upstream answered with a non-success status.
    #[error("LLM API request failed: {status} {reason}")]
    UpstreamStatus {
        status: u16,
        reason: String,
        details: String,
    },

    /// The upstream could not be reached or its body could not be read.
    #[error("Failed to reach LLM API: {0}")]
    Upstream(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            ProxyError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                serde_json::json!({ "error": message }),
            ),
            ProxyError::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": message }),
            ),
            ProxyError::UpstreamStatus {
                status, details, ..
            } => {
                tracing::warn!("{}", message);
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    serde_json::json!({ "error": message, "details": details }),
                )
            }
            ProxyError::Upstream(_) => {
                tracing::error!("{}", message);
                (
                    StatusCode::BAD_GATEWAY,
                    serde_json::json!({ "error": message }),
                )
            }
            ProxyError::Internal(_) => {
                tracing::error!("{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": message }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for proxy handlers.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ProxyError::Unavailable.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ProxyError::InvalidRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProxyError::Upstream("refused".into()).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ProxyError::UpstreamStatus {
                status: 429,
                reason: "Too Many Requests".into(),
                details: String::new(),
            }
            .into_response()
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_upstream_status_message() {
        let err = ProxyError::UpstreamStatus {
            status: 401,
            reason: "Unauthorized".into(),
            details: "bad key".into(),
        };
        assert_eq!(err.to_string(), "LLM API request failed: 401 Unauthorized");
    }
}
