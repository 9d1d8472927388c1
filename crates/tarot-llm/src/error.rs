//! Error types for LLM interpretation.

use tarot_core::SettingsError;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while requesting or streaming an interpretation.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No usable credentials.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The client could not be set up.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request could not be sent.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API request failed: {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        /// Response body, if any.
        details: String,
    },

    /// The response body could not be read.
    #[error("unable to read response stream: {0}")]
    StreamUnreadable(String),

    /// The response ended without the completion sentinel.
    #[error("response stream ended before the analysis was complete")]
    IncompleteStream,

    /// The API answered with something other than an event stream.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Error for a non-success response; `details` is the response body.
    pub fn from_status(status: reqwest::StatusCode, details: String) -> Self {
        warn!("LLM API returned {}: {}", status, details);
        LlmError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            details,
        }
    }

    /// Whether fixing settings is the likely remedy.
    pub fn is_configuration(&self) -> bool {
        match self {
            LlmError::Settings(_) | LlmError::Configuration(_) => true,
            LlmError::Status { status, .. } => matches!(status, 401 | 403 | 404 | 503),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn test_from_status_keeps_code_reason_and_body() {
        let err = LlmError::from_status(StatusCode::UNAUTHORIZED, "bad key".into());
        assert_eq!(err.to_string(), "API request failed: 401 Unauthorized");
        assert!(matches!(
            &err,
            LlmError::Status { status: 401, details, .. } if details == "bad key"
        ));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_transport_errors_are_not_configuration() {
        assert!(!LlmError::from_status(StatusCode::BAD_GATEWAY, String::new()).is_configuration());
        assert!(!LlmError::IncompleteStream.is_configuration());
        assert!(!LlmError::InvalidResponse("text/html".into()).is_configuration());
    }
}
