//! Liveness and forwarding readiness.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    /// `ok` when chat requests can be forwarded, `unconfigured` otherwise.
    pub status: &'static str,
    /// Model filled into requests that leave it blank.
    pub model: String,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let status = if state.config.is_available() {
        "ok"
    } else {
        "unconfigured"
    };
    Json(Health {
        status,
        model: state.config.default_model().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;

    fn state(vars: &[(&str, &str)]) -> State<AppState> {
        let config = ProxyConfig::from_lookup(|name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        })
        .unwrap();
        State(AppState::new(config))
    }

    #[tokio::test]
    async fn test_reports_unconfigured_defaults() {
        let Json(health) = health(state(&[])).await;
        assert_eq!(health.status, "unconfigured");
        assert_eq!(health.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_reports_ready_defaults() {
        let Json(health) = health(state(&[
            ("DEFAULT_LLM_ENABLED", "true"),
            ("DEFAULT_LLM_BASE_URL", "https://api.example.com/v1"),
            ("DEFAULT_LLM_API_KEY", "sk-server"),
            ("DEFAULT_LLM_MODEL", "server-model"),
        ]))
        .await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.model, "server-model");
    }
}
