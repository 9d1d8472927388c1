//! Application state shared across handlers.

use std::sync::Arc;

use reqwest::Client;

use crate::config::ProxyConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    /// Client for upstream requests.
    pub http: Client,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            config: Arc::new(config),
            http: Client::new(),
        }
    }
}
