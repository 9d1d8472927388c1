//! Route handlers for the proxy.

pub mod chat;
pub mod config;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/config", get(config::config))
        .route("/api/chat", post(chat::chat))
}
