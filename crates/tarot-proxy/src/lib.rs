//! Same-origin chat proxy for TarotWhisper.
//!
//! Holds the default LLM credentials server-side so clients without their own
//! key can still request readings:
//!
//! - `POST /api/chat` - forwards a chat completion request upstream, streaming
//!   the response back when `stream` is set
//! - `GET /api/config` - whether the defaults are usable, and their model
//! - `GET /health` - liveness

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ProxyConfig, Upstream};
pub use error::ProxyError;
pub use state::AppState;

/// Build the application with state and request tracing attached.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
