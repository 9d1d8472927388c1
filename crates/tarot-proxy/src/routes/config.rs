//! Default configuration discovery.

use axum::extract::State;
use axum::Json;
use tarot_core::DefaultLlmConfig;

use crate::state::AppState;

/// Whether the default route is usable, and its model.
pub async fn config(State(state): State<AppState>) -> Json<DefaultLlmConfig> {
    Json(state.config.public_config())
}
