//! Error types for catalog loading and settings resolution.

use thiserror::Error;

/// Errors raised while loading card or spread data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The data could not be parsed.
    #[error("invalid catalog data: {0}")]
    Json(#[from] serde_json::Error),

    /// Two cards share the same identifier.
    #[error("duplicate card id: {0}")]
    DuplicateCard(String),

    /// Two spreads share the same identifier.
    #[error("duplicate spread id: {0}")]
    DuplicateSpread(String),

    /// A spread lists a different number of positions than it declares.
    #[error("spread {spread} declares {declared} cards but lists {positions} positions")]
    PositionMismatch {
        spread: String,
        declared: usize,
        positions: usize,
    },

    /// A spread needs more cards than the deck holds.
    #[error("spread {spread} needs {needed} cards but the deck holds {available}")]
    DeckTooSmall {
        spread: String,
        needed: usize,
        available: usize,
    },
}

/// Errors raised while resolving LLM credentials.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// Neither user settings nor a usable default configuration exist.
    #[error("LLM API is not configured, set a base URL and API key in settings first")]
    Unconfigured,
}
