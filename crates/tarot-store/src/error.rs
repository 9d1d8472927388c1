//! Error types for storage operations.

use thiserror::Error;

/// Errors from a key/value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded.
    #[error("storage JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reading reading-flow state back from the session store.
///
/// Any of these means the flow cannot continue and should restart from the
/// question step.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A required key is absent.
    #[error("session is missing {0}")]
    Missing(&'static str),

    /// The stored spread id is not in the catalog.
    #[error("unknown spread: {0}")]
    UnknownSpread(String),

    /// The stored drawn cards could not be parsed.
    #[error("session data is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors saving user settings.
#[derive(Debug, Error)]
pub enum SettingsStoreError {
    /// Base URL or API key was blank.
    #[error("both the API base URL and the API key are required")]
    Incomplete,

    /// The backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
