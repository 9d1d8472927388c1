//! Storage keys.
//!
//! These match the keys the browser application used, so a storage dump from
//! either side reads the same.

/// Session: the question for the reading in progress.
pub const QUESTION: &str = "tarot_question";
/// Session: id of the chosen spread.
pub const SPREAD: &str = "tarot_spread";
/// Session: JSON array of drawn cards.
pub const DRAWN_CARDS: &str = "tarot_drawn_cards";

/// Durable: API base URL.
pub const API_BASE_URL: &str = "tarot_api_base_url";
/// Durable: API key.
pub const API_KEY: &str = "tarot_api_key";
/// Durable: model name.
pub const API_MODEL: &str = "tarot_api_model";
/// Durable: JSON array of past readings.
pub const READING_HISTORY: &str = "tarot_reading_history";
