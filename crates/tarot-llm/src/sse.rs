//! Decoding of chat completion stream events.
//!
//! Each server-sent event carries either a JSON chunk whose
//! `choices[0].delta.content` is appended to the analysis, or the `[DONE]`
//! sentinel. Payloads that fail to parse are skipped.

use tracing::debug;

use crate::api_types::ChatCompletionChunk;

/// Terminal payload of an OpenAI-compatible stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// A decoded stream event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A piece of assistant text.
    Delta(String),
    /// The sentinel; nothing after it is decoded.
    Done,
}

/// Decode the `data` of one event.
///
/// Returns `None` for empty deltas and malformed payloads.
pub fn decode_data(data: &str) -> Option<SseEvent> {
    let data = data.trim();
    if data == DONE_SENTINEL {
        return Some(SseEvent::Done);
    }

    match serde_json::from_str::<ChatCompletionChunk>(data) {
        Ok(chunk) => chunk
            .content()
            .filter(|content| !content.is_empty())
            .map(|content| SseEvent::Delta(content.to_string())),
        Err(e) => {
            debug!("Skipping malformed stream chunk: {}", e);
            None
        }
    }
}

/// Whether an event's `data` is the sentinel.
pub fn is_done(data: &str) -> bool {
    data.trim() == DONE_SENTINEL
}
