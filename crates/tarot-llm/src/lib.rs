//! Streaming tarot interpretation over OpenAI-compatible chat APIs.
//!
//! - [`LlmClient`] - sends a reading to an upstream API or the local proxy
//!   and returns the answer as an [`AnalysisStream`]
//! - [`Interpreter`] - the trait the analyzer drives, implemented by
//!   [`LlmClient`]
//! - [`ReadingAnalyzer`] - accumulates the streamed text and saves completed
//!   analyses to history
//! - [`sse`] - decoding of each event's `data` payload
//!
//! # Example
//!
//! ```rust,no_run
//! use tarot_core::{DefaultLlmConfig, LlmSettings, require_llm_config};
//! use tarot_llm::{LlmClient, ReadingAnalyzer};
//! use tarot_store::{HistoryStore, MemoryStore};
//!
//! # async fn run(reading: tarot_core::Reading) -> Result<(), Box<dyn std::error::Error>> {
//! let settings = LlmSettings::new("https://api.openai.com/v1", "sk-...", None);
//! let resolved = require_llm_config(&settings, &DefaultLlmConfig::unavailable())?;
//! let client = LlmClient::from_resolved(&resolved, None)?;
//!
//! let history = HistoryStore::new(MemoryStore::new());
//! let outcome = ReadingAnalyzer::new(&client, &history)
//!     .analyze(&reading, |text| println!("{}", text))
//!     .await;
//! println!("saved: {}", outcome.history_entry.is_some());
//! # Ok(())
//! # }
//! ```

mod analyzer;
pub mod api_types;
mod client;
mod error;
mod interpreter;
pub mod prompt;
pub mod sse;
mod stream;

pub use analyzer::{AnalysisOutcome, ReadingAnalyzer};
pub use api_types::{ChatCompletionChunk, ChatCompletionRequest, ChatMessage};
pub use client::{fetch_default_config, ChatTarget, LlmClient, DEFAULT_PROXY_URL};
pub use error::LlmError;
pub use interpreter::Interpreter;
pub use prompt::{build_messages, build_user_prompt, hash_prompt, SYSTEM_PROMPT};
pub use sse::SseEvent;
pub use stream::{AnalysisStream, EventData};

// Re-export async_trait for implementors of Interpreter.
pub use async_trait::async_trait;
