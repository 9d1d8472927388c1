//! Client-side state for TarotWhisper.
//!
//! All state goes through the [`KeyValueStore`] trait so the backing storage
//! can be swapped out: [`MemoryStore`] for per-session state and tests,
//! [`JsonFileStore`] for state that must survive restarts.
//!
//! - [`ReadingSession`] - hands the question, spread and drawn cards from one
//!   step of a reading to the next
//! - [`HistoryStore`] - bounded log of completed readings
//! - [`SettingsStore`] - user-entered LLM credentials
//!
//! # Example
//!
//! ```rust
//! use tarot_store::{HistoryStore, MemoryStore, NewReading};
//!
//! let history = HistoryStore::new(MemoryStore::new());
//! let entry = history
//!     .append(NewReading {
//!         question: "Will I change jobs?".to_string(),
//!         spread_name: "Single Card".to_string(),
//!         spread_id: "single_card".to_string(),
//!         drawn_cards: Vec::new(),
//!         analysis: "Change is in the air.".to_string(),
//!     })
//!     .unwrap();
//!
//! assert_eq!(history.list().len(), 1);
//! assert_eq!(history.get(&entry.id).unwrap().question, "Will I change jobs?");
//! ```

mod error;
mod history;
pub mod keys;
mod kv;
mod session;
mod settings;

pub use error::{SessionError, SettingsStoreError, StoreError};
pub use history::{HistoryStore, NewReading, ReadingHistoryEntry, MAX_HISTORY_ITEMS};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use session::{PendingReading, ReadingSession};
pub use settings::SettingsStore;
