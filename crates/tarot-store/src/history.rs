//! Reading history.
//!
//! Completed readings are kept as one JSON array under
//! [`keys::READING_HISTORY`], newest first, capped at
//! [`MAX_HISTORY_ITEMS`] entries.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tarot_core::DrawnCard;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::keys;
use crate::kv::KeyValueStore;

/// Maximum number of readings kept. Older readings are dropped first.
pub const MAX_HISTORY_ITEMS: usize = 50;

/// A saved reading. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingHistoryEntry {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub question: String,
    pub spread_name: String,
    pub spread_id: String,
    pub drawn_cards: Vec<DrawnCard>,
    pub analysis: String,
}

/// Fields supplied by the caller when saving a reading.
#[derive(Debug, Clone)]
pub struct NewReading {
    pub question: String,
    pub spread_name: String,
    pub spread_id: String,
    pub drawn_cards: Vec<DrawnCard>,
    pub analysis: String,
}

/// Bounded history of completed readings.
#[derive(Debug)]
pub struct HistoryStore<S> {
    store: S,
    max_items: usize,
    /// Held for the whole of each read-modify-write.
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_limit(store, MAX_HISTORY_ITEMS)
    }

    pub fn with_limit(store: S, max_items: usize) -> Self {
        Self {
            store,
            max_items,
            write_lock: Mutex::new(()),
        }
    }

    /// All readings, newest first.
    ///
    /// Unreadable history is logged and treated as empty.
    pub fn list(&self) -> Vec<ReadingHistoryEntry> {
        match self.load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to load reading history: {}", e);
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<ReadingHistoryEntry> {
        self.list().into_iter().find(|entry| entry.id == id)
    }

    /// Save a reading as the newest entry, dropping the oldest beyond the cap.
    pub fn append(&self, reading: NewReading) -> Result<ReadingHistoryEntry, StoreError> {
        let _guard = self.guard();

        let timestamp = now_millis();
        let entry = ReadingHistoryEntry {
            id: new_reading_id(timestamp),
            timestamp,
            question: reading.question,
            spread_name: reading.spread_name,
            spread_id: reading.spread_id,
            drawn_cards: reading.drawn_cards,
            analysis: reading.analysis,
        };

        let mut entries = self.load_or_reset()?;
        entries.insert(0, entry.clone());
        entries.truncate(self.max_items);
        self.save(&entries)?;

        info!(id = %entry.id, total = entries.len(), "Saved reading to history");
        Ok(entry)
    }

    /// Delete a reading. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.guard();

        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);

        if entries.len() == before {
            debug!(id, "No reading to delete");
            return Ok(false);
        }

        self.save(&entries)?;
        info!(id, "Deleted reading from history");
        Ok(true)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.guard();
        self.store.remove(keys::READING_HISTORY)?;
        info!("Cleared reading history");
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Result<Vec<ReadingHistoryEntry>, StoreError> {
        let Some(raw) = self.store.get(keys::READING_HISTORY)? else {
            return Ok(Vec::new());
        };
        let mut entries: Vec<ReadingHistoryEntry> = serde_json::from_str(&raw)?;
        // Stable sort keeps insertion order for equal timestamps.
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// Load for an append. Corrupt history is replaced rather than blocking
    /// new readings from being saved; a failing store is reported.
    fn load_or_reset(&self) -> Result<Vec<ReadingHistoryEntry>, StoreError> {
        match self.load() {
            Err(StoreError::Json(e)) => {
                warn!("Discarding corrupt reading history: {}", e);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn save(&self, entries: &[ReadingHistoryEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)?;
        self.store.set(keys::READING_HISTORY, &json)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// `reading_<millis>_<9 random chars>`
fn new_reading_id(timestamp: u64) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("reading_{}_{}", timestamp, &random[..9])
}
