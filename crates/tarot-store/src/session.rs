//! Handoff of an in-progress reading between flow steps.
//!
//! The question step stores the question and spread id, the draw step adds
//! the drawn cards, and the analysis step reads everything back. A step that
//! finds its inputs missing or unparsable gets a [`SessionError`] and should
//! send the user back to the question step.

use tarot_core::{Catalog, DrawnCard, Reading};
use tracing::{debug, warn};

use crate::error::{SessionError, StoreError};
use crate::keys;
use crate::kv::KeyValueStore;

/// Question and spread chosen for a reading that has not been drawn yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReading {
    pub question: String,
    pub spread_id: String,
}

/// Reading-flow state on top of an ephemeral store.
#[derive(Debug)]
pub struct ReadingSession<S> {
    store: S,
}

impl<S: KeyValueStore> ReadingSession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Begin a new reading, discarding any cards from a previous one.
    pub fn start(&self, question: &str, spread_id: &str) -> Result<(), StoreError> {
        self.store.remove(keys::DRAWN_CARDS)?;
        self.store.set(keys::QUESTION, question)?;
        self.store.set(keys::SPREAD, spread_id)?;
        debug!(spread_id, "Started reading session");
        Ok(())
    }

    pub fn save_drawn_cards(&self, cards: &[DrawnCard]) -> Result<(), StoreError> {
        let json = serde_json::to_string(cards)?;
        self.store.set(keys::DRAWN_CARDS, &json)
    }

    /// Question and spread id for the draw step.
    pub fn pending(&self) -> Result<PendingReading, SessionError> {
        let question = self
            .store
            .get(keys::QUESTION)?
            .filter(|q| !q.trim().is_empty())
            .ok_or(SessionError::Missing(keys::QUESTION))?;
        let spread_id = self
            .store
            .get(keys::SPREAD)?
            .filter(|s| !s.is_empty())
            .ok_or(SessionError::Missing(keys::SPREAD))?;

        Ok(PendingReading {
            question,
            spread_id,
        })
    }

    /// Everything the analysis step needs, with the spread resolved
    /// against `catalog`.
    pub fn completed(&self, catalog: &Catalog) -> Result<Reading, SessionError> {
        let pending = self.pending()?;

        let spread = catalog
            .spread(&pending.spread_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownSpread(pending.spread_id.clone()))?;

        let raw = self
            .store
            .get(keys::DRAWN_CARDS)?
            .ok_or(SessionError::Missing(keys::DRAWN_CARDS))?;
        let drawn_cards: Vec<DrawnCard> = serde_json::from_str(&raw).map_err(|e| {
            warn!("Failed to parse drawn cards: {}", e);
            SessionError::Corrupt(e)
        })?;
        if drawn_cards.is_empty() {
            return Err(SessionError::Missing(keys::DRAWN_CARDS));
        }

        Ok(Reading::new(pending.question, spread, drawn_cards))
    }

    /// Forget the reading in progress.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(keys::QUESTION)?;
        self.store.remove(keys::SPREAD)?;
        self.store.remove(keys::DRAWN_CARDS)?;
        Ok(())
    }
}
