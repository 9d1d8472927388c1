//! Reading analysis: stream an interpretation and record it in history.

use tarot_core::Reading;
use tarot_store::{HistoryStore, KeyValueStore, NewReading, ReadingHistoryEntry};
use tracing::{info, warn};

use crate::error::LlmError;
use crate::interpreter::Interpreter;

/// Result of one analysis.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Text accumulated before the stream ended or failed.
    pub text: String,
    pub error: Option<LlmError>,
    /// The saved history entry, when the analysis completed and was stored.
    pub history_entry: Option<ReadingHistoryEntry>,
}

impl AnalysisOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs an interpreter over a reading and saves successful analyses.
pub struct ReadingAnalyzer<'a, I: ?Sized, S> {
    interpreter: &'a I,
    history: &'a HistoryStore<S>,
}

impl<'a, I, S> ReadingAnalyzer<'a, I, S>
where
    I: Interpreter + ?Sized,
    S: KeyValueStore,
{
    pub fn new(interpreter: &'a I, history: &'a HistoryStore<S>) -> Self {
        Self {
            interpreter,
            history,
        }
    }

    /// Stream the analysis, calling `on_update` with the accumulated text
    /// after every increment.
    ///
    /// Only a complete, non-empty analysis is saved. A failure to save is
    /// logged and does not affect the outcome's text or error.
    pub async fn analyze<F>(&self, reading: &Reading, on_update: F) -> AnalysisOutcome
    where
        F: FnMut(&str),
    {
        info!(
            interpreter = self.interpreter.name(),
            spread = %reading.spread.id,
            cards = reading.drawn_cards.len(),
            "Starting analysis"
        );

        let stream = match self.interpreter.interpret(reading).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Analysis request failed: {}", e);
                return AnalysisOutcome {
                    text: String::new(),
                    error: Some(e),
                    history_entry: None,
                };
            }
        };

        let (text, error) = stream.collect_text(on_update).await;
        if let Some(e) = error {
            warn!("Analysis interrupted after {} bytes: {}", text.len(), e);
            return AnalysisOutcome {
                text,
                error: Some(e),
                history_entry: None,
            };
        }

        let history_entry = if text.trim().is_empty() {
            warn!("Analysis finished without any text; not saving");
            None
        } else {
            self.save(reading, &text)
        };

        AnalysisOutcome {
            text,
            error: None,
            history_entry,
        }
    }

    fn save(&self, reading: &Reading, analysis: &str) -> Option<ReadingHistoryEntry> {
        let new = NewReading {
            question: reading.question.clone(),
            spread_name: reading.spread.name.clone(),
            spread_id: reading.spread.id.clone(),
            drawn_cards: reading.drawn_cards.clone(),
            analysis: analysis.to_string(),
        };
        match self.history.append(new) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Failed to save reading to history: {}", e);
                None
            }
        }
    }
}
