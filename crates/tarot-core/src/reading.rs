//! A completed draw, ready for interpretation.

use serde::{Deserialize, Serialize};

use crate::card::{DrawnCard, Spread};

/// Question, spread and drawn cards for one reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub question: String,
    pub spread: Spread,
    pub drawn_cards: Vec<DrawnCard>,
}

impl Reading {
    pub fn new(question: impl Into<String>, spread: Spread, drawn_cards: Vec<DrawnCard>) -> Self {
        Self {
            question: question.into(),
            spread,
            drawn_cards,
        }
    }
}
