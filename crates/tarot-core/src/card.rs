//! Card, spread and draw records.
//!
//! Field names serialize in camelCase so persisted readings keep the same
//! layout as the browser application's storage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The suit a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Major,
    Wands,
    Cups,
    Swords,
    Pentacles,
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TarotCard {
    /// Identifier: "0".."21" for the major arcana, "<rank>_<suit>" otherwise.
    pub id: String,
    /// Display name.
    pub name: String,
    /// English name.
    pub english_name: String,
    pub suit: Suit,
    pub upright_keywords: Vec<String>,
    pub reversed_keywords: Vec<String>,
}

impl TarotCard {
    /// Keywords for the given orientation.
    pub fn keywords(&self, orientation: Orientation) -> &[String] {
        match orientation {
            Orientation::Upright => &self.upright_keywords,
            Orientation::Reversed => &self.reversed_keywords,
        }
    }
}

/// One slot of a spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadPosition {
    pub id: u32,
    pub name: String,
    pub description: String,
}

/// A spread layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spread {
    pub id: String,
    pub name: String,
    pub english_name: String,
    pub description: String,
    pub card_count: usize,
    /// Ordered positions, one per card.
    pub positions: Vec<SpreadPosition>,
}

impl Spread {
    /// Look up a position by id.
    pub fn position(&self, id: u32) -> Option<&SpreadPosition> {
        self.positions.iter().find(|p| p.id == id)
    }
}

/// Card orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    pub fn from_reversed(is_reversed: bool) -> Self {
        if is_reversed {
            Self::Reversed
        } else {
            Self::Upright
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upright => "upright",
            Self::Reversed => "reversed",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A card bound to a spread position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawnCard {
    pub card: TarotCard,
    pub is_reversed: bool,
    pub position: SpreadPosition,
}

impl DrawnCard {
    pub fn orientation(&self) -> Orientation {
        Orientation::from_reversed(self.is_reversed)
    }

    /// Keywords matching the drawn orientation.
    pub fn keywords(&self) -> &[String] {
        self.card.keywords(self.orientation())
    }
}
