//! The card and spread catalog.

use std::collections::HashSet;
use std::sync::OnceLock;

use tracing::debug;

use crate::card::{Spread, TarotCard};
use crate::error::CatalogError;

/// Number of cards in a full tarot deck.
pub const DECK_SIZE: usize = 78;

const CARDS_JSON: &str = include_str!("../data/tarot_cards.json");
const SPREADS_JSON: &str = include_str!("../data/spreads.json");

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

/// Immutable deck and spread definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: Vec<TarotCard>,
    spreads: Vec<Spread>,
}

impl Catalog {
    /// The built-in catalog: 22 major and 56 minor arcana plus four spreads.
    ///
    /// Parsed once on first use.
    pub fn builtin() -> &'static Catalog {
        BUILTIN.get_or_init(|| {
            Self::from_json(CARDS_JSON, SPREADS_JSON).expect("embedded catalog data is valid")
        })
    }

    /// Load a catalog from JSON arrays of cards and spreads.
    pub fn from_json(cards: &str, spreads: &str) -> Result<Self, CatalogError> {
        let cards: Vec<TarotCard> = serde_json::from_str(cards)?;
        let spreads: Vec<Spread> = serde_json::from_str(spreads)?;
        Self::new(cards, spreads)
    }

    /// Build a catalog, validating card ids and spread shapes.
    pub fn new(cards: Vec<TarotCard>, spreads: Vec<Spread>) -> Result<Self, CatalogError> {
        let mut card_ids = HashSet::new();
        for card in &cards {
            if !card_ids.insert(card.id.as_str()) {
                return Err(CatalogError::DuplicateCard(card.id.clone()));
            }
        }

        let mut spread_ids = HashSet::new();
        for spread in &spreads {
            if !spread_ids.insert(spread.id.as_str()) {
                return Err(CatalogError::DuplicateSpread(spread.id.clone()));
            }
            if spread.positions.len() != spread.card_count {
                return Err(CatalogError::PositionMismatch {
                    spread: spread.id.clone(),
                    declared: spread.card_count,
                    positions: spread.positions.len(),
                });
            }
            if spread.card_count > cards.len() {
                return Err(CatalogError::DeckTooSmall {
                    spread: spread.id.clone(),
                    needed: spread.card_count,
                    available: cards.len(),
                });
            }
        }

        debug!(cards = cards.len(), spreads = spreads.len(), "Loaded catalog");

        Ok(Self { cards, spreads })
    }

    /// All cards, major arcana first.
    pub fn cards(&self) -> &[TarotCard] {
        &self.cards
    }

    pub fn spreads(&self) -> &[Spread] {
        &self.spreads
    }

    pub fn card(&self, id: &str) -> Option<&TarotCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn spread(&self, id: &str) -> Option<&Spread> {
        self.spreads.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    #[test]
    fn test_builtin_has_full_deck() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.cards().len(), DECK_SIZE);

        let majors = catalog
            .cards()
            .iter()
            .filter(|c| c.suit == Suit::Major)
            .count();
        assert_eq!(majors, 22);

        for suit in [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles] {
            let count = catalog.cards().iter().filter(|c| c.suit == suit).count();
            assert_eq!(count, 14, "{:?} should have 14 cards", suit);
        }
    }

    #[test]
    fn test_builtin_spreads() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog.spreads().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "single_card",
                "three_card_time",
                "three_card_mind_body_spirit",
                "celtic_cross"
            ]
        );

        let single = catalog.spread("single_card").unwrap();
        assert_eq!(single.card_count, 1);
        assert_eq!(single.positions[0].name, "Present");

        let celtic = catalog.spread("celtic_cross").unwrap();
        assert_eq!(celtic.card_count, 10);
        assert_eq!(celtic.positions.len(), 10);
    }

    #[test]
    fn test_card_lookup() {
        let catalog = Catalog::builtin();
        let fool = catalog.card("0").unwrap();
        assert_eq!(fool.english_name, "The Fool");
        assert_eq!(
            catalog.card("queen_cups").unwrap().english_name,
            "Queen of Cups"
        );
        assert!(catalog.card("joker").is_none());
        assert!(catalog.spread("missing").is_none());
    }

    #[test]
    fn test_rejects_position_mismatch() {
        let spreads = r#"[{
            "id": "broken",
            "name": "Broken",
            "englishName": "Broken",
            "description": "",
            "cardCount": 2,
            "positions": [{"id": 1, "name": "Only", "description": ""}]
        }]"#;

        let err = Catalog::from_json(CARDS_JSON, spreads).unwrap_err();
        match err {
            CatalogError::PositionMismatch {
                declared, positions, ..
            } => {
                assert_eq!(declared, 2);
                assert_eq!(positions, 1);
            }
            other => panic!("Expected PositionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_duplicate_card() {
        let cards = r#"[
            {"id": "0", "name": "a", "englishName": "A", "suit": "major", "uprightKeywords": [], "reversedKeywords": []},
            {"id": "0", "name": "b", "englishName": "B", "suit": "major", "uprightKeywords": [], "reversedKeywords": []}
        ]"#;

        let err = Catalog::from_json(cards, "[]").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCard(id) if id == "0"));
    }

    #[test]
    fn test_rejects_spread_larger_than_deck() {
        let cards = r#"[
            {"id": "0", "name": "a", "englishName": "A", "suit": "major", "uprightKeywords": [], "reversedKeywords": []}
        ]"#;
        let spreads = r#"[{
            "id": "pair",
            "name": "Pair",
            "englishName": "Pair",
            "description": "",
            "cardCount": 2,
            "positions": [
                {"id": 1, "name": "One", "description": ""},
                {"id": 2, "name": "Two", "description": ""}
            ]
        }]"#;

        let err = Catalog::from_json(cards, spreads).unwrap_err();
        assert!(matches!(err, CatalogError::DeckTooSmall { needed: 2, available: 1, .. }));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            Catalog::from_json("not json", "[]"),
            Err(CatalogError::Json(_))
        ));
    }
}
