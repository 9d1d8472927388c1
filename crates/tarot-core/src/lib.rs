//! Core types for TarotWhisper readings.
//!
//! This crate holds everything about a reading that does not touch storage or
//! the network:
//!
//! - [`Catalog`] - the immutable deck of 78 cards and the available spreads
//! - [`DrawSession`] - the shuffle and draw state machine for one reading
//! - [`resolve_llm_config`] - credential precedence between user settings and
//!   the server-provided defaults
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use tarot_core::{Catalog, DrawSession};
//!
//! let catalog = Catalog::builtin();
//! let spread = catalog.spread("three_card_time").unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let mut session = DrawSession::new(catalog, spread, &mut rng).unwrap();
//! while session.draw_next(&mut rng).is_ok() {}
//!
//! assert!(session.is_complete());
//! assert_eq!(session.drawn_cards().len(), 3);
//! ```

mod card;
mod catalog;
mod draw;
mod error;
mod reading;
mod settings;

pub use card::{DrawnCard, Orientation, Spread, SpreadPosition, Suit, TarotCard};
pub use catalog::{Catalog, DECK_SIZE};
pub use draw::{DrawProgress, DrawRejected, DrawSession, PendingDraw};
pub use error::{CatalogError, SettingsError};
pub use reading::Reading;
pub use settings::{
    normalize, parse_flag, require_llm_config, resolve_llm_config, DefaultLlmConfig, LlmRoute,
    LlmSettings, ResolvedLlmConfig, FALLBACK_MODEL,
};
