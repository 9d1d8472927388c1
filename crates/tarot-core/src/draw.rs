//! Shuffle and draw engine.
//!
//! A [`DrawSession`] shuffles the whole deck once when the reading starts and
//! then hands out cards from the permuted sequence in order, one per spread
//! position. Orientation is an independent coin flip for every draw.
//!
//! Draws are two-phase so a front end can animate between picking a position
//! and revealing the card: [`DrawSession::begin_draw`] marks a draw as in
//! progress and rejects any other draw until [`DrawSession::finish_draw`] is
//! called with the returned [`PendingDraw`].

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::card::{DrawnCard, Spread, SpreadPosition, TarotCard};
use crate::catalog::Catalog;
use crate::error::CatalogError;

/// Why a draw request was ignored. The session is unchanged when one of
/// these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawRejected {
    /// Another draw has not finished yet.
    #[error("a draw is already in progress")]
    InProgress,

    /// Every position already holds a card.
    #[error("all {0} positions have been drawn")]
    SpreadComplete(usize),

    /// The position does not belong to this spread.
    #[error("position {0} is not part of this spread")]
    UnknownPosition(u32),

    /// The position already holds a card.
    #[error("position {0} already holds a card")]
    PositionFilled(u32),
}

/// A draw that has been started but not revealed.
#[derive(Debug)]
#[must_use = "a pending draw blocks further draws until it is finished"]
pub struct PendingDraw {
    position: SpreadPosition,
}

impl PendingDraw {
    pub fn position(&self) -> &SpreadPosition {
        &self.position
    }
}

/// Drawn / total counts for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawProgress {
    pub drawn: usize,
    pub total: usize,
}

/// Shuffle and draw state for one reading.
#[derive(Debug, Clone)]
pub struct DrawSession {
    spread: Spread,
    deck: Vec<TarotCard>,
    next_card: usize,
    drawn: Vec<DrawnCard>,
    drawing: Option<u32>,
}

impl DrawSession {
    /// Shuffle the catalog for a new reading of `spread`.
    pub fn new<R: Rng + ?Sized>(
        catalog: &Catalog,
        spread: &Spread,
        rng: &mut R,
    ) -> Result<Self, CatalogError> {
        if spread.card_count > catalog.cards().len() {
            return Err(CatalogError::DeckTooSmall {
                spread: spread.id.clone(),
                needed: spread.card_count,
                available: catalog.cards().len(),
            });
        }

        let mut deck = catalog.cards().to_vec();
        deck.shuffle(rng);

        debug!(spread = %spread.id, deck = deck.len(), "Shuffled deck");

        Ok(Self {
            spread: spread.clone(),
            deck,
            next_card: 0,
            drawn: Vec::with_capacity(spread.card_count),
            drawing: None,
        })
    }

    pub fn spread(&self) -> &Spread {
        &self.spread
    }

    /// The shuffled deck in draw order.
    pub fn deck(&self) -> &[TarotCard] {
        &self.deck
    }

    /// Cards drawn so far, in draw order.
    pub fn drawn_cards(&self) -> &[DrawnCard] {
        &self.drawn
    }

    pub fn into_drawn_cards(self) -> Vec<DrawnCard> {
        self.drawn
    }

    pub fn card_at(&self, position_id: u32) -> Option<&DrawnCard> {
        self.drawn.iter().find(|c| c.position.id == position_id)
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.drawn.len() == self.spread.card_count
    }

    pub fn progress(&self) -> DrawProgress {
        DrawProgress {
            drawn: self.drawn.len(),
            total: self.spread.card_count,
        }
    }

    /// Whether a draw at `position_id` would currently be accepted.
    pub fn can_draw_at(&self, position_id: u32) -> bool {
        self.check_draw(position_id).is_ok()
    }

    fn check_draw(&self, position_id: u32) -> Result<&SpreadPosition, DrawRejected> {
        if self.drawing.is_some() {
            return Err(DrawRejected::InProgress);
        }
        if self.is_complete() {
            return Err(DrawRejected::SpreadComplete(self.spread.card_count));
        }
        let position = self
            .spread
            .position(position_id)
            .ok_or(DrawRejected::UnknownPosition(position_id))?;
        if self.card_at(position_id).is_some() {
            return Err(DrawRejected::PositionFilled(position_id));
        }
        Ok(position)
    }

    /// Start a draw at `position_id`.
    pub fn begin_draw(&mut self, position_id: u32) -> Result<PendingDraw, DrawRejected> {
        let position = self.check_draw(position_id)?.clone();
        self.drawing = Some(position_id);
        Ok(PendingDraw { position })
    }

    /// Reveal the next card from the deck at the pending position.
    pub fn finish_draw<R: Rng + ?Sized>(&mut self, pending: PendingDraw, rng: &mut R) -> &DrawnCard {
        debug_assert_eq!(self.drawing, Some(pending.position.id));

        let position = pending.position;
        // new() guarantees card_count <= deck size and check_draw() caps draws
        // at card_count, so the deck cannot run out here.
        let card = self.deck[self.next_card].clone();
        let is_reversed = rng.gen_bool(0.5);

        debug!(
            position = %position.name,
            card = %card.english_name,
            reversed = is_reversed,
            "Drew card"
        );

        self.next_card += 1;
        self.drawing = None;
        let index = self.drawn.len();
        self.drawn.push(DrawnCard {
            card,
            is_reversed,
            position,
        });

        &self.drawn[index]
    }

    /// Draw at `position_id` without an intermediate pending phase.
    pub fn draw_at<R: Rng + ?Sized>(
        &mut self,
        position_id: u32,
        rng: &mut R,
    ) -> Result<&DrawnCard, DrawRejected> {
        let pending = self.begin_draw(position_id)?;
        Ok(self.finish_draw(pending, rng))
    }

    /// Next unfilled position in spread order, if any.
    pub fn next_open_position(&self) -> Option<u32> {
        self.spread
            .positions
            .iter()
            .map(|p| p.id)
            .find(|id| self.card_at(*id).is_none())
    }

    /// Draw at the next unfilled position in spread order.
    pub fn draw_next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&DrawnCard, DrawRejected> {
        if self.drawing.is_some() {
            return Err(DrawRejected::InProgress);
        }
        let position_id = self
            .next_open_position()
            .ok_or(DrawRejected::SpreadComplete(self.spread.card_count))?;
        self.draw_at(position_id, rng)
    }
}
