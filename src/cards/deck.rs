//! Deck composition and the draw pile.
//!
//! The draw pile is drawn from the front. It is rebuilt from a
//! [`DeckComposition`] and shuffled at the start of every round.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, SpecialKind};
use crate::core::{GameRng, RulesError};

/// How many copies of each card a fresh deck holds.
///
/// The default is the table deck: four of each `0..=8`, nine `9`s,
/// nine `C`, seven `B` and five `A`, 66 cards in total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckComposition {
    /// Copies of each number, indexed by value.
    pub numbers: [u8; 10],
    pub extra_draw: u8,
    pub peek: u8,
    pub blind_swap: u8,
}

impl Default for DeckComposition {
    fn default() -> Self {
        Self {
            numbers: [4, 4, 4, 4, 4, 4, 4, 4, 4, 9],
            extra_draw: 5,
            peek: 7,
            blind_swap: 9,
        }
    }
}

impl DeckComposition {
    /// Copies of a special card.
    #[must_use]
    pub fn special_copies(&self, kind: SpecialKind) -> u8 {
        match kind {
            SpecialKind::ExtraDraw => self.extra_draw,
            SpecialKind::Peek => self.peek,
            SpecialKind::BlindSwap => self.blind_swap,
        }
    }

    #[must_use]
    pub fn numeric_total(&self) -> usize {
        self.numbers.iter().map(|&n| n as usize).sum()
    }

    #[must_use]
    pub fn special_total(&self) -> usize {
        SpecialKind::ALL
            .iter()
            .map(|&kind| self.special_copies(kind) as usize)
            .sum()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.numeric_total() + self.special_total()
    }

    /// Unshuffled card list: numbers ascending, then `C`, `B`, `A`.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.total());
        for (value, &copies) in self.numbers.iter().enumerate() {
            cards.extend(std::iter::repeat(Card::Number(value as u8)).take(copies as usize));
        }
        for kind in [SpecialKind::BlindSwap, SpecialKind::Peek, SpecialKind::ExtraDraw] {
            cards.extend(std::iter::repeat(Card::Special(kind)).take(self.special_copies(kind) as usize));
        }
        cards
    }
}

/// The draw pile. Front of the queue is the top card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Unshuffled deck built from a composition.
    #[must_use]
    pub fn from_composition(composition: &DeckComposition) -> Self {
        Self::from_cards(composition.cards())
    }

    /// Deck with the given order, first element on top.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Shuffle the whole pile in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(self.cards.make_contiguous());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The top card, without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<Card> {
        self.cards.front().copied()
    }

    /// Draw the top card.
    pub fn draw(&mut self) -> Result<Card, RulesError> {
        self.cards.pop_front().ok_or(RulesError::DeckExhausted)
    }

    /// Draw `count` cards. Nothing is drawn when fewer remain.
    pub fn draw_many(&mut self, count: usize) -> Result<Vec<Card>, RulesError> {
        if self.cards.len() < count {
            return Err(RulesError::DeckExhausted);
        }
        Ok(self.cards.drain(..count).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Copies of each card value still in the pile.
    #[must_use]
    pub fn counts(&self) -> FxHashMap<Card, usize> {
        count_cards(self.cards.iter().copied())
    }
}

/// Tally card values.
pub fn count_cards(cards: impl IntoIterator<Item = Card>) -> FxHashMap<Card, usize> {
    let mut counts = FxHashMap::default();
    for card in cards {
        *counts.entry(card).or_insert(0) += 1;
    }
    counts
}
