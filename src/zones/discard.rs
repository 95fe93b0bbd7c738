//! Discard pile.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Face-up stack. Only the top card is visible or drawable, but every card
/// stays in the pile until the round ends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Take the top card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
