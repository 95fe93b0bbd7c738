//! Player hands: fixed rows of face-down card slots.
//!
//! A slot keeps its position for the whole round; swaps replace the card in
//! it, never the slot itself.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Who may currently see the face of a slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Face down.
    #[default]
    Hidden,
    /// Flipped for a reveal or a peek; flips back once presented.
    RevealedTemporarily,
    /// Face up for the rest of the round (scoring).
    RevealedPermanently,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub card: Card,
    pub visibility: Visibility,
}

impl Slot {
    #[must_use]
    pub fn hidden(card: Card) -> Self {
        Self {
            card,
            visibility: Visibility::Hidden,
        }
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.visibility != Visibility::Hidden
    }
}

/// One player's row of slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: Vec<Slot>,
}

impl Hand {
    /// Deal a hand, every slot face down.
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            slots: cards.into_iter().map(Slot::hidden).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<Card> {
        self.slots.get(index).map(|slot| slot.card)
    }

    /// Put `card` face down into a slot and return the previous card.
    pub fn replace(&mut self, index: usize, card: Card) -> Option<Card> {
        let slot = self.slots.get_mut(index)?;
        let old = std::mem::replace(&mut slot.card, card);
        slot.visibility = Visibility::Hidden;
        Some(old)
    }

    /// Swap a card in without touching the slot's visibility.
    pub fn set_card(&mut self, index: usize, card: Card) -> Option<Card> {
        let slot = self.slots.get_mut(index)?;
        Some(std::mem::replace(&mut slot.card, card))
    }

    pub fn set_visibility(&mut self, index: usize, visibility: Visibility) -> Option<Card> {
        let slot = self.slots.get_mut(index)?;
        slot.visibility = visibility;
        Some(slot.card)
    }

    /// Flip temporary reveals back face down. Returns the flipped slot indices.
    pub fn conceal_temporary(&mut self) -> Vec<usize> {
        let mut flipped = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.visibility == Visibility::RevealedTemporarily {
                slot.visibility = Visibility::Hidden;
                flipped.push(index);
            }
        }
        flipped
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.slots.iter().map(|slot| slot.card)
    }
}
