//! Card values and the draw pile.
//!
//! - `Card`: numeric or special card value
//! - `Deck`: front-drawn pile, rebuilt from a `DeckComposition` each round

mod card;
mod deck;

pub use card::{parse_cards, Card, CardParseError, SpecialKind};
pub use deck::{count_cards, Deck, DeckComposition};
