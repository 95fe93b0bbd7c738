//! Where cards live during a round.
//!
//! Every card of the deck is in exactly one of three places: the draw pile
//! (`cards::Deck`), a player's `Hand`, or the `DiscardPile`. Moves between
//! them never create or destroy cards.

mod discard;
mod hand;

pub use discard::DiscardPile;
pub use hand::{Hand, Slot, Visibility};
