//! End-of-round scoring and the end-of-game result.
//!
//! Lower is better. Special cards never score: before a hand is counted,
//! each special card in it is replaced from the deck until the slot holds a
//! number.

mod scorer;

pub use scorer::{final_result, hand_score, score_round};
