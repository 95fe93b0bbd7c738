//! Rules of the game and the turn/phase state machine.
//!
//! `RulesEngine` is the seam between the session and the rules: the session
//! never interprets phases itself, it asks the engine whether an intent is
//! legal and lets the engine apply it. `StopRules` is the engine for the
//! reveal, draw, swap and stop card game.

pub mod engine;
mod machine;
mod validate;

pub use engine::{GameResult, RulesEngine};
pub use machine::StopRules;
pub use validate::player_names;
