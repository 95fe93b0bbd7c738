//! Core types: seats, intents, errors, RNG, configuration and game state.
//!
//! Nothing here knows the turn order rules. The rules engine reads and
//! writes these types; the View only ever sees intents going in and
//! events and presentations coming out.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{DrawSource, Intent, IntentKind, IntentRecord, SlotRef, SwapTarget};
pub use config::{ConfigError, GameConfig};
pub use error::RulesError;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{DrawnCard, GameState, Phase, PlayerRecord, RoundState};
