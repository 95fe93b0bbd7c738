//! # cardstop
//!
//! Rules engine for a two-to-four player "reveal, draw, swap, stop" card
//! game. Each player holds a row of face-down cards and tries to end the
//! round with the lowest total: look at two of your own cards, then take
//! turns drawing from the deck or the discard pile and swapping the drawn
//! card into your row. Special cards let you draw again (`A`), peek at any
//! card (`B`) or blindly trade two cards between players (`C`). Once the
//! table has gone around enough, a player may call stop; everyone else gets
//! one last move and the round is scored. After six rounds the lowest
//! total wins.
//!
//! ## Design Principles
//!
//! 1. **Intents in, events out**: the View raises an [`Intent`]; the session
//!    either applies it and returns [`GameEvent`]s, or rejects it without
//!    touching the state.
//!
//! 2. **Derived presentation**: what is selectable and which controls are
//!    enabled is computed from the rules, never stored as UI flags.
//!
//! 3. **Deterministic**: every shuffle and seat draw goes through a seeded
//!    [`GameRng`], so a seed plus an intent log replays a game exactly.
//!
//! ## Modules
//!
//! - `core`: seats, intents, errors, RNG, configuration, game state
//! - `cards`: card values, deck composition, the draw pile
//! - `zones`: hands and the discard pile
//! - `rules`: `RulesEngine` trait and the turn/phase state machine
//! - `special`: resolver for the special cards
//! - `scoring`: end-of-round scoring and the final result
//! - `events`: logical events emitted by transitions
//! - `view`: the derived presentation and the `View` trait
//! - `session`: the menu-to-game-over session the View talks to
//! - `policy`: automatic players for playouts

pub mod cards;
pub mod core;
pub mod events;
pub mod policy;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod special;
pub mod view;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, DrawSource, GameConfig, GameRng, GameState, Intent, IntentKind, Phase,
    PlayerId, PlayerMap, RulesError, SlotRef, SwapTarget,
};

pub use crate::cards::{parse_cards, Card, Deck, DeckComposition, SpecialKind};

pub use crate::zones::{DiscardPile, Hand, Visibility};

pub use crate::events::GameEvent;

pub use crate::rules::{GameResult, RulesEngine, StopRules};

pub use crate::special::{EffectSubPhase, ResolutionStatus, SpecialCardState};

pub use crate::view::{Control, Presentation, View};

pub use crate::session::GameSession;

pub use crate::policy::{playout, Policy, RandomPolicy};
