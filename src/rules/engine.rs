//! Rules engine trait.
//!
//! A rules engine decides:
//! - Which intents are legal in a state
//! - How an intent changes the state, and which events it emits
//! - When the game is over

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, GameState, Intent, PlayerId, RulesError};
use crate::events::GameEvent;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Everyone finished level.
    Draw,
    /// Some, but not all, players share the lowest total.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(player) => write!(f, "{player} wins"),
            GameResult::Draw => f.write_str("it's a tie"),
            GameResult::Winners(players) => {
                let names: Vec<String> = players.iter().map(ToString::to_string).collect();
                write!(f, "{} share the win", names.join(" and "))
            }
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `validate` must accept exactly the intents `apply` can carry out
/// - `apply` leaves the state untouched when it returns a rejection; only
///   fatal errors (see [`RulesError::is_fatal`]) may stop halfway
/// - `apply` must be deterministic given the state's RNG
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Check an intent against the current phase without applying it.
    fn validate(&self, state: &GameState, intent: &Intent) -> Result<(), RulesError>;

    /// Apply an intent, returning the events it produced.
    fn apply(&self, state: &mut GameState, intent: &Intent) -> Result<Vec<GameEvent>, RulesError>;

    /// Returns `Some(result)` once the game has ended.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Every intent that could make sense in the current phase, legal or not.
    fn candidate_intents(&self, state: &GameState) -> Vec<Intent>;

    // === Convenience Methods ===

    /// Enumerate the intents `apply` would accept right now.
    fn legal_intents(&self, state: &GameState) -> Vec<Intent> {
        self.candidate_intents(state)
            .into_iter()
            .filter(|intent| self.validate(state, intent).is_ok())
            .collect()
    }

    fn is_legal(&self, state: &GameState, intent: &Intent) -> bool {
        self.validate(state, intent).is_ok()
    }
}
