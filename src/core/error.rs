//! Rejections and failures raised by the rules engine and session.

use thiserror::Error;

use super::action::IntentKind;
use super::state::Phase;

/// Why an intent was not applied.
///
/// Everything except [`RulesError::DeckExhausted`] is a rejection: the state
/// is untouched and the View treats it as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("can't {intent} during {phase}")]
    IllegalAction { intent: IntentKind, phase: Phase },
    #[error("need {expected} selected card(s), have {actual}")]
    InvalidSelectionCount { expected: usize, actual: usize },
    #[error("the deck ran out of cards")]
    DeckExhausted,
    #[error("waiting for the last move to finish animating")]
    AwaitingPresentation,
    #[error("no game in progress")]
    NoGame,
    #[error("game already in progress")]
    GameInProgress,
    #[error("game halted after a fatal error, restart or exit")]
    Halted,
    #[error("invalid players: {0}")]
    InvalidPlayers(String),
}

impl RulesError {
    /// Invariant violations that leave the round unplayable.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, RulesError::DeckExhausted)
    }
}
