//! Intents: everything a View can ask the game to do.
//!
//! The View never touches game state. It raises an `Intent`, the session
//! checks it against the current phase and either applies it or rejects it
//! without changing anything.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A specific slot in a specific player's hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub player: PlayerId,
    pub slot: usize,
}

impl SlotRef {
    #[must_use]
    pub const fn new(player: PlayerId, slot: usize) -> Self {
        Self { player, slot }
    }
}

impl std::fmt::Display for SlotRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} slot {}", self.player, self.slot + 1)
    }
}

/// Where the active player takes a card from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawSource {
    /// Top of the draw pile, unseen until drawn.
    Deck,
    /// Top of the discard pile, already known.
    Discard,
}

/// Where a drawn card goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapTarget {
    /// One of the active player's own slots.
    Slot(usize),
    /// Straight onto the discard pile (deck draws only).
    Discard,
}

/// Input raised by the View.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    StartGame { names: Vec<String> },
    SelectHandCard(SlotRef),
    DeselectHandCard(SlotRef),
    ConfirmReveal,
    ChooseDrawSource(DrawSource),
    SelectSwapTarget(SwapTarget),
    ConfirmSwap,
    DeclareStop,
    InvokeSpecial,
    SkipSpecial,
    StartNextRound,
    RestartGame,
    ExitToMenu,
    /// The View finished animating the last transition.
    PresentationComplete,
}

/// Payload-free intent discriminant, for errors and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    StartGame,
    SelectHandCard,
    DeselectHandCard,
    ConfirmReveal,
    ChooseDrawSource,
    SelectSwapTarget,
    ConfirmSwap,
    DeclareStop,
    InvokeSpecial,
    SkipSpecial,
    StartNextRound,
    RestartGame,
    ExitToMenu,
    PresentationComplete,
}

impl Intent {
    #[must_use]
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::StartGame { .. } => IntentKind::StartGame,
            Intent::SelectHandCard(_) => IntentKind::SelectHandCard,
            Intent::DeselectHandCard(_) => IntentKind::DeselectHandCard,
            Intent::ConfirmReveal => IntentKind::ConfirmReveal,
            Intent::ChooseDrawSource(_) => IntentKind::ChooseDrawSource,
            Intent::SelectSwapTarget(_) => IntentKind::SelectSwapTarget,
            Intent::ConfirmSwap => IntentKind::ConfirmSwap,
            Intent::DeclareStop => IntentKind::DeclareStop,
            Intent::InvokeSpecial => IntentKind::InvokeSpecial,
            Intent::SkipSpecial => IntentKind::SkipSpecial,
            Intent::StartNextRound => IntentKind::StartNextRound,
            Intent::RestartGame => IntentKind::RestartGame,
            Intent::ExitToMenu => IntentKind::ExitToMenu,
            Intent::PresentationComplete => IntentKind::PresentationComplete,
        }
    }

    /// Intents handled by the session rather than the rules engine.
    #[must_use]
    pub fn is_session_level(&self) -> bool {
        matches!(
            self,
            Intent::StartGame { .. } | Intent::RestartGame | Intent::ExitToMenu | Intent::PresentationComplete
        )
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IntentKind::StartGame => "start game",
            IntentKind::SelectHandCard => "select card",
            IntentKind::DeselectHandCard => "deselect card",
            IntentKind::ConfirmReveal => "reveal",
            IntentKind::ChooseDrawSource => "draw",
            IntentKind::SelectSwapTarget => "select swap target",
            IntentKind::ConfirmSwap => "confirm swap",
            IntentKind::DeclareStop => "stop",
            IntentKind::InvokeSpecial => "lay special card",
            IntentKind::SkipSpecial => "skip special card",
            IntentKind::StartNextRound => "start next round",
            IntentKind::RestartGame => "restart",
            IntentKind::ExitToMenu => "exit",
            IntentKind::PresentationComplete => "presentation complete",
        };
        f.write_str(name)
    }
}

/// An applied intent, kept in the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// Seat that was active when the intent was applied.
    pub player: PlayerId,
    pub intent: Intent,
    pub round: u8,
    pub turn: u32,
    /// Position in the whole game's history.
    pub sequence: u32,
}
