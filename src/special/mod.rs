//! Special-card resolution.
//!
//! A special card discarded straight from the deck during a normal turn
//! opens a small nested state machine. The resolver owns the rules of that
//! machine; the turn flow only learns when it has finished.
//!
//! ```text
//! Offered ──invoke(A)──> AwaitingTarget ──confirm──> Offered | Complete
//!    │  ──invoke(B/C)──> Complete
//!    └──skip──────────> Complete
//! ```

mod resolver;

pub use resolver::SpecialResolver;

use serde::{Deserialize, Serialize};

use crate::cards::SpecialKind;

/// Where the pending special card is in its resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectSubPhase {
    /// The player may use the card or skip it.
    #[default]
    Offered,
    /// Card `A` drew a card that still has to be placed.
    AwaitingTarget,
}

/// Status returned after a resolver step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// The card is used up; control goes back to the turn flow.
    Complete,
    /// The player has more to decide.
    AwaitingInput,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialCardState {
    pub pending: Option<SpecialKind>,
    pub sub_phase: EffectSubPhase,
    /// Extra draws already committed for card `A`.
    pub uses: u8,
}

impl SpecialCardState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn awaiting_target(&self) -> bool {
        self.pending.is_some() && self.sub_phase == EffectSubPhase::AwaitingTarget
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
