//! Rules of the three special cards.

use crate::cards::SpecialKind;
use crate::core::{
    DrawSource, DrawnCard, GameState, IntentKind, Phase, RulesError, SlotRef, SwapTarget,
};
use crate::events::{EventQueue, GameEvent};
use crate::zones::Visibility;

use super::{EffectSubPhase, ResolutionStatus};

fn illegal(intent: IntentKind) -> RulesError {
    RulesError::IllegalAction {
        intent,
        phase: Phase::Special,
    }
}

/// Drives the Special phase. Holds no state of its own; everything lives in
/// `GameState::special` so a cloned state resumes mid-resolution.
#[derive(Clone, Copy, Debug)]
pub struct SpecialResolver {
    extra_draws: u8,
}

impl SpecialResolver {
    #[must_use]
    pub fn new(extra_draws: u8) -> Self {
        Self { extra_draws }
    }

    /// Open the Special phase for `kind`.
    pub fn offer(&self, state: &mut GameState, kind: SpecialKind, events: &mut EventQueue) {
        state.special.pending = Some(kind);
        state.special.sub_phase = EffectSubPhase::Offered;
        state.special.uses = 0;
        state.round.phase = Phase::Special;
        state.clear_move();
        events.push(GameEvent::SpecialOffered {
            player: state.active_player(),
            kind,
        });
    }

    fn pending(&self, state: &GameState, intent: IntentKind) -> Result<SpecialKind, RulesError> {
        state.special.pending.ok_or(illegal(intent))
    }

    /// Pick a slot for a peek or a blind swap.
    pub fn select(&self, state: &mut GameState, slot: SlotRef, events: &mut EventQueue) -> Result<(), RulesError> {
        let kind = self.pending(state, IntentKind::SelectHandCard)?;
        if state.special.sub_phase != EffectSubPhase::Offered || state.card_at(slot).is_none() {
            return Err(illegal(IntentKind::SelectHandCard));
        }

        match kind {
            SpecialKind::ExtraDraw => return Err(illegal(IntentKind::SelectHandCard)),
            SpecialKind::Peek => {
                state.selection.clear();
                state.selection.push(slot);
            }
            SpecialKind::BlindSwap => {
                if let Some(existing) = state.selection.iter().position(|s| s.player == slot.player) {
                    state.selection[existing] = slot;
                } else if state.selection.len() >= 2 {
                    return Err(RulesError::InvalidSelectionCount {
                        expected: 2,
                        actual: state.selection.len() + 1,
                    });
                } else {
                    state.selection.push(slot);
                }
            }
        }

        events.push(GameEvent::SelectionChanged {
            selection: state.selection.to_vec(),
        });
        Ok(())
    }

    pub fn deselect(&self, state: &mut GameState, slot: SlotRef, events: &mut EventQueue) -> Result<(), RulesError> {
        self.pending(state, IntentKind::DeselectHandCard)?;
        let Some(position) = state.selection.iter().position(|s| *s == slot) else {
            return Err(illegal(IntentKind::DeselectHandCard));
        };
        state.selection.remove(position);
        events.push(GameEvent::SelectionChanged {
            selection: state.selection.to_vec(),
        });
        Ok(())
    }

    /// Use the pending card.
    pub fn invoke(&self, state: &mut GameState, events: &mut EventQueue) -> Result<ResolutionStatus, RulesError> {
        let kind = self.pending(state, IntentKind::InvokeSpecial)?;
        if state.special.sub_phase != EffectSubPhase::Offered {
            return Err(illegal(IntentKind::InvokeSpecial));
        }
        let player = state.active_player();

        match kind {
            SpecialKind::ExtraDraw => {
                let card = state.deck.peek().ok_or(illegal(IntentKind::InvokeSpecial))?;
                state.drawn = Some(DrawnCard {
                    source: DrawSource::Deck,
                    card,
                });
                state.swap_target = None;
                state.special.sub_phase = EffectSubPhase::AwaitingTarget;
                events.push(GameEvent::SpecialInvoked { player, kind });
                events.push(GameEvent::SourceChosen {
                    player,
                    source: DrawSource::Deck,
                    card,
                });
                Ok(ResolutionStatus::AwaitingInput)
            }
            SpecialKind::Peek => {
                let [slot] = state.selection.as_slice() else {
                    return Err(RulesError::InvalidSelectionCount {
                        expected: 1,
                        actual: state.selection.len(),
                    });
                };
                let slot = *slot;
                let card = state.hands[slot.player]
                    .set_visibility(slot.slot, Visibility::RevealedTemporarily)
                    .ok_or(illegal(IntentKind::InvokeSpecial))?;
                events.push(GameEvent::SpecialInvoked { player, kind });
                events.push(GameEvent::CardPeeked { player, slot, card });
                Ok(ResolutionStatus::Complete)
            }
            SpecialKind::BlindSwap => {
                let [first, second] = state.selection.as_slice() else {
                    return Err(RulesError::InvalidSelectionCount {
                        expected: 2,
                        actual: state.selection.len(),
                    });
                };
                let (first, second) = (*first, *second);
                let (Some(a), Some(b)) = (state.card_at(first), state.card_at(second)) else {
                    return Err(illegal(IntentKind::InvokeSpecial));
                };
                state.hands[first.player].replace(first.slot, b);
                state.hands[second.player].replace(second.slot, a);
                events.push(GameEvent::SpecialInvoked { player, kind });
                events.push(GameEvent::CardsSwappedBlind { player, first, second });
                Ok(ResolutionStatus::Complete)
            }
        }
    }

    /// Aim the card drawn by `A`. Own slot or the discard pile.
    pub fn select_target(
        &self,
        state: &mut GameState,
        target: SwapTarget,
        events: &mut EventQueue,
    ) -> Result<(), RulesError> {
        if !state.special.awaiting_target() {
            return Err(illegal(IntentKind::SelectSwapTarget));
        }
        let player = state.active_player();
        if let SwapTarget::Slot(slot) = target {
            if slot >= state.hands[player].len() {
                return Err(illegal(IntentKind::SelectSwapTarget));
            }
        }
        state.swap_target = Some(target);
        events.push(GameEvent::SwapTargetSelected { player, target });
        Ok(())
    }

    /// Count a committed extra draw. The card itself was placed by the turn
    /// flow's swap.
    pub fn record_extra_draw(&self, state: &mut GameState) -> ResolutionStatus {
        state.special.uses += 1;
        if state.special.uses >= self.extra_draws {
            ResolutionStatus::Complete
        } else {
            state.special.sub_phase = EffectSubPhase::Offered;
            ResolutionStatus::AwaitingInput
        }
    }

    /// Decline the card. Not possible once an extra draw is on the table.
    pub fn skip(&self, state: &mut GameState, events: &mut EventQueue) -> Result<(), RulesError> {
        let kind = self.pending(state, IntentKind::SkipSpecial)?;
        if state.special.sub_phase != EffectSubPhase::Offered {
            return Err(illegal(IntentKind::SkipSpecial));
        }
        events.push(GameEvent::SpecialSkipped {
            player: state.active_player(),
            kind,
        });
        Ok(())
    }

    /// Clear resolver state once the card is done with.
    pub fn finish(&self, state: &mut GameState, events: &mut EventQueue) {
        if let Some(kind) = state.special.pending {
            events.push(GameEvent::SpecialResolved {
                player: state.active_player(),
                kind,
            });
        }
        state.special.clear();
        state.clear_move();
    }
}
