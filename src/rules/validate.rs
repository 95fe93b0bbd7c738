//! Legality checks, one function per phase.
//!
//! Each check answers "would `apply` accept this intent right now" without
//! touching the state. Selectable slots and enabled controls in the
//! presentation are derived from the same checks.

use crate::cards::SpecialKind;
use crate::core::{
    DrawSource, GameConfig, GameState, Intent, Phase, RulesError, SlotRef, SwapTarget,
};
use crate::special::EffectSubPhase;

fn illegal(state: &GameState, intent: &Intent) -> RulesError {
    RulesError::IllegalAction {
        intent: intent.kind(),
        phase: state.phase(),
    }
}

/// Seat names for a new game. Blank names become "Player n".
pub fn player_names(names: &[String], config: &GameConfig) -> Result<Vec<String>, RulesError> {
    if names.len() < config.min_players || names.len() > config.max_players {
        return Err(RulesError::InvalidPlayers(format!(
            "{} players, need {} to {}",
            names.len(),
            config.min_players,
            config.max_players
        )));
    }
    Ok(names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim();
            if name.is_empty() {
                format!("Player {}", i + 1)
            } else {
                name.to_string()
            }
        })
        .collect())
}

pub(super) fn check(config: &GameConfig, state: &GameState, intent: &Intent) -> Result<(), RulesError> {
    match state.phase() {
        Phase::Reveal => check_reveal(config, state, intent),
        Phase::Draw => check_draw(config, state, intent),
        Phase::Swap => check_swap(state, intent),
        Phase::Special => check_special(state, intent),
        Phase::RoundOver if *intent == Intent::StartNextRound => Ok(()),
        Phase::RoundOver | Phase::GameOver => Err(illegal(state, intent)),
    }
}

fn own_slot(state: &GameState, slot: SlotRef) -> bool {
    slot.player == state.active_player() && state.card_at(slot).is_some()
}

fn check_reveal(config: &GameConfig, state: &GameState, intent: &Intent) -> Result<(), RulesError> {
    match intent {
        Intent::SelectHandCard(slot) => {
            if !own_slot(state, *slot) || state.selection.contains(slot) {
                return Err(illegal(state, intent));
            }
            if state.selection.len() >= config.reveal_count {
                return Err(RulesError::InvalidSelectionCount {
                    expected: config.reveal_count,
                    actual: state.selection.len() + 1,
                });
            }
            Ok(())
        }
        Intent::DeselectHandCard(slot) if state.selection.contains(slot) => Ok(()),
        Intent::ConfirmReveal => {
            if state.selection.len() == config.reveal_count {
                Ok(())
            } else {
                Err(RulesError::InvalidSelectionCount {
                    expected: config.reveal_count,
                    actual: state.selection.len(),
                })
            }
        }
        _ => Err(illegal(state, intent)),
    }
}

fn check_draw(config: &GameConfig, state: &GameState, intent: &Intent) -> Result<(), RulesError> {
    match intent {
        Intent::DeclareStop if state.can_declare_stop(config.stop_after_turns) => Ok(()),
        Intent::ChooseDrawSource(DrawSource::Deck) if !state.deck.is_empty() => Ok(()),
        Intent::ChooseDrawSource(DrawSource::Discard) if !state.discard.is_empty() => Ok(()),
        _ => Err(illegal(state, intent)),
    }
}

fn valid_target(state: &GameState, target: SwapTarget, source: DrawSource) -> bool {
    match target {
        SwapTarget::Slot(slot) => slot < state.hands[state.active_player()].len(),
        SwapTarget::Discard => source == DrawSource::Deck,
    }
}

fn check_swap(state: &GameState, intent: &Intent) -> Result<(), RulesError> {
    let Some(drawn) = state.drawn else {
        return Err(illegal(state, intent));
    };
    match intent {
        Intent::SelectSwapTarget(target) if valid_target(state, *target, drawn.source) => Ok(()),
        Intent::ConfirmSwap => {
            if state.swap_target.is_none() && drawn.source == DrawSource::Discard {
                Err(RulesError::InvalidSelectionCount { expected: 1, actual: 0 })
            } else {
                Ok(())
            }
        }
        _ => Err(illegal(state, intent)),
    }
}

fn check_special(state: &GameState, intent: &Intent) -> Result<(), RulesError> {
    let Some(kind) = state.special.pending else {
        return Err(illegal(state, intent));
    };
    let offered = state.special.sub_phase == EffectSubPhase::Offered;

    match intent {
        Intent::SelectHandCard(slot) if offered && kind != SpecialKind::ExtraDraw => {
            if state.card_at(*slot).is_none() {
                return Err(illegal(state, intent));
            }
            let replaces_own_pick = state.selection.iter().any(|s| s.player == slot.player);
            if kind == SpecialKind::BlindSwap && !replaces_own_pick && state.selection.len() >= 2 {
                return Err(RulesError::InvalidSelectionCount {
                    expected: 2,
                    actual: state.selection.len() + 1,
                });
            }
            Ok(())
        }
        Intent::DeselectHandCard(slot) if offered && state.selection.contains(slot) => Ok(()),
        Intent::InvokeSpecial if offered => {
            let (expected, actual) = match kind {
                SpecialKind::ExtraDraw if state.deck.is_empty() => return Err(illegal(state, intent)),
                SpecialKind::ExtraDraw => return Ok(()),
                SpecialKind::Peek => (1, state.selection.len()),
                SpecialKind::BlindSwap => (2, state.selection.len()),
            };
            if expected == actual {
                Ok(())
            } else {
                Err(RulesError::InvalidSelectionCount { expected, actual })
            }
        }
        Intent::SkipSpecial if offered => Ok(()),
        Intent::SelectSwapTarget(target)
            if state.special.awaiting_target() && valid_target(state, *target, DrawSource::Deck) =>
        {
            Ok(())
        }
        Intent::ConfirmSwap if state.special.awaiting_target() && state.drawn.is_some() => Ok(()),
        _ => Err(illegal(state, intent)),
    }
}
