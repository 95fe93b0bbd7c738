//! Derived view of the table.
//!
//! Nothing here is stored. Every field is computed from the game state and
//! the rules each time the View asks, so selectable slots and enabled
//! controls can never drift from what the rules accept.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, SpecialKind};
use crate::core::{
    DrawSource, GameState, Intent, Phase, PlayerId, SlotRef, SwapTarget,
};
use crate::rules::{GameResult, RulesEngine};
use crate::special::EffectSubPhase;
use crate::zones::Visibility;

use super::prompt::render_prompt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    Game,
}

/// Buttons the View may offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    ConfirmReveal,
    ConfirmSwap,
    Stop,
    LaySpecial,
    SkipSpecial,
    NextRound,
    Restart,
    Exit,
}

impl Control {
    /// The intent a press raises.
    #[must_use]
    pub fn intent(self) -> Intent {
        match self {
            Control::ConfirmReveal => Intent::ConfirmReveal,
            Control::ConfirmSwap => Intent::ConfirmSwap,
            Control::Stop => Intent::DeclareStop,
            Control::LaySpecial => Intent::InvokeSpecial,
            Control::SkipSpecial => Intent::SkipSpecial,
            Control::NextRound => Intent::StartNextRound,
            Control::Restart => Intent::RestartGame,
            Control::Exit => Intent::ExitToMenu,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub slot: SlotRef,
    /// Face value, `None` while face down.
    pub card: Option<Card>,
    pub visibility: Visibility,
    pub selectable: bool,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandView {
    pub player: PlayerId,
    pub name: String,
    pub active: bool,
    pub slots: Vec<SlotView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub player: PlayerId,
    pub name: String,
    pub round_scores: Vec<u32>,
    pub total: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub screen: Screen,
    pub phase: Option<Phase>,
    pub round: u8,
    pub rounds: u8,
    pub active: Option<PlayerId>,
    pub prompt: String,
    pub deck_count: usize,
    pub discard_top: Option<Card>,
    /// The card on offer to the active player.
    pub drawn: Option<Card>,
    pub hands: Vec<HandView>,
    pub deck_selectable: bool,
    pub discard_selectable: bool,
    pub controls: Vec<Control>,
    pub scores: Vec<ScoreLine>,
    pub result: Option<GameResult>,
    pub awaiting_presentation: bool,
    pub halted: bool,
}

impl Presentation {
    /// The menu: no table, only the name prompt.
    #[must_use]
    pub fn menu(rules: &impl RulesEngine) -> Self {
        Self {
            screen: Screen::Menu,
            phase: None,
            round: 0,
            rounds: rules.config().rounds,
            active: None,
            prompt: rules.config().prompts.menu.clone(),
            deck_count: 0,
            discard_top: None,
            drawn: None,
            hands: Vec::new(),
            deck_selectable: false,
            discard_selectable: false,
            controls: Vec::new(),
            scores: Vec::new(),
            result: None,
            awaiting_presentation: false,
            halted: false,
        }
    }

    /// Derive the table view. Nothing is selectable while `awaiting` an
    /// animation or once the game is `halted`.
    #[must_use]
    pub fn build(rules: &impl RulesEngine, state: &GameState, awaiting: bool, halted: bool) -> Self {
        let interactive = !awaiting && !halted;
        let legal = |intent: Intent| interactive && rules.is_legal(state, &intent);
        let active = state.active_player();

        let hands = state
            .hands
            .iter()
            .map(|(player, hand)| HandView {
                player,
                name: state.players[player].name.clone(),
                active: player == active && !state.phase().is_round_finished(),
                slots: hand
                    .iter()
                    .enumerate()
                    .map(|(index, slot)| {
                        let slot_ref = SlotRef::new(player, index);
                        let as_target = player == active && legal(Intent::SelectSwapTarget(SwapTarget::Slot(index)));
                        SlotView {
                            slot: slot_ref,
                            card: slot.is_face_up().then_some(slot.card),
                            visibility: slot.visibility,
                            selectable: as_target || legal(Intent::SelectHandCard(slot_ref)),
                            selected: state.selection.contains(&slot_ref)
                                || (player == active && state.swap_target == Some(SwapTarget::Slot(index))),
                        }
                    })
                    .collect(),
            })
            .collect();

        let mut controls: Vec<Control> = [
            Control::ConfirmReveal,
            Control::ConfirmSwap,
            Control::Stop,
            Control::LaySpecial,
            Control::SkipSpecial,
            Control::NextRound,
        ]
        .into_iter()
        .filter(|control| legal(control.intent()))
        .collect();
        if !awaiting {
            controls.push(Control::Restart);
            controls.push(Control::Exit);
        }

        let scores = state
            .players
            .iter()
            .map(|(player, record)| ScoreLine {
                player,
                name: record.name.clone(),
                round_scores: record.round_scores.clone(),
                total: record.total,
            })
            .collect();

        Self {
            screen: Screen::Game,
            phase: Some(state.phase()),
            round: state.round.number.min(rules.config().rounds),
            rounds: rules.config().rounds,
            active: (!state.phase().is_round_finished()).then_some(active),
            prompt: prompt(rules, state, halted),
            deck_count: state.deck.len(),
            discard_top: state.discard.top(),
            drawn: state.drawn.map(|drawn| drawn.card),
            hands,
            deck_selectable: legal(Intent::ChooseDrawSource(DrawSource::Deck)),
            discard_selectable: legal(Intent::ChooseDrawSource(DrawSource::Discard))
                || legal(Intent::SelectSwapTarget(SwapTarget::Discard)),
            controls,
            scores,
            result: state.result.clone(),
            awaiting_presentation: awaiting,
            halted,
        }
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&HandView> {
        self.hands.iter().find(|hand| hand.player == player)
    }

    #[must_use]
    pub fn slot(&self, slot: SlotRef) -> Option<&SlotView> {
        self.hand(slot.player)?.slots.get(slot.slot)
    }

    #[must_use]
    pub fn has_control(&self, control: Control) -> bool {
        self.controls.contains(&control)
    }
}

fn prompt(rules: &impl RulesEngine, state: &GameState, halted: bool) -> String {
    let config = rules.config();
    let prompts = &config.prompts;
    let name = &state.players[state.active_player()].name;

    if halted {
        return prompts.halted.clone();
    }

    match state.phase() {
        Phase::Reveal => render_prompt(&prompts.reveal, name, config.reveal_count),
        Phase::Draw if state.round.stop_declared => render_prompt(&prompts.final_move, name, 1),
        Phase::Draw => render_prompt(&prompts.draw, name, 1),
        Phase::Swap => render_prompt(&prompts.swap, name, 1),
        Phase::Special => match state.special.pending {
            Some(_) if state.special.sub_phase == EffectSubPhase::AwaitingTarget => {
                render_prompt(&prompts.swap, name, 1)
            }
            Some(SpecialKind::ExtraDraw) => {
                let left = config.extra_draws.saturating_sub(state.special.uses);
                render_prompt(&prompts.extra_draw, name, left as usize)
            }
            Some(SpecialKind::Peek) => render_prompt(&prompts.peek, name, 1),
            Some(SpecialKind::BlindSwap) => render_prompt(&prompts.blind_swap, name, 2),
            None => render_prompt(&prompts.draw, name, 1),
        },
        Phase::RoundOver => prompts.round_over.clone(),
        Phase::GameOver => match &state.result {
            Some(GameResult::Winner(player)) => render_prompt(&prompts.winner, &state.players[*player].name, 1),
            Some(GameResult::Winners(players)) => {
                let names: Vec<&str> = players.iter().map(|p| state.players[*p].name.as_str()).collect();
                render_prompt(&prompts.winners, &names.join(" and "), players.len())
            }
            Some(GameResult::Draw) | None => prompts.tie.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Deck};
    use crate::core::{GameConfig, GameRng};
    use crate::rules::StopRules;

    fn table() -> (StopRules, GameState) {
        let rules = StopRules::new(GameConfig::default());
        let deck = Deck::from_cards(parse_cards("5339 2c88 5b").unwrap());
        let (state, _) = rules
            .new_game_with_deck(
                &["Ada".to_string(), "Grace".to_string()],
                deck,
                PlayerId::new(0),
                GameRng::new(4),
            )
            .unwrap();
        (rules, state)
    }

    #[test]
    fn test_reveal_only_own_slots_selectable() {
        let (rules, state) = table();
        let view = Presentation::build(&rules, &state, false, false);

        assert_eq!(view.prompt, "Ada, select 2 cards");
        assert!(view.slot(SlotRef::new(PlayerId::new(0), 2)).unwrap().selectable);
        assert!(!view.slot(SlotRef::new(PlayerId::new(1), 2)).unwrap().selectable);
        assert!(view.hands.iter().flat_map(|h| &h.slots).all(|s| s.card.is_none()));
        assert!(!view.has_control(Control::ConfirmReveal));
        assert!(!view.deck_selectable);
    }

    #[test]
    fn test_revealed_values_shown() {
        let (rules, mut state) = table();
        for slot in [0, 1] {
            rules
                .apply(&mut state, &Intent::SelectHandCard(SlotRef::new(PlayerId::new(0), slot)))
                .unwrap();
        }
        let view = Presentation::build(&rules, &state, false, false);
        assert!(view.has_control(Control::ConfirmReveal));
        assert!(view.slot(SlotRef::new(PlayerId::new(0), 0)).unwrap().selected);
        assert!(!view.slot(SlotRef::new(PlayerId::new(0), 2)).unwrap().selectable);

        rules.apply(&mut state, &Intent::ConfirmReveal).unwrap();
        let view = Presentation::build(&rules, &state, false, false);
        assert_eq!(view.slot(SlotRef::new(PlayerId::new(0), 1)).unwrap().card, Some(Card::Number(3)));
        assert_eq!(view.prompt, "Grace, select 2 cards");
    }

    #[test]
    fn test_awaiting_blocks_everything() {
        let (rules, state) = table();
        let view = Presentation::build(&rules, &state, true, false);
        assert!(view.controls.is_empty());
        assert!(view.hands.iter().flat_map(|h| &h.slots).all(|s| !s.selectable));
    }

    #[test]
    fn test_menu() {
        let rules = StopRules::new(GameConfig::default());
        let view = Presentation::menu(&rules);
        assert_eq!(view.screen, Screen::Menu);
        assert!(view.hands.is_empty());
    }

    #[test]
    fn test_serializes() {
        let (rules, state) = table();
        let view = Presentation::build(&rules, &state, false, false);
        let json = serde_json::to_string(&view).unwrap();
        let back: Presentation = serde_json::from_str(&json).unwrap();
        assert_eq!(view, back);
    }
}
