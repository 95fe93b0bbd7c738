//! The round/turn state machine.
//!
//! ```text
//! Reveal ─> Draw ─> Swap ─┬─> Draw (next seat)
//!            │            └─> Special ─> Draw (next seat)
//!            └─ stop ─> final moves ─> RoundOver ─> Reveal | GameOver
//! ```
//!
//! Every transition goes through [`StopRules::apply`], which validates the
//! intent first and only then mutates. A rejected intent leaves the state
//! exactly as it was.
//!
//! The player who makes the final move of a round opens the next one.

use crate::cards::Deck;
use crate::core::{
    DrawSource, DrawnCard, GameConfig, GameRng, GameState, Intent, IntentKind, PlayerId, Phase, RoundState,
    RulesError, SlotRef, SwapTarget,
};
use crate::events::{EventQueue, GameEvent};
use crate::scoring;
use crate::special::{ResolutionStatus, SpecialResolver};
use crate::zones::{DiscardPile, Hand, Visibility};

use super::engine::{GameResult, RulesEngine};
use super::validate;

/// Rules for the reveal, draw, swap and stop game.
#[derive(Clone, Debug)]
pub struct StopRules {
    config: GameConfig,
    resolver: SpecialResolver,
}

impl StopRules {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let resolver = SpecialResolver::new(config.extra_draws);
        Self { config, resolver }
    }

    /// Seat the players, pick a random opener and deal round 1.
    pub fn new_game(&self, names: &[String], mut rng: GameRng) -> Result<(GameState, Vec<GameEvent>), RulesError> {
        let names = validate::player_names(names, &self.config)?;
        let starting_player = PlayerId::new(rng.gen_range_usize(0..names.len()) as u8);
        let mut deck = Deck::from_composition(&self.config.deck);
        deck.shuffle(&mut rng);
        self.deal_game(names, deck, starting_player, rng)
    }

    /// Like [`StopRules::new_game`], but round 1 is dealt from `deck` as
    /// given, front first. Later rounds are shuffled as usual.
    pub fn new_game_with_deck(
        &self,
        names: &[String],
        deck: Deck,
        starting_player: PlayerId,
        rng: GameRng,
    ) -> Result<(GameState, Vec<GameEvent>), RulesError> {
        let names = validate::player_names(names, &self.config)?;
        if starting_player.index() >= names.len() {
            return Err(RulesError::InvalidPlayers(format!("no {starting_player} at this table")));
        }
        self.deal_game(names, deck, starting_player, rng)
    }

    fn deal_game(
        &self,
        names: Vec<String>,
        deck: Deck,
        starting_player: PlayerId,
        rng: GameRng,
    ) -> Result<(GameState, Vec<GameEvent>), RulesError> {
        let mut state = GameState::new(names, self.config.deck.clone(), rng);
        let mut events = EventQueue::new();
        events.push(GameEvent::GameStarted {
            players: state.player_count(),
            starting_player,
        });
        self.deal_round(&mut state, 1, starting_player, deck, &mut events)?;
        log::info!(
            "new game: {} players, seed {}, {starting_player} opens",
            state.player_count(),
            state.rng.seed()
        );
        Ok((state, events.into_vec()))
    }

    /// Reset the table for a round and deal every hand in seat order.
    fn deal_round(
        &self,
        state: &mut GameState,
        number: u8,
        starting_player: PlayerId,
        mut deck: Deck,
        events: &mut EventQueue,
    ) -> Result<(), RulesError> {
        for player in PlayerId::all(state.player_count()) {
            state.hands[player] = Hand::new(deck.draw_many(self.config.hand_size)?);
        }
        state.deck = deck;
        state.discard = DiscardPile::new();
        state.round = RoundState::new(number, starting_player);
        state.special.clear();
        state.allow_special = false;
        state.clear_move();

        events.push(GameEvent::RoundStarted {
            round: number,
            starting_player,
        });
        events.push(GameEvent::CardsDealt {
            hand_size: self.config.hand_size,
            deck_remaining: state.deck.len(),
        });
        Ok(())
    }

    fn start_next_round(&self, state: &mut GameState, events: &mut EventQueue) -> Result<(), RulesError> {
        state.round.number += 1;
        if state.round.number > self.config.rounds {
            let result = scoring::final_result(&state.players);
            log::info!("game over: {result}");
            state.round.phase = Phase::GameOver;
            state.result = Some(result.clone());
            state.clear_move();
            events.push(GameEvent::GameOver { result });
            return Ok(());
        }

        let mut deck = Deck::from_composition(&state.composition);
        deck.shuffle(&mut state.rng);
        let number = state.round.number;
        // whoever made the last move of the round opens the next one
        let starting_player = state.round.active_player;
        log::info!("round {number} starts, {starting_player} opens");
        self.deal_round(state, number, starting_player, deck, events)
    }

    // === Reveal ===

    fn toggle_selection(&self, state: &mut GameState, slot: SlotRef, selected: bool, events: &mut EventQueue) {
        if selected {
            state.selection.push(slot);
        } else {
            state.selection.retain(|s| *s != slot);
        }
        events.push(GameEvent::SelectionChanged {
            selection: state.selection.to_vec(),
        });
    }

    fn confirm_reveal(&self, state: &mut GameState, events: &mut EventQueue) {
        let player = state.active_player();
        let slots: Vec<usize> = state.selection.iter().map(|slot| slot.slot).collect();
        let cards = slots
            .iter()
            .filter_map(|&slot| state.hands[player].set_visibility(slot, Visibility::RevealedTemporarily))
            .collect();
        state.clear_selection();
        events.push(GameEvent::CardsRevealed { player, slots, cards });

        state.round.reveals_done += 1;
        if state.round.reveals_done >= state.player_count() {
            state.round.phase = Phase::Draw;
            state.round.active_player = state.round.starting_player;
            state.round.move_counter = 0;
            state.round.turn_counter = 0;
            events.push(GameEvent::TurnStarted {
                player: state.round.active_player,
                turn: state.round.turn_counter,
            });
        } else {
            state.round.active_player = player.next(state.player_count());
        }
    }

    // === Draw / Swap ===

    fn choose_source(&self, state: &mut GameState, source: DrawSource, events: &mut EventQueue) -> Result<(), RulesError> {
        let card = match source {
            DrawSource::Deck => state.deck.peek(),
            DrawSource::Discard => state.discard.top(),
        }
        .ok_or(RulesError::IllegalAction {
            intent: IntentKind::ChooseDrawSource,
            phase: state.phase(),
        })?;

        state.drawn = Some(DrawnCard { source, card });
        state.swap_target = None;
        state.round.phase = Phase::Swap;
        events.push(GameEvent::SourceChosen {
            player: state.active_player(),
            source,
            card,
        });
        Ok(())
    }

    fn select_target(&self, state: &mut GameState, target: SwapTarget, events: &mut EventQueue) {
        state.swap_target = Some(target);
        events.push(GameEvent::SwapTargetSelected {
            player: state.active_player(),
            target,
        });
    }

    /// Move the drawn card off its source and into place.
    ///
    /// `nested` is set for the extra draws of card `A`; those never arm a
    /// special card.
    fn commit_swap(&self, state: &mut GameState, nested: bool, events: &mut EventQueue) -> Result<(), RulesError> {
        let illegal = RulesError::IllegalAction {
            intent: IntentKind::ConfirmSwap,
            phase: state.phase(),
        };
        let Some(drawn) = state.drawn else {
            return Err(illegal);
        };
        let card = match drawn.source {
            DrawSource::Deck => state.deck.draw()?,
            DrawSource::Discard => state.discard.pop().ok_or(illegal)?,
        };
        state.drawn = None;
        let player = state.active_player();

        match state.swap_target.take() {
            Some(SwapTarget::Slot(index)) => {
                let old = state.hands[player].replace(index, card).unwrap_or(card);
                state.discard.push(old);
                state.allow_special = false;
                events.push(GameEvent::CardSwapped {
                    slot: SlotRef::new(player, index),
                    placed: card,
                    discarded: old,
                });
            }
            Some(SwapTarget::Discard) | None => {
                state.discard.push(card);
                state.allow_special = !nested && drawn.source == DrawSource::Deck;
                events.push(GameEvent::CardDiscarded { player, card });
            }
        }
        state.clear_selection();
        Ok(())
    }

    /// After a normal move: open the Special phase or hand over the turn.
    fn after_move(&self, state: &mut GameState, events: &mut EventQueue) -> Result<(), RulesError> {
        let armed = std::mem::take(&mut state.allow_special);
        if let Some(kind) = state.discard.top().and_then(|card| card.special()).filter(|_| armed) {
            log::debug!("{} discarded {kind}", state.active_player());
            self.resolver.offer(state, kind, events);
            return Ok(());
        }
        self.finish_move(state, events)
    }

    fn end_special(&self, state: &mut GameState, events: &mut EventQueue) -> Result<(), RulesError> {
        self.resolver.finish(state, events);
        self.finish_move(state, events)
    }

    /// A move is complete: count a final move or pass the turn.
    fn finish_move(&self, state: &mut GameState, events: &mut EventQueue) -> Result<(), RulesError> {
        if state.round.stop_declared {
            state.round.final_turns_remaining = state.round.final_turns_remaining.saturating_sub(1);
            if state.round.final_turns_remaining == 0 {
                state.clear_move();
                scoring::score_round(state, events)?;
                state.round.phase = Phase::RoundOver;
                return Ok(());
            }
        }
        self.advance_turn(state, events);
        Ok(())
    }

    fn advance_turn(&self, state: &mut GameState, events: &mut EventQueue) {
        let player_count = state.player_count();
        state.round.active_player = state.round.active_player.next(player_count);
        state.round.move_counter += 1;
        if state.round.move_counter >= player_count {
            state.round.move_counter = 0;
            state.round.turn_counter += 1;
        }
        state.clear_move();
        state.round.phase = Phase::Draw;
        events.push(GameEvent::TurnStarted {
            player: state.round.active_player,
            turn: state.round.turn_counter,
        });
    }

    fn declare_stop(&self, state: &mut GameState, events: &mut EventQueue) {
        let player = state.active_player();
        log::info!("{player} called stop in round {}", state.round.number);
        state.round.stop_declared = true;
        state.round.stop_declarer = Some(player);
        state.round.final_turns_remaining = state.player_count() - 1;
        events.push(GameEvent::StopDeclared { player });
        self.advance_turn(state, events);
    }

    fn transition(&self, state: &mut GameState, intent: &Intent, events: &mut EventQueue) -> Result<(), RulesError> {
        let phase = state.phase();
        match (phase, intent) {
            (Phase::Special, Intent::SelectHandCard(slot)) => self.resolver.select(state, *slot, events)?,
            (Phase::Special, Intent::DeselectHandCard(slot)) => self.resolver.deselect(state, *slot, events)?,
            (Phase::Special, Intent::InvokeSpecial) => {
                if self.resolver.invoke(state, events)? == ResolutionStatus::Complete {
                    self.end_special(state, events)?;
                }
            }
            (Phase::Special, Intent::SelectSwapTarget(target)) => {
                self.resolver.select_target(state, *target, events)?;
            }
            (Phase::Special, Intent::ConfirmSwap) => {
                self.commit_swap(state, true, events)?;
                if self.resolver.record_extra_draw(state) == ResolutionStatus::Complete {
                    self.end_special(state, events)?;
                }
            }
            (Phase::Special, Intent::SkipSpecial) => {
                self.resolver.skip(state, events)?;
                self.end_special(state, events)?;
            }
            (_, Intent::SelectHandCard(slot)) => self.toggle_selection(state, *slot, true, events),
            (_, Intent::DeselectHandCard(slot)) => self.toggle_selection(state, *slot, false, events),
            (_, Intent::ConfirmReveal) => self.confirm_reveal(state, events),
            (_, Intent::ChooseDrawSource(source)) => self.choose_source(state, *source, events)?,
            (_, Intent::SelectSwapTarget(target)) => self.select_target(state, *target, events),
            (_, Intent::ConfirmSwap) => {
                self.commit_swap(state, false, events)?;
                self.after_move(state, events)?;
            }
            (_, Intent::DeclareStop) => self.declare_stop(state, events),
            (_, Intent::StartNextRound) => self.start_next_round(state, events)?,
            _ => {
                return Err(RulesError::IllegalAction {
                    intent: intent.kind(),
                    phase,
                })
            }
        }
        Ok(())
    }
}

impl RulesEngine for StopRules {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn validate(&self, state: &GameState, intent: &Intent) -> Result<(), RulesError> {
        validate::check(&self.config, state, intent)
    }

    fn apply(&self, state: &mut GameState, intent: &Intent) -> Result<Vec<GameEvent>, RulesError> {
        self.validate(state, intent)?;

        let (player, round, turn) = (state.active_player(), state.round.number, state.round.turn_counter);
        let mut events = EventQueue::new();
        self.transition(state, intent, &mut events)?;
        state.record(player, round, turn, intent.clone());
        Ok(events.into_vec())
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.result.clone()
    }

    fn candidate_intents(&self, state: &GameState) -> Vec<Intent> {
        let player_count = state.player_count();
        let active = state.active_player();
        let own_slots = state.hands[active].len();
        let mut intents = Vec::new();

        match state.phase() {
            Phase::Reveal => {
                for slot in 0..own_slots {
                    let slot = SlotRef::new(active, slot);
                    intents.push(Intent::SelectHandCard(slot));
                    intents.push(Intent::DeselectHandCard(slot));
                }
                intents.push(Intent::ConfirmReveal);
            }
            Phase::Draw => {
                intents.push(Intent::DeclareStop);
                intents.push(Intent::ChooseDrawSource(DrawSource::Deck));
                intents.push(Intent::ChooseDrawSource(DrawSource::Discard));
            }
            Phase::Swap => {
                intents.extend((0..own_slots).map(|slot| Intent::SelectSwapTarget(SwapTarget::Slot(slot))));
                intents.push(Intent::SelectSwapTarget(SwapTarget::Discard));
                intents.push(Intent::ConfirmSwap);
            }
            Phase::Special => {
                for player in PlayerId::all(player_count) {
                    for slot in 0..state.hands[player].len() {
                        let slot = SlotRef::new(player, slot);
                        intents.push(Intent::SelectHandCard(slot));
                        intents.push(Intent::DeselectHandCard(slot));
                    }
                }
                intents.extend((0..own_slots).map(|slot| Intent::SelectSwapTarget(SwapTarget::Slot(slot))));
                intents.push(Intent::SelectSwapTarget(SwapTarget::Discard));
                intents.push(Intent::ConfirmSwap);
                intents.push(Intent::InvokeSpecial);
                intents.push(Intent::SkipSpecial);
            }
            Phase::RoundOver => intents.push(Intent::StartNextRound),
            Phase::GameOver => {}
        }
        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Card};

    fn names() -> Vec<String> {
        vec!["Ada".into(), "Grace".into()]
    }

    /// Seat 1 is dealt `5339`, seat 2 `2c88`, then the deck continues with `rest`.
    fn game(rest: &str) -> (StopRules, GameState) {
        let rules = StopRules::new(GameConfig::default());
        let deck = Deck::from_cards(parse_cards(&format!("5339 2c88 {rest}")).unwrap());
        let (state, _) = rules
            .new_game_with_deck(&names(), deck, PlayerId::new(0), GameRng::new(1))
            .unwrap();
        (rules, state)
    }

    fn slot(player: u8, slot: usize) -> SlotRef {
        SlotRef::new(PlayerId::new(player), slot)
    }

    fn reveal_all(rules: &StopRules, state: &mut GameState) {
        for _ in 0..state.player_count() {
            let active = state.active_player();
            rules.apply(state, &Intent::SelectHandCard(SlotRef::new(active, 0))).unwrap();
            rules.apply(state, &Intent::SelectHandCard(SlotRef::new(active, 1))).unwrap();
            rules.apply(state, &Intent::ConfirmReveal).unwrap();
        }
    }

    fn swap(rules: &StopRules, state: &mut GameState, source: DrawSource, target: SwapTarget) {
        rules.apply(state, &Intent::ChooseDrawSource(source)).unwrap();
        rules.apply(state, &Intent::SelectSwapTarget(target)).unwrap();
        rules.apply(state, &Intent::ConfirmSwap).unwrap();
    }

    #[test]
    fn test_deal() {
        let (_, state) = game("5");
        assert_eq!(state.phase(), Phase::Reveal);
        assert_eq!(state.hands[PlayerId::new(0)].cards().collect::<Vec<_>>(), parse_cards("5339").unwrap());
        assert_eq!(state.deck.len(), 1);
        assert!(state.discard.is_empty());
    }

    #[test]
    fn test_reveal_selection_rules() {
        let (rules, mut state) = game("5");

        assert!(rules.apply(&mut state, &Intent::SelectHandCard(slot(1, 0))).is_err());
        rules.apply(&mut state, &Intent::SelectHandCard(slot(0, 0))).unwrap();
        assert_eq!(
            rules.apply(&mut state, &Intent::ConfirmReveal),
            Err(RulesError::InvalidSelectionCount { expected: 2, actual: 1 })
        );
        rules.apply(&mut state, &Intent::SelectHandCard(slot(0, 2))).unwrap();
        assert_eq!(
            rules.apply(&mut state, &Intent::SelectHandCard(slot(0, 3))),
            Err(RulesError::InvalidSelectionCount { expected: 2, actual: 3 })
        );

        let events = rules.apply(&mut state, &Intent::ConfirmReveal).unwrap();
        assert!(events.contains(&GameEvent::CardsRevealed {
            player: PlayerId::new(0),
            slots: vec![0, 2],
            cards: vec![Card::Number(5), Card::Number(3)],
        }));
        assert_eq!(state.active_player(), PlayerId::new(1));
        assert_eq!(state.phase(), Phase::Reveal);
    }

    #[test]
    fn test_reveal_then_draw_with_starter() {
        let (rules, mut state) = game("5");
        reveal_all(&rules, &mut state);
        assert_eq!(state.phase(), Phase::Draw);
        assert_eq!(state.active_player(), PlayerId::new(0));
        assert_eq!(state.round.turn_counter, 0);
    }

    #[test]
    fn test_example_swap() {
        let (rules, mut state) = game("5");
        reveal_all(&rules, &mut state);

        swap(&rules, &mut state, DrawSource::Deck, SwapTarget::Slot(1));

        assert_eq!(state.discard.top(), Some(Card::Number(3)));
        assert_eq!(state.hands[PlayerId::new(0)].card(1), Some(Card::Number(5)));
        assert_eq!(state.active_player(), PlayerId::new(1));
        assert_eq!(state.card_total(), 9);
    }

    #[test]
    fn test_drawn_card_stays_on_source_until_commit() {
        let (rules, mut state) = game("57");
        reveal_all(&rules, &mut state);

        rules.apply(&mut state, &Intent::ChooseDrawSource(DrawSource::Deck)).unwrap();
        assert_eq!(state.deck.len(), 2);
        assert_eq!(state.drawn.map(|d| d.card), Some(Card::Number(5)));
    }

    #[test]
    fn test_discard_draw_needs_slot_target() {
        let (rules, mut state) = game("576");
        reveal_all(&rules, &mut state);
        swap(&rules, &mut state, DrawSource::Deck, SwapTarget::Discard);

        rules.apply(&mut state, &Intent::ChooseDrawSource(DrawSource::Discard)).unwrap();
        assert!(rules
            .apply(&mut state, &Intent::SelectSwapTarget(SwapTarget::Discard))
            .is_err());
        assert_eq!(
            rules.apply(&mut state, &Intent::ConfirmSwap),
            Err(RulesError::InvalidSelectionCount { expected: 1, actual: 0 })
        );

        rules.apply(&mut state, &Intent::SelectSwapTarget(SwapTarget::Slot(0))).unwrap();
        rules.apply(&mut state, &Intent::ConfirmSwap).unwrap();
        assert_eq!(state.hands[PlayerId::new(1)].card(0), Some(Card::Number(5)));
        assert_eq!(state.discard.top(), Some(Card::Number(2)));
        assert_eq!(state.discard.len(), 1);
    }

    #[test]
    fn test_swap_from_empty_discard_rejected() {
        let (rules, mut state) = game("5");
        reveal_all(&rules, &mut state);
        state.round.phase = Phase::Swap;
        state.drawn = Some(DrawnCard {
            source: DrawSource::Discard,
            card: Card::Number(4),
        });
        state.swap_target = Some(SwapTarget::Slot(0));

        assert_eq!(
            rules.apply(&mut state, &Intent::ConfirmSwap),
            Err(RulesError::IllegalAction {
                intent: IntentKind::ConfirmSwap,
                phase: Phase::Swap,
            })
        );
        assert_eq!(state.card_total(), 9);
        assert!(state.drawn.is_some());
        assert_eq!(state.hands[PlayerId::new(0)].card(0), Some(Card::Number(5)));
        assert_eq!(state.history.len(), 6);
    }

    #[test]
    fn test_rotation_counters() {
        let (rules, mut state) = game("123456");
        reveal_all(&rules, &mut state);

        swap(&rules, &mut state, DrawSource::Deck, SwapTarget::Slot(0));
        assert_eq!((state.round.move_counter, state.round.turn_counter), (1, 0));
        swap(&rules, &mut state, DrawSource::Deck, SwapTarget::Slot(0));
        assert_eq!((state.round.move_counter, state.round.turn_counter), (0, 1));
    }

    #[test]
    fn test_stop_locked_early() {
        let (rules, mut state) = game("123456");
        reveal_all(&rules, &mut state);
        for _ in 0..2 {
            swap(&rules, &mut state, DrawSource::Deck, SwapTarget::Slot(0));
        }
        assert_eq!(state.round.turn_counter, 1);

        let before = state.round.clone();
        assert!(rules.apply(&mut state, &Intent::DeclareStop).is_err());
        assert_eq!(state.round, before);
    }

    #[test]
    fn test_stop_gives_one_final_move() {
        let (rules, mut state) = game("1234567");
        reveal_all(&rules, &mut state);
        for _ in 0..4 {
            swap(&rules, &mut state, DrawSource::Deck, SwapTarget::Slot(0));
        }
        assert_eq!(state.round.turn_counter, 2);

        rules.apply(&mut state, &Intent::DeclareStop).unwrap();
        assert_eq!(state.round.stop_declarer, Some(PlayerId::new(0)));
        assert_eq!(state.active_player(), PlayerId::new(1));
        assert!(rules.apply(&mut state, &Intent::DeclareStop).is_err());

        swap(&rules, &mut state, DrawSource::Deck, SwapTarget::Slot(1));
        assert_eq!(state.phase(), Phase::RoundOver);
        assert_eq!(state.players[PlayerId::new(0)].round_scores.len(), 1);
        assert!(rules
            .apply(&mut state, &Intent::ChooseDrawSource(DrawSource::Deck))
            .is_err());
    }

    #[test]
    fn test_special_only_from_fresh_deck_discard() {
        // seat 2 swaps the C out of their hand: no special
        let (rules, mut state) = game("71");
        reveal_all(&rules, &mut state);
        swap(&rules, &mut state, DrawSource::Deck, SwapTarget::Slot(0));
        swap(&rules, &mut state, DrawSource::Deck, SwapTarget::Slot(1));
        assert_eq!(state.discard.top(), Some(Card::BLIND_SWAP));
        assert_eq!(state.phase(), Phase::Draw);

        // straight discard of a deck B arms the peek
        let (rules, mut state) = game("b");
        reveal_all(&rules, &mut state);
        swap(&rules, &mut state, DrawSource::Deck, SwapTarget::Discard);
        assert_eq!(state.phase(), Phase::Special);
        assert_eq!(state.active_player(), PlayerId::new(0));
        assert!(!state.allow_special);
    }

    #[test]
    fn test_extra_draw_places_two_cards() {
        let (rules, mut state) = game("a456");
        reveal_all(&rules, &mut state);
        swap(&rules, &mut state, DrawSource::Deck, SwapTarget::Discard);
        assert_eq!(state.special.pending, Some(crate::cards::SpecialKind::ExtraDraw));

        rules.apply(&mut state, &Intent::InvokeSpecial).unwrap();
        rules.apply(&mut state, &Intent::SelectSwapTarget(SwapTarget::Slot(3))).unwrap();
        rules.apply(&mut state, &Intent::ConfirmSwap).unwrap();
        assert_eq!(state.phase(), Phase::Special);

        rules.apply(&mut state, &Intent::InvokeSpecial).unwrap();
        assert!(rules.apply(&mut state, &Intent::SkipSpecial).is_err());
        rules.apply(&mut state, &Intent::ConfirmSwap).unwrap();

        assert_eq!(state.hands[PlayerId::new(0)].card(3), Some(Card::Number(4)));
        assert_eq!(state.discard.top(), Some(Card::Number(5)));
        assert_eq!(state.phase(), Phase::Draw);
        assert_eq!(state.active_player(), PlayerId::new(1));
        assert_eq!(state.card_total(), 12);
    }

    #[test]
    fn test_next_round_opens_with_final_mover() {
        let (rules, mut state) = game("1234567");
        state.round.phase = Phase::RoundOver;
        state.round.number = 1;
        state.round.active_player = PlayerId::new(1);

        rules.apply(&mut state, &Intent::StartNextRound).unwrap();
        assert_eq!(state.round.number, 2);
        assert_eq!(state.round.starting_player, PlayerId::new(1));
        assert_eq!(state.phase(), Phase::Reveal);
        assert_eq!(state.card_total(), state.composition.total());
    }

    #[test]
    fn test_game_over_after_last_round() {
        let (rules, mut state) = game("1");
        state.round.phase = Phase::RoundOver;
        state.round.number = 6;
        state.players[PlayerId::new(0)].total = 24;
        state.players[PlayerId::new(1)].total = 24;

        let events = rules.apply(&mut state, &Intent::StartNextRound).unwrap();
        assert_eq!(state.round.number, 7);
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(rules.is_terminal(&state), Some(GameResult::Draw));
        assert!(events.contains(&GameEvent::GameOver { result: GameResult::Draw }));
        assert!(rules.legal_intents(&state).is_empty());
    }

    #[test]
    fn test_legal_intents_in_draw() {
        let (rules, mut state) = game("1");
        reveal_all(&rules, &mut state);
        assert_eq!(
            rules.legal_intents(&state),
            vec![Intent::ChooseDrawSource(DrawSource::Deck)]
        );
    }

    #[test]
    fn test_history_records_applied_intents() {
        let (rules, mut state) = game("1");
        reveal_all(&rules, &mut state);
        assert_eq!(state.history.len(), 6);
        let _ = rules.apply(&mut state, &Intent::DeclareStop);
        assert_eq!(state.history.len(), 6);
    }
}
