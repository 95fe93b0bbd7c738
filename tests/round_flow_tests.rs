//! Round and game flow through the session.

use cardstop::view::Screen;
use cardstop::{
    parse_cards, Control, Deck, DrawSource, GameConfig, GameEvent, GameResult, GameSession, Intent, Phase,
    PlayerId, RulesError, SlotRef, SwapTarget,
};

fn names(count: usize) -> Vec<String> {
    ["Ada", "Grace", "Linus", "Barbara"][..count].iter().map(|n| n.to_string()).collect()
}

fn session() -> GameSession {
    let _ = env_logger::builder().is_test(true).try_init();
    GameSession::new(GameConfig::new().with_seed(2024)).unwrap()
}

/// Session with seat 1 holding `5339`, seat 2 `2c88`, deck continuing with `rest`.
fn scripted(rest: &str) -> GameSession {
    let mut session = session();
    let deck = Deck::from_cards(parse_cards(&format!("5339 2c88 {rest}")).unwrap());
    session.start_game_with_deck(&names(2), deck, PlayerId::new(0)).unwrap();
    session
}

fn active(session: &GameSession) -> PlayerId {
    session.game().unwrap().active_player()
}

fn phase(session: &GameSession) -> Phase {
    session.game().unwrap().phase()
}

fn reveal_all(session: &mut GameSession) {
    let players = session.game().unwrap().player_count();
    for _ in 0..players {
        let player = active(session);
        session.dispatch(Intent::SelectHandCard(SlotRef::new(player, 0))).unwrap();
        session.dispatch(Intent::SelectHandCard(SlotRef::new(player, 1))).unwrap();
        session.dispatch(Intent::ConfirmReveal).unwrap();
    }
}

fn swap_from_deck(session: &mut GameSession, slot: usize) {
    session.dispatch(Intent::ChooseDrawSource(DrawSource::Deck)).unwrap();
    session.dispatch(Intent::SelectSwapTarget(SwapTarget::Slot(slot))).unwrap();
    session.dispatch(Intent::ConfirmSwap).unwrap();
}

/// Reveal, then keep discarding until a stop unlocks, call it and finish.
fn play_quick_round(session: &mut GameSession) {
    reveal_all(session);
    while phase(session) != Phase::RoundOver {
        let view = session.presentation();
        let intent = match phase(session) {
            Phase::Draw if view.has_control(Control::Stop) => Intent::DeclareStop,
            Phase::Draw if view.deck_selectable => Intent::ChooseDrawSource(DrawSource::Deck),
            Phase::Draw => Intent::ChooseDrawSource(DrawSource::Discard),
            Phase::Swap => {
                let game = session.game().unwrap();
                if game.drawn.unwrap().source == DrawSource::Discard && game.swap_target.is_none() {
                    Intent::SelectSwapTarget(SwapTarget::Slot(0))
                } else {
                    Intent::ConfirmSwap
                }
            }
            Phase::Special => Intent::SkipSpecial,
            other => panic!("unexpected phase {other}"),
        };
        session.dispatch(intent).unwrap();
    }
}

// =============================================================================
// Round Flow
// =============================================================================

#[test]
fn test_start_game_deals_and_reveals() {
    let mut session = session();
    let events = session.dispatch(Intent::StartGame { names: names(3) }).unwrap();

    assert!(matches!(events[0], GameEvent::GameStarted { players: 3, .. }));
    let game = session.game().unwrap();
    assert_eq!(game.phase(), Phase::Reveal);
    assert!(game.hands.values().all(|hand| hand.len() == 4));
    assert_eq!(game.deck.len(), 66 - 12);
    assert!(game.discard.is_empty());
    assert_eq!(game.active_player(), game.round.starting_player);
}

#[test]
fn test_example_scenario() {
    let mut session = scripted("5");
    reveal_all(&mut session);

    swap_from_deck(&mut session, 1);

    let game = session.game().unwrap();
    assert_eq!(game.discard.top(), Some(cardstop::Card::Number(3)));
    assert_eq!(game.hands[PlayerId::new(0)].card(1), Some(cardstop::Card::Number(5)));
    assert_eq!(active(&session), PlayerId::new(1));
}

#[test]
fn test_wrong_phase_is_rejected_unchanged() {
    let mut session = scripted("5");
    let before = session.presentation();

    let err = session.dispatch(Intent::ChooseDrawSource(DrawSource::Deck)).unwrap_err();
    assert_eq!(
        err,
        RulesError::IllegalAction {
            intent: cardstop::IntentKind::ChooseDrawSource,
            phase: Phase::Reveal,
        }
    );
    assert_eq!(session.presentation(), before);
}

#[test]
fn test_stop_two_players() {
    let mut session = scripted("12345678");
    reveal_all(&mut session);

    for _ in 0..2 {
        swap_from_deck(&mut session, 0);
    }
    assert!(!session.presentation().has_control(Control::Stop));
    assert!(session.dispatch(Intent::DeclareStop).is_err());

    for _ in 0..2 {
        swap_from_deck(&mut session, 0);
    }
    assert!(session.presentation().has_control(Control::Stop));
    session.dispatch(Intent::DeclareStop).unwrap();
    assert_eq!(active(&session), PlayerId::new(1));
    assert!(!session.presentation().has_control(Control::Stop));

    swap_from_deck(&mut session, 2);
    assert_eq!(phase(&session), Phase::RoundOver);
    assert!(session.dispatch(Intent::ChooseDrawSource(DrawSource::Deck)).is_err());

    let game = session.game().unwrap();
    assert!(game.hands.values().all(|hand| hand.cards().all(|card| card.is_numeric())));
    assert_eq!(game.players[PlayerId::new(0)].round_scores.len(), 1);
}

#[test]
fn test_stop_three_players_gives_two_final_moves() {
    let mut session = session();
    session.dispatch(Intent::StartGame { names: names(3) }).unwrap();
    reveal_all(&mut session);

    // two full rotations unlock stop
    for _ in 0..6 {
        session.dispatch(Intent::ChooseDrawSource(DrawSource::Deck)).unwrap();
        session.dispatch(Intent::SelectSwapTarget(SwapTarget::Slot(3))).unwrap();
        session.dispatch(Intent::ConfirmSwap).unwrap();
    }
    let declarer = active(&session);
    session.dispatch(Intent::DeclareStop).unwrap();
    assert_eq!(session.game().unwrap().round.final_turns_remaining, 2);

    for _ in 0..2 {
        assert_eq!(phase(&session), Phase::Draw);
        assert_ne!(active(&session), declarer);
        session.dispatch(Intent::ChooseDrawSource(DrawSource::Deck)).unwrap();
        session.dispatch(Intent::SelectSwapTarget(SwapTarget::Slot(2))).unwrap();
        session.dispatch(Intent::ConfirmSwap).unwrap();
    }
    assert_eq!(phase(&session), Phase::RoundOver);
}

#[test]
fn test_scoring_replaces_special_cards() {
    let mut session = scripted("1234567");
    reveal_all(&mut session);
    for _ in 0..4 {
        swap_from_deck(&mut session, 0);
    }
    session.dispatch(Intent::DeclareStop).unwrap();

    session.dispatch(Intent::ChooseDrawSource(DrawSource::Deck)).unwrap();
    session.dispatch(Intent::SelectSwapTarget(SwapTarget::Slot(3))).unwrap();
    let events = session.dispatch(Intent::ConfirmSwap).unwrap();

    // seat 2 held `C` in slot 2; the next deck card (6) replaces it
    assert!(events.contains(&GameEvent::SlotReplaced {
        slot: SlotRef::new(PlayerId::new(1), 1),
        removed: cardstop::Card::BLIND_SWAP,
        replacement: cardstop::Card::Number(6),
    }));
    let game = session.game().unwrap();
    // seat 1: 3339, seat 2: 4 6 8 5
    assert_eq!(game.players[PlayerId::new(0)].total, 18);
    assert_eq!(game.players[PlayerId::new(1)].total, 23);
    assert_eq!(game.discard.top(), Some(cardstop::Card::BLIND_SWAP));
}

// =============================================================================
// Game Flow
// =============================================================================

#[test]
fn test_next_round_opened_by_final_mover() {
    let mut session = scripted("12345678");
    reveal_all(&mut session);

    // seat 1 opens; after five moves seat 2 calls stop and seat 1 moves last
    for _ in 0..5 {
        swap_from_deck(&mut session, 0);
    }
    assert_eq!(active(&session), PlayerId::new(1));
    session.dispatch(Intent::DeclareStop).unwrap();
    swap_from_deck(&mut session, 2);
    assert_eq!(phase(&session), Phase::RoundOver);

    session.dispatch(Intent::StartNextRound).unwrap();
    let game = session.game().unwrap();
    assert_eq!(game.round.number, 2);
    assert_eq!(game.round.starting_player, PlayerId::new(0));
    assert_eq!(game.active_player(), PlayerId::new(0));
}

#[test]
fn test_next_round_redeals() {
    let mut session = session();
    session.dispatch(Intent::StartGame { names: names(2) }).unwrap();
    let first_starter = session.game().unwrap().round.starting_player;
    play_quick_round(&mut session);

    session.dispatch(Intent::StartNextRound).unwrap();
    let game = session.game().unwrap();
    assert_eq!(game.round.number, 2);
    // the opener called stop, so the other seat moved last and opens now
    assert_eq!(game.round.starting_player, first_starter.next(2));
    assert_eq!(game.phase(), Phase::Reveal);
    assert_eq!(game.card_total(), 66);
    assert!(game.discard.is_empty());
    assert_eq!(game.players[PlayerId::new(0)].round_scores.len(), 1);
}

#[test]
fn test_full_game_reaches_game_over() {
    let mut session = session();
    session.dispatch(Intent::StartGame { names: names(2) }).unwrap();

    for round in 1..=6 {
        assert_eq!(session.game().unwrap().round.number, round);
        play_quick_round(&mut session);
        assert!(session.presentation().has_control(Control::NextRound));
        let events = session.dispatch(Intent::StartNextRound).unwrap();
        if round < 6 {
            assert!(matches!(events[0], GameEvent::RoundStarted { .. }));
        }
    }

    let game = session.game().unwrap();
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.round.number, 7);
    assert!(game.players.values().all(|record| record.round_scores.len() == 6));

    let totals: Vec<u32> = game.players.values().map(|record| record.total).collect();
    let expected = match totals[0].cmp(&totals[1]) {
        std::cmp::Ordering::Less => GameResult::Winner(PlayerId::new(0)),
        std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::new(1)),
        std::cmp::Ordering::Equal => GameResult::Draw,
    };
    assert_eq!(game.result, Some(expected));

    let view = session.presentation();
    assert_eq!(view.round, 6);
    assert_eq!(view.controls, vec![Control::Restart, Control::Exit]);
    assert!(session.dispatch(Intent::StartNextRound).is_err());

    session.dispatch(Intent::ExitToMenu).unwrap();
    assert_eq!(session.presentation().screen, Screen::Menu);
}

#[test]
fn test_starting_player_is_random_but_seeded() {
    let starters: Vec<PlayerId> = (0..20)
        .map(|seed| {
            let mut session = GameSession::new(GameConfig::new().with_seed(seed)).unwrap();
            session.dispatch(Intent::StartGame { names: names(4) }).unwrap();
            session.game().unwrap().round.starting_player
        })
        .collect();

    assert!(starters.iter().all(|p| p.index() < 4));
    assert!(starters.iter().any(|p| *p != starters[0]));

    let again: Vec<PlayerId> = (0..20)
        .map(|seed| {
            let mut session = GameSession::new(GameConfig::new().with_seed(seed)).unwrap();
            session.dispatch(Intent::StartGame { names: names(4) }).unwrap();
            session.game().unwrap().round.starting_player
        })
        .collect();
    assert_eq!(starters, again);
}
