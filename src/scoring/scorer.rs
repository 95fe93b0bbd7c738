use crate::core::{GameState, PlayerId, PlayerMap, PlayerRecord, RulesError, SlotRef};
use crate::events::{EventQueue, GameEvent};
use crate::rules::GameResult;
use crate::zones::{Hand, Visibility};

/// Sum of the numeric cards in a hand.
#[must_use]
pub fn hand_score(hand: &Hand) -> u32 {
    hand.cards().filter_map(|card| card.score_value()).sum()
}

/// Turn every hand face up, replace special cards and add the round to each
/// player's total.
///
/// Returns the round score of every seat in seat order. Running out of
/// deck while replacing is `DeckExhausted`; the round can't be scored then
/// and no total changes.
pub fn score_round(state: &mut GameState, events: &mut EventQueue) -> Result<Vec<(PlayerId, u32)>, RulesError> {
    let mut revealed = Vec::new();

    for player in PlayerId::all(state.player_count()) {
        for index in 0..state.hands[player].len() {
            state.hands[player].set_visibility(index, Visibility::RevealedPermanently);

            while let Some(current) = state.hands[player].card(index).filter(|card| !card.is_numeric()) {
                let replacement = state.deck.draw()?;
                state.hands[player].set_card(index, replacement);
                state.discard.push(current);
                revealed.push(GameEvent::SlotReplaced {
                    slot: SlotRef::new(player, index),
                    removed: current,
                    replacement,
                });
            }
        }
        revealed.push(GameEvent::HandRevealed { player });
    }

    // every hand resolved, totals can move now
    events.extend(revealed);
    let mut scores = Vec::with_capacity(state.player_count());
    for player in PlayerId::all(state.player_count()) {
        let score = hand_score(&state.hands[player]);
        let record = &mut state.players[player];
        record.total += score;
        record.round_scores.push(score);
        scores.push((player, score));
    }

    log::info!("round {} scored: {:?}", state.round.number, scores);
    events.push(GameEvent::RoundScored {
        round: state.round.number,
        scores: scores.clone(),
    });
    Ok(scores)
}

/// Lowest total wins. A shared lowest total is a shared win, unless every
/// player shares it.
#[must_use]
pub fn final_result(players: &PlayerMap<PlayerRecord>) -> GameResult {
    let Some(best) = players.values().map(|record| record.total).min() else {
        return GameResult::Draw;
    };
    let leaders: Vec<PlayerId> = players
        .iter()
        .filter(|(_, record)| record.total == best)
        .map(|(player, _)| player)
        .collect();

    match leaders.as_slice() {
        [winner] => GameResult::Winner(*winner),
        _ if leaders.len() == players.player_count() => GameResult::Draw,
        _ => GameResult::Winners(leaders),
    }
}
