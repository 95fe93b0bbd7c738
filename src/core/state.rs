//! Game state: everything one game of the table holds between intents.
//!
//! ## RoundState
//!
//! Phase, whose move it is and the counters that decide when Stop unlocks
//! and when the round ends.
//!
//! ## GameState
//!
//! Round state plus the card locations (deck, hands, discard pile), the
//! player records that survive across rounds, the in-progress selection and
//! drawn card, the special-card resolver state and the intent history.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{DrawSource, IntentRecord, SlotRef, SwapTarget};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, Deck, DeckComposition};
use crate::events::GameEvent;
use crate::rules::GameResult;
use crate::special::SpecialCardState;
use crate::zones::{DiscardPile, Hand};

/// Where a round currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players look at their own cards, one seat at a time.
    Reveal,
    /// Active player picks a source or declares Stop.
    Draw,
    /// Active player places the drawn card.
    Swap,
    /// A special card was discarded and may be used.
    Special,
    RoundOver,
    GameOver,
}

impl Phase {
    /// No further moves this round.
    #[must_use]
    pub fn is_round_finished(self) -> bool {
        matches!(self, Phase::RoundOver | Phase::GameOver)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Reveal => "reveal",
            Phase::Draw => "draw",
            Phase::Swap => "swap",
            Phase::Special => "special card",
            Phase::RoundOver => "round over",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// Name and score history of one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    /// Sum of every scored round.
    pub total: u32,
    pub round_scores: Vec<u32>,
}

impl PlayerRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total: 0,
            round_scores: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// 1-based.
    pub number: u8,
    pub phase: Phase,
    pub active_player: PlayerId,
    pub starting_player: PlayerId,
    /// Moves since the last full rotation.
    pub move_counter: usize,
    /// Full rotations completed this round.
    pub turn_counter: u32,
    /// Seats that finished their reveal.
    pub reveals_done: usize,
    pub stop_declared: bool,
    pub stop_declarer: Option<PlayerId>,
    /// Moves left before scoring once Stop was declared.
    pub final_turns_remaining: usize,
}

impl RoundState {
    #[must_use]
    pub fn new(number: u8, starting_player: PlayerId) -> Self {
        Self {
            number,
            phase: Phase::Reveal,
            active_player: starting_player,
            starting_player,
            move_counter: 0,
            turn_counter: 0,
            reveals_done: 0,
            stop_declared: false,
            stop_declarer: None,
            final_turns_remaining: 0,
        }
    }
}

/// The card offered to the active player this move.
///
/// It stays on top of its source until the swap commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    pub source: DrawSource,
    pub card: Card,
}

/// Full state of one game.
///
/// Cloning is cheap enough for random playouts: the history is an
/// `im::Vector` and everything else is small.
#[derive(Clone, Debug)]
pub struct GameState {
    pub players: PlayerMap<PlayerRecord>,
    pub round: RoundState,

    /// Composition every round is built from.
    pub composition: DeckComposition,
    pub deck: Deck,
    pub hands: PlayerMap<Hand>,
    pub discard: DiscardPile,

    /// Slots picked for a reveal, peek or blind swap.
    pub selection: SmallVec<[SlotRef; 4]>,
    pub swap_target: Option<SwapTarget>,
    pub drawn: Option<DrawnCard>,

    pub special: SpecialCardState,
    /// Set by a straight discard of a fresh deck card in a normal turn.
    pub allow_special: bool,

    pub history: Vector<IntentRecord>,
    pub result: Option<GameResult>,

    pub rng: GameRng,
    sequence: u32,
}

impl GameState {
    /// Seat the players. No round is dealt yet.
    #[must_use]
    pub fn new(names: Vec<String>, composition: DeckComposition, rng: GameRng) -> Self {
        let players = PlayerMap::from_vec(names.into_iter().map(PlayerRecord::new).collect());
        let player_count = players.player_count();
        Self {
            players,
            round: RoundState::new(1, PlayerId::new(0)),
            composition,
            deck: Deck::default(),
            hands: PlayerMap::new(player_count, |_| Hand::default()),
            discard: DiscardPile::new(),
            selection: SmallVec::new(),
            swap_target: None,
            drawn: None,
            special: SpecialCardState::default(),
            allow_special: false,
            history: Vector::new(),
            result: None,
            rng,
            sequence: 0,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.round.active_player
    }

    #[must_use]
    pub fn card_at(&self, slot: SlotRef) -> Option<Card> {
        self.hands.get(slot.player)?.card(slot.slot)
    }

    /// Cards currently in the deck, every hand and the discard pile.
    #[must_use]
    pub fn card_total(&self) -> usize {
        self.deck.len() + self.hands.values().map(Hand::len).sum::<usize>() + self.discard.len()
    }

    /// Whether the active player may declare Stop right now.
    #[must_use]
    pub fn can_declare_stop(&self, stop_after_turns: u32) -> bool {
        self.round.phase == Phase::Draw
            && !self.round.stop_declared
            && self.round.turn_counter > stop_after_turns
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drop everything tied to the move in progress.
    pub fn clear_move(&mut self) {
        self.selection.clear();
        self.swap_target = None;
        self.drawn = None;
    }

    /// Flip every temporary reveal back face down.
    pub fn conceal_temporary(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for player in PlayerId::all(self.player_count()) {
            let slots = self.hands[player].conceal_temporary();
            if !slots.is_empty() {
                events.push(GameEvent::CardsConcealed {
                    slots: slots.into_iter().map(|slot| SlotRef::new(player, slot)).collect(),
                });
            }
        }
        events
    }

    /// Append an applied intent to the history, stamped with the round and
    /// turn it was raised in.
    pub fn record(&mut self, player: PlayerId, round: u8, turn: u32, intent: super::action::Intent) {
        let record = IntentRecord {
            player,
            intent,
            round,
            turn,
            sequence: self.sequence,
        };
        self.sequence += 1;
        self.history.push_back(record);
    }
}
