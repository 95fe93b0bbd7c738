use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, SpecialKind};
use crate::core::{DrawSource, PlayerId, SlotRef, SwapTarget};
use crate::rules::GameResult;

/// Something that happened at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted {
        players: usize,
        starting_player: PlayerId,
    },
    RoundStarted {
        round: u8,
        starting_player: PlayerId,
    },
    CardsDealt {
        hand_size: usize,
        deck_remaining: usize,
    },
    SelectionChanged {
        selection: Vec<SlotRef>,
    },
    /// Own cards flipped for the reveal phase. Values are for the
    /// revealing player only.
    CardsRevealed {
        player: PlayerId,
        slots: Vec<usize>,
        cards: Vec<Card>,
    },
    CardsConcealed {
        slots: Vec<SlotRef>,
    },
    TurnStarted {
        player: PlayerId,
        turn: u32,
    },
    SourceChosen {
        player: PlayerId,
        source: DrawSource,
        card: Card,
    },
    SwapTargetSelected {
        player: PlayerId,
        target: SwapTarget,
    },
    /// The drawn card went into a slot and the old card onto the pile.
    CardSwapped {
        slot: SlotRef,
        placed: Card,
        discarded: Card,
    },
    /// The drawn card went straight onto the pile.
    CardDiscarded {
        player: PlayerId,
        card: Card,
    },
    SpecialOffered {
        player: PlayerId,
        kind: SpecialKind,
    },
    SpecialInvoked {
        player: PlayerId,
        kind: SpecialKind,
    },
    SpecialSkipped {
        player: PlayerId,
        kind: SpecialKind,
    },
    SpecialResolved {
        player: PlayerId,
        kind: SpecialKind,
    },
    CardPeeked {
        player: PlayerId,
        slot: SlotRef,
        card: Card,
    },
    /// Values stay secret.
    CardsSwappedBlind {
        player: PlayerId,
        first: SlotRef,
        second: SlotRef,
    },
    StopDeclared {
        player: PlayerId,
    },
    /// Every slot of a hand turned face up for scoring.
    HandRevealed {
        player: PlayerId,
    },
    /// A special card was replaced from the deck during scoring.
    SlotReplaced {
        slot: SlotRef,
        removed: Card,
        replacement: Card,
    },
    RoundScored {
        round: u8,
        scores: Vec<(PlayerId, u32)>,
    },
    GameOver {
        result: GameResult,
    },
    ReturnedToMenu,
}

impl GameEvent {
    /// Events the View animates before play may continue.
    #[must_use]
    pub fn needs_presentation(&self) -> bool {
        matches!(
            self,
            GameEvent::CardsRevealed { .. }
                | GameEvent::CardSwapped { .. }
                | GameEvent::CardDiscarded { .. }
                | GameEvent::CardPeeked { .. }
                | GameEvent::CardsSwappedBlind { .. }
                | GameEvent::HandRevealed { .. }
                | GameEvent::SlotReplaced { .. }
        )
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameStarted { players, starting_player } => {
                write!(f, "game started with {players} players, {starting_player} opens")
            }
            Self::RoundStarted { round, starting_player } => {
                write!(f, "round {round} started, {starting_player} opens")
            }
            Self::CardsDealt { hand_size, deck_remaining } => {
                write!(f, "dealt {hand_size} cards each, {deck_remaining} left in the deck")
            }
            Self::SelectionChanged { selection } => write!(f, "{} card(s) selected", selection.len()),
            Self::CardsRevealed { player, slots, .. } => {
                write!(f, "{player} looked at {} card(s)", slots.len())
            }
            Self::CardsConcealed { slots } => write!(f, "{} card(s) turned face down", slots.len()),
            Self::TurnStarted { player, turn } => write!(f, "{player} to move (turn {turn})"),
            Self::SourceChosen { player, source, .. } => match source {
                DrawSource::Deck => write!(f, "{player} drew from the deck"),
                DrawSource::Discard => write!(f, "{player} took the discard"),
            },
            Self::SwapTargetSelected { player, target } => match target {
                SwapTarget::Slot(slot) => write!(f, "{player} aims at slot {}", slot + 1),
                SwapTarget::Discard => write!(f, "{player} aims at the discard pile"),
            },
            Self::CardSwapped { slot, discarded, .. } => {
                write!(f, "{slot} swapped, {discarded} discarded")
            }
            Self::CardDiscarded { player, card } => write!(f, "{player} discarded {card}"),
            Self::SpecialOffered { player, kind } => write!(f, "{player} may use {kind}"),
            Self::SpecialInvoked { player, kind } => write!(f, "{player} used {kind}"),
            Self::SpecialSkipped { player, kind } => write!(f, "{player} skipped {kind}"),
            Self::SpecialResolved { player, kind } => write!(f, "{player} finished {kind}"),
            Self::CardPeeked { player, slot, .. } => write!(f, "{player} peeked at {slot}"),
            Self::CardsSwappedBlind { player, first, second } => {
                write!(f, "{player} swapped {first} with {second} blind")
            }
            Self::StopDeclared { player } => write!(f, "{player} called stop"),
            Self::HandRevealed { player } => write!(f, "{player} turned their hand face up"),
            Self::SlotReplaced { slot, removed, replacement } => {
                write!(f, "{slot}: {removed} replaced by {replacement}")
            }
            Self::RoundScored { round, scores } => {
                write!(f, "round {round} scored:")?;
                for (player, score) in scores {
                    write!(f, " {player}={score}")?;
                }
                Ok(())
            }
            Self::GameOver { result } => write!(f, "game over, {result}"),
            Self::ReturnedToMenu => f.write_str("back to menu"),
        }
    }
}
