//! Card values.
//!
//! A card is either a number `0..=9`, which counts towards the round score,
//! or one of three special cards that carry an effect when freshly
//! discarded:
//!
//! | Symbol | Effect |
//! |--------|--------|
//! | `A` | draw up to two extra cards |
//! | `B` | look at any one card on the table |
//! | `C` | trade two cards between two players without looking |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Effect carried by a special card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecialKind {
    /// `A`: repeat draw-and-swap-or-discard.
    ExtraDraw,
    /// `B`: temporarily reveal one slot of any player.
    Peek,
    /// `C`: exchange two slots of two different players sight-unseen.
    BlindSwap,
}

impl SpecialKind {
    pub const ALL: [SpecialKind; 3] = [SpecialKind::ExtraDraw, SpecialKind::Peek, SpecialKind::BlindSwap];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            SpecialKind::ExtraDraw => 'A',
            SpecialKind::Peek => 'B',
            SpecialKind::BlindSwap => 'C',
        }
    }
}

impl std::fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpecialKind::ExtraDraw => "extra draw",
            SpecialKind::Peek => "peek",
            SpecialKind::BlindSwap => "blind swap",
        };
        write!(f, "{} ({})", self.symbol(), name)
    }
}

/// A single card value. Cards carry no identity beyond their value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Card {
    Number(u8),
    Special(SpecialKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("'{0}' is not a card symbol")]
    UnknownSymbol(String),
}

impl Card {
    pub const EXTRA_DRAW: Card = Card::Special(SpecialKind::ExtraDraw);
    pub const PEEK: Card = Card::Special(SpecialKind::Peek);
    pub const BLIND_SWAP: Card = Card::Special(SpecialKind::BlindSwap);

    /// Numeric card, `None` above 9.
    #[must_use]
    pub const fn number(value: u8) -> Option<Card> {
        if value <= 9 {
            Some(Card::Number(value))
        } else {
            None
        }
    }

    /// Points this card is worth when scored, `None` for special cards.
    #[must_use]
    pub const fn score_value(self) -> Option<u32> {
        match self {
            Card::Number(value) => Some(value as u32),
            Card::Special(_) => None,
        }
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Card::Number(_))
    }

    #[must_use]
    pub const fn special(self) -> Option<SpecialKind> {
        match self {
            Card::Special(kind) => Some(kind),
            Card::Number(_) => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Card::Number(value) => (b'0' + value) as char,
            Card::Special(kind) => kind.symbol(),
        }
    }

    /// Parse a symbol, case-insensitive for the special cards.
    pub fn from_symbol(symbol: char) -> Result<Card, CardParseError> {
        match symbol {
            '0'..='9' => Ok(Card::Number(symbol as u8 - b'0')),
            'a' | 'A' => Ok(Card::EXTRA_DRAW),
            'b' | 'B' => Ok(Card::PEEK),
            'c' | 'C' => Ok(Card::BLIND_SWAP),
            other => Err(CardParseError::UnknownSymbol(other.to_string())),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Card::from_symbol(symbol),
            _ => Err(CardParseError::UnknownSymbol(s.to_string())),
        }
    }
}

/// Parse a compact card string such as `"53a9"` into cards, front first.
///
/// ```
/// use cardstop::cards::{parse_cards, Card};
///
/// let cards = parse_cards("5c").unwrap();
/// assert_eq!(cards, vec![Card::Number(5), Card::BLIND_SWAP]);
/// ```
pub fn parse_cards(symbols: &str) -> Result<Vec<Card>, CardParseError> {
    symbols
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(Card::from_symbol)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_values() {
        assert_eq!(Card::Number(0).score_value(), Some(0));
        assert_eq!(Card::Number(9).score_value(), Some(9));
        for kind in SpecialKind::ALL {
            assert_eq!(Card::Special(kind).score_value(), None);
            assert!(!Card::Special(kind).is_numeric());
        }
    }

    #[test]
    fn test_number_bounds() {
        assert_eq!(Card::number(9), Some(Card::Number(9)));
        assert_eq!(Card::number(10), None);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Card::Number(7).to_string(), "7");
        assert_eq!(Card::EXTRA_DRAW.to_string(), "A");
        assert_eq!("b".parse::<Card>(), Ok(Card::PEEK));
        assert_eq!(" C ".parse::<Card>(), Ok(Card::BLIND_SWAP));
        assert!("x".parse::<Card>().is_err());
        assert!("12".parse::<Card>().is_err());
    }

    #[test]
    fn test_parse_cards_skips_whitespace() {
        let cards = parse_cards("1 2 a").unwrap();
        assert_eq!(cards, vec![Card::Number(1), Card::Number(2), Card::EXTRA_DRAW]);
        assert!(parse_cards("1z").is_err());
    }

    #[test]
    fn test_special_kind_display() {
        assert_eq!(SpecialKind::Peek.to_string(), "B (peek)");
    }

    #[test]
    fn test_card_serde() {
        let card = Card::Number(4);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(serde_json::from_str::<Card>(&json).unwrap(), card);
    }
}
