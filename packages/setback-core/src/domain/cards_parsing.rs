//! Card parsing and identity.
//!
//! Two textual forms exist:
//! - compact tokens such as `"AS"`, `"2C"`, `"TD"` and `"JK"` for the joker
//!   (used by serde and fixtures);
//! - stable ids `"<suit>_<rank>"` such as `"hearts_14"`, or `"joker"`
//!   (used by presentation layers when submitting plays).

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

pub const JOKER_ID: &str = "joker";
pub const JOKER_TOKEN: &str = "JK";

fn rank_char(rank: Rank) -> char {
    match rank {
        Rank::Two => '2',
        Rank::Three => '3',
        Rank::Four => '4',
        Rank::Five => '5',
        Rank::Six => '6',
        Rank::Seven => '7',
        Rank::Eight => '8',
        Rank::Nine => '9',
        Rank::Ten => 'T',
        Rank::Jack => 'J',
        Rank::Queen => 'Q',
        Rank::King => 'K',
        Rank::Ace => 'A',
    }
}

fn suit_char(suit: Suit) -> char {
    match suit {
        Suit::Clubs => 'C',
        Suit::Diamonds => 'D',
        Suit::Hearts => 'H',
        Suit::Spades => 'S',
    }
}

fn parse_suit_name(s: &str) -> Option<Suit> {
    Suit::ALL.iter().copied().find(|suit| suit.name() == s)
}

impl Card {
    /// Stable id, unique within a 53-card deck.
    pub fn id(self) -> String {
        match self {
            Card::Suited { suit, rank } => format!("{}_{}", suit.name(), rank.value()),
            Card::Joker => JOKER_ID.to_string(),
        }
    }

    /// Inverse of [`Card::id`].
    pub fn from_id(id: &str) -> Result<Card, DomainError> {
        if id == JOKER_ID {
            return Ok(Card::Joker);
        }
        let bad = || DomainError::validation(ValidationKind::ParseCard, format!("Unknown card id: {id}"));
        let (suit_str, rank_str) = id.split_once('_').ok_or_else(bad)?;
        let suit = parse_suit_name(suit_str).ok_or_else(bad)?;
        let rank = rank_str
            .parse::<u8>()
            .ok()
            .and_then(Rank::from_value)
            .ok_or_else(bad)?;
        Ok(Card::new(suit, rank))
    }

    /// Compact two-character token.
    pub fn token(self) -> String {
        match self {
            Card::Suited { suit, rank } => format!("{}{}", rank_char(rank), suit_char(suit)),
            Card::Joker => JOKER_TOKEN.to_string(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"));
        if s == JOKER_TOKEN {
            return Ok(Card::Joker);
        }
        let mut chars = s.chars();
        let (Some(rank_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(bad());
        };
        let rank = Rank::ALL
            .iter()
            .copied()
            .find(|&r| rank_char(r) == rank_ch)
            .ok_or_else(bad)?;
        let suit = Suit::ALL
            .iter()
            .copied()
            .find(|&suit| suit_char(suit) == suit_ch)
            .ok_or_else(bad)?;
        Ok(Card::new(suit, rank))
    }
}

/// Non-panicking helper to parse card tokens (e.g., "AS", "2C", "JK").
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
