//! Card game logic: point values, trump classification, trump ordering and
//! trick comparisons.

use std::cmp::Ordering;

use super::cards_types::{Card, Rank, Suit};

/// Position of a card inside the trump group for a given trump suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TrumpRank {
    /// A trump-suit card other than the jack, ranked by number.
    Plain(Rank),
    OffJack,
    JackOfTrump,
    Joker,
}

/// Canonical trump order, lowest capture priority first.
///
/// Used for trick resolution. Reorder here and nowhere else.
pub const TRUMP_ORDER: [TrumpRank; 15] = [
    TrumpRank::Plain(Rank::Two),
    TrumpRank::Plain(Rank::Three),
    TrumpRank::Plain(Rank::Four),
    TrumpRank::Plain(Rank::Five),
    TrumpRank::Plain(Rank::Six),
    TrumpRank::Plain(Rank::Seven),
    TrumpRank::Plain(Rank::Eight),
    TrumpRank::Plain(Rank::Nine),
    TrumpRank::Plain(Rank::Ten),
    TrumpRank::Plain(Rank::Queen),
    TrumpRank::Plain(Rank::King),
    TrumpRank::Plain(Rank::Ace),
    TrumpRank::OffJack,
    TrumpRank::JackOfTrump,
    TrumpRank::Joker,
];

impl Card {
    /// Game-point value: J=1, Q=2, K=3, A=4, 10=10, everything else 0.
    pub const fn point_value(self) -> u8 {
        match self.rank() {
            Some(Rank::Jack) => 1,
            Some(Rank::Queen) => 2,
            Some(Rank::King) => 3,
            Some(Rank::Ace) => 4,
            Some(Rank::Ten) => 10,
            _ => 0,
        }
    }

    /// Trump-suit cards and the joker. The off-jack is not included here;
    /// see [`Card::plays_as_trump`].
    pub fn is_trump(self, trump: Suit) -> bool {
        match self {
            Card::Joker => true,
            Card::Suited { suit, .. } => suit == trump,
        }
    }

    /// Jack of the same-color suit, never the jack of trump itself.
    pub fn is_off_jack(self, trump: Suit) -> bool {
        matches!(
            self,
            Card::Suited { suit, rank: Rank::Jack } if suit != trump && suit.color() == trump.color()
        )
    }

    pub fn is_jack_of_trump(self, trump: Suit) -> bool {
        self == Card::new(trump, Rank::Jack)
    }

    /// Trump for trick purposes: trump suit, joker, or the off-jack.
    pub fn plays_as_trump(self, trump: Suit) -> bool {
        self.is_trump(trump) || self.is_off_jack(trump)
    }

    pub fn trump_rank(self, trump: Suit) -> Option<TrumpRank> {
        match self {
            Card::Joker => Some(TrumpRank::Joker),
            c if c.is_jack_of_trump(trump) => Some(TrumpRank::JackOfTrump),
            c if c.is_off_jack(trump) => Some(TrumpRank::OffJack),
            Card::Suited { suit, rank } if suit == trump => Some(TrumpRank::Plain(rank)),
            Card::Suited { .. } => None,
        }
    }

    /// Index into [`TRUMP_ORDER`]; `None` for non-trump cards.
    pub fn trump_strength(self, trump: Suit) -> Option<usize> {
        let tr = self.trump_rank(trump)?;
        TRUMP_ORDER.iter().position(|&r| r == tr)
    }

    /// Trump beats non-trump unconditionally; within trump the canonical
    /// order decides. Two non-trump cards compare by natural rank only.
    pub fn compare_for_trump(self, other: Card, trump: Suit) -> Ordering {
        match (self.trump_strength(trump), other.trump_strength(trump)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => self.rank().cmp(&other.rank()),
        }
    }
}

/// The lead suit of a trick given its first card.
///
/// Anything that plays as trump (including the off-jack and the joker) leads
/// the trump suit.
pub fn lead_suit_for(first: Card, trump: Suit) -> Suit {
    match first {
        c if c.plays_as_trump(trump) => trump,
        Card::Suited { suit, .. } => suit,
        Card::Joker => trump,
    }
}

/// Strength of a card within one trick; `None` means it cannot win.
fn trick_strength(card: Card, lead: Suit, trump: Suit) -> Option<(u8, usize)> {
    if let Some(s) = card.trump_strength(trump) {
        return Some((2, s));
    }
    match card {
        Card::Suited { suit, rank } if suit == lead => Some((1, rank.value() as usize)),
        _ => None,
    }
}

/// True if `a` beats `b` in a trick with the given lead and trump.
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Suit) -> bool {
    trick_strength(a, lead, trump) > trick_strength(b, lead, trump)
}

/// Any card of `suit`, excluding an off-jack that belongs to trump.
pub fn hand_has_suit(hand: &[Card], suit: Suit, trump: Option<Suit>) -> bool {
    hand.iter()
        .any(|&c| c.is_suit(suit) && !trump.is_some_and(|t| c.is_off_jack(t)))
}
