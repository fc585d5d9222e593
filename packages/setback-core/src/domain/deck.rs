//! The 53-card deck and deterministic dealing.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::error;

use crate::domain::rules::{DEAL_PACKET, PLAYERS};
use crate::domain::state::{nth_from, next_player, PlayerId};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

pub const DECK_SIZE: usize = 53;

/// Full 53-card deck in standard order (suits C<D<H<S, ranks 2..A, joker last).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }
    deck.push(Card::Joker);
    deck
}

/// Ordered deck; the top card is at index 0.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Full, shuffled deck.
    pub fn new(seed: u64) -> Self {
        let mut deck = Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.shuffle();
        deck
    }

    /// Full deck in standard order; nothing is shuffled.
    pub fn unshuffled(seed: u64) -> Self {
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Uniform Fisher-Yates permutation of the remaining cards.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Remove up to `n` cards from the top. Returns fewer when exhausted.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        let take = n.min(self.cards.len());
        self.cards.drain(..take).collect()
    }

    /// Restore all 53 cards and reshuffle.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.shuffle();
    }

    /// Replace the RNG stream (used once per hand for reproducible deals).
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Deal `hand_size` cards to each seat in packets of three, starting left of
/// the dealer. Hands are sorted for convenience.
pub fn deal_hands(
    deck: &mut Deck,
    dealer: PlayerId,
    hand_size: usize,
) -> Result<[Vec<Card>; PLAYERS], DomainError> {
    let needed = hand_size * PLAYERS;
    if deck.remaining() < needed {
        error!(
            remaining = deck.remaining(),
            needed, "Deck cannot cover a full deal"
        );
        return Err(DomainError::invariant(format!(
            "Deck has {} cards, deal needs {needed}",
            deck.remaining()
        )));
    }

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    let first = next_player(dealer);
    let mut dealt = 0;
    while dealt < hand_size {
        let packet = DEAL_PACKET.min(hand_size - dealt);
        for offset in 0..PLAYERS as u8 {
            let seat = nth_from(first, offset);
            let cards = deck.deal(packet);
            if cards.len() != packet {
                return Err(DomainError::invariant("Deck exhausted mid-deal"));
            }
            hands[seat as usize].extend(cards);
        }
        dealt += packet;
    }

    for hand in hands.iter_mut() {
        hand.sort();
    }
    Ok(hands)
}
