//! Bidding: turn order, bid legality and the dealer-forced bid.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{valid_bid_range, MIN_BID, PLAYERS};
use crate::domain::state::{
    expected_bidder, next_player, require_turn, BiddingStatus, GameState, HandState, Phase,
    PlayerId, Trick,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// One bid record; `amount: None` is a pass.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub player: PlayerId,
    pub amount: Option<u8>,
}

impl Bid {
    pub fn pass(player: PlayerId) -> Self {
        Self {
            player,
            amount: None,
        }
    }

    pub fn of(player: PlayerId, amount: u8) -> Self {
        Self {
            player,
            amount: Some(amount),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.amount.is_none()
    }
}

/// Result of placing a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidOutcome {
    pub bid: Bid,
    /// Winning bid, set when this bid closed the auction.
    pub final_bid: Option<Bid>,
}

/// Highest non-pass bid so far. Amounts strictly increase, so it is unique.
pub fn high_bid(hand: &HandState) -> Option<Bid> {
    hand.bids
        .iter()
        .copied()
        .filter(|b| !b.is_pass())
        .max_by_key(|b| b.amount)
}

/// The dealer is last to bid and everyone before them passed.
pub fn dealer_is_forced(state: &GameState, who: PlayerId) -> bool {
    who == state.hand.dealer
        && state.hand.bids.len() == PLAYERS - 1
        && state.hand.bids.iter().all(Bid::is_pass)
}

/// Legal bid choices for `who` right now (`None` = pass). Empty when it is not
/// their turn or bidding is not in progress.
pub fn legal_bids(state: &GameState, who: PlayerId) -> Vec<Option<u8>> {
    if state.phase != Phase::Bidding || state.turn != Some(who) {
        return Vec::new();
    }
    let floor = high_bid(&state.hand)
        .and_then(|b| b.amount)
        .map_or(MIN_BID, |high| high + 1);
    let mut out = Vec::new();
    if !dealer_is_forced(state, who) {
        out.push(None);
    }
    out.extend(valid_bid_range().filter(|&a| a >= floor).map(Some));
    out
}

/// Check a bid without mutating anything.
pub fn validate_bid(state: &GameState, who: PlayerId, amount: Option<u8>) -> Result<(), DomainError> {
    match state.phase {
        Phase::Bidding => {}
        Phase::GameOver => {
            return Err(DomainError::validation(
                ValidationKind::GameOver,
                "Game is over",
            ))
        }
        _ => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Not in bidding phase",
            ))
        }
    }

    if who as usize >= PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::UnknownPlayer,
            format!("Unknown player {who}"),
        ));
    }

    let turn = require_turn(state, "validate_bid")?;
    let expected = expected_bidder(state.hand.dealer, state.hand.bids.len() as u8);
    if turn != expected {
        return Err(DomainError::invariant(format!(
            "turn {turn} disagrees with bidding order (expected {expected})"
        )));
    }
    if who != turn {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Not your turn to bid. Expected player {turn}, got player {who}"),
        ));
    }

    match amount {
        None if dealer_is_forced(state, who) => Err(DomainError::validation(
            ValidationKind::DealerMustBid,
            format!("Dealer cannot pass after three passes; bid at least {MIN_BID}"),
        )),
        None => Ok(()),
        Some(a) => {
            let range = valid_bid_range();
            if !range.contains(&a) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBid,
                    format!("Bid must be in range {range:?}"),
                ));
            }
            if let Some(high) = high_bid(&state.hand).and_then(|b| b.amount) {
                if a <= high {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidBid,
                        format!("Bid must exceed current high bid of {high}"),
                    ));
                }
            }
            Ok(())
        }
    }
}

/// Record a bid. After the fourth bid the auction closes: the high bidder
/// becomes declarer, play begins and the declarer is to lead.
pub fn place_bid(
    state: &mut GameState,
    who: PlayerId,
    amount: Option<u8>,
) -> Result<BidOutcome, DomainError> {
    validate_bid(state, who, amount)?;

    let bid = Bid {
        player: who,
        amount,
    };
    let closes = state.hand.bids.len() + 1 == PLAYERS;

    if !closes {
        state.hand.bids.push(bid);
        state.hand.bidding = BiddingStatus::Bidding;
        state.turn = Some(next_player(who));
        return Ok(BidOutcome {
            bid,
            final_bid: None,
        });
    }

    // Resolve the winner before mutating so a failure leaves state untouched.
    let mut all_bids = state.hand.bids.clone();
    all_bids.push(bid);
    let winner = all_bids
        .iter()
        .copied()
        .filter(|b| !b.is_pass())
        .max_by_key(|b| b.amount);
    let (Some(final_bid), Some(amount)) = (winner, winner.and_then(|b| b.amount)) else {
        return Err(DomainError::invariant(
            "all four players passed despite the dealer-forced bid",
        ));
    };

    state.hand.bids = all_bids;
    state.hand.bidding = BiddingStatus::BidEstablished;
    state.hand.declarer = Some(final_bid.player);
    state.hand.winning_bid = Some(amount);
    state.hand.current_trick = Trick::default();
    state.phase = Phase::Playing { trick_no: 1 };
    state.turn = Some(final_bid.player);

    Ok(BidOutcome {
        bid,
        final_bid: Some(final_bid),
    })
}
