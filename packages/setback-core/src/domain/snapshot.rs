//! Owned, read-only views of the engine state for UI and AI callers.

use serde::Serialize;

use crate::domain::bidding::Bid;
use crate::domain::rules::{PARTNERSHIPS, PLAYERS};
use crate::domain::scoring::HandScoreResult;
use crate::domain::state::{
    BiddingStatus, GameState, PartnershipId, Phase, Player, PlayerId, Seat, Trick,
};
use crate::domain::{Card, Suit};

/// One seat, including its private hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub is_human: bool,
    pub seat: Seat,
    pub partnership: PartnershipId,
    pub is_dealer: bool,
    pub hand: Vec<Card>,
}

impl From<&Player> for PlayerSnapshot {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            is_human: p.is_human,
            seat: p.seat,
            partnership: p.partnership(),
            is_dealer: p.is_dealer,
            hand: p.hand.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartnershipSnapshot {
    pub id: PartnershipId,
    pub members: [PlayerId; 2],
    pub score: i16,
}

/// Facts about the hand in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HandSnapshot {
    pub hand_no: u32,
    pub dealer: PlayerId,
    pub bidding: BiddingStatus,
    pub bids: Vec<Bid>,
    pub declarer: Option<PlayerId>,
    pub winning_bid: Option<u8>,
    pub trump: Option<Suit>,
    pub current_trick: Trick,
    pub tricks_completed: usize,
    pub undealt: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub turn: Option<PlayerId>,
    pub target_score: i16,
    pub players: [PlayerSnapshot; PLAYERS],
    pub partnerships: [PartnershipSnapshot; PARTNERSHIPS],
    pub hand: HandSnapshot,
    /// Most recent completed trick, kept across the hand boundary.
    pub last_trick: Option<Trick>,
    pub previous_hand: Option<HandScoreResult>,
    pub winner: Option<PartnershipId>,
}

impl GameSnapshot {
    pub fn scores(&self) -> [i16; PARTNERSHIPS] {
        [self.partnerships[0].score, self.partnerships[1].score]
    }
}

/// Produce an owned snapshot of `state`.
pub fn snapshot(state: &GameState) -> GameSnapshot {
    let h = &state.hand;
    GameSnapshot {
        phase: state.phase,
        turn: state.turn,
        target_score: state.target_score,
        players: state.players.each_ref().map(PlayerSnapshot::from),
        partnerships: state.partnerships.each_ref().map(|p| PartnershipSnapshot {
            id: p.id,
            members: p.members,
            score: p.score,
        }),
        hand: HandSnapshot {
            hand_no: h.hand_no,
            dealer: h.dealer,
            bidding: h.bidding,
            bids: h.bids.clone(),
            declarer: h.declarer,
            winning_bid: h.winning_bid,
            trump: h.trump,
            current_trick: h.current_trick.clone(),
            tricks_completed: h.completed_tricks.len(),
            undealt: h.undealt,
        },
        last_trick: state.last_trick.clone(),
        previous_hand: state.previous_hand.clone(),
        winner: state.winner,
    }
}
