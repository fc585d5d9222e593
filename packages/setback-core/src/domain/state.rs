use serde::{Deserialize, Serialize};

use crate::domain::bidding::Bid;
use crate::domain::rules::{PARTNERSHIPS, PLAYERS};
use crate::domain::scoring::HandScoreResult;
use crate::domain::{Card, Suit};
use crate::errors::domain::DomainError;

pub type PlayerId = u8; // 0..=3, seat index clockwise from North

/// Table position.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Seat {
    North,
    East,
    South,
    West,
}

impl Seat {
    pub const ALL: [Seat; PLAYERS] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub fn of(player: PlayerId) -> Seat {
        Seat::ALL[player as usize % PLAYERS]
    }

    pub fn index(self) -> PlayerId {
        match self {
            Seat::North => 0,
            Seat::East => 1,
            Seat::South => 2,
            Seat::West => 3,
        }
    }
}

/// Opposite seats play together.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PartnershipId {
    NorthSouth,
    EastWest,
}

impl PartnershipId {
    pub const ALL: [PartnershipId; PARTNERSHIPS] =
        [PartnershipId::NorthSouth, PartnershipId::EastWest];

    pub fn of(player: PlayerId) -> PartnershipId {
        if player % 2 == 0 {
            PartnershipId::NorthSouth
        } else {
            PartnershipId::EastWest
        }
    }

    pub fn index(self) -> usize {
        match self {
            PartnershipId::NorthSouth => 0,
            PartnershipId::EastWest => 1,
        }
    }

    pub fn members(self) -> [PlayerId; 2] {
        match self {
            PartnershipId::NorthSouth => [0, 2],
            PartnershipId::EastWest => [1, 3],
        }
    }

    pub fn other(self) -> PartnershipId {
        match self {
            PartnershipId::NorthSouth => PartnershipId::EastWest,
            PartnershipId::EastWest => PartnershipId::NorthSouth,
        }
    }
}

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Engine created, no game started.
    Setup,
    /// Cards are being dealt for a new hand.
    Dealing,
    /// Players bid in fixed turn order, dealer last.
    Bidding,
    /// Playing tricks within the hand; `trick_no` is 1-based.
    Playing { trick_no: u8 },
    /// Tally hand points.
    Scoring,
    /// A partnership reached the target score.
    GameOver,
}

/// Bidding sub-state for the current hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiddingStatus {
    NotStarted,
    Bidding,
    BidEstablished,
    AllPassed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_human: bool,
    pub seat: Seat,
    pub hand: Vec<Card>,
    pub is_dealer: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, is_human: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_human,
            seat: Seat::of(id),
            hand: Vec::new(),
            is_dealer: false,
        }
    }

    pub fn partnership(&self) -> PartnershipId {
        PartnershipId::of(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partnership {
    pub id: PartnershipId,
    pub members: [PlayerId; 2],
    /// Cumulative score; may go negative.
    pub score: i16,
}

impl Partnership {
    pub fn new(id: PartnershipId) -> Self {
        Self {
            id,
            members: id.members(),
            score: 0,
        }
    }
}

/// One trick: ordered plays, lead suit and winner once resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trick {
    pub plays: Vec<(PlayerId, Card)>,
    pub lead_suit: Option<Suit>,
    pub winner: Option<PlayerId>,
}

impl Trick {
    pub fn is_complete(&self) -> bool {
        self.plays.len() == PLAYERS
    }

    pub fn leader(&self) -> Option<PlayerId> {
        self.plays.first().map(|&(p, _)| p)
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|&(_, c)| c)
    }
}

/// Per-hand state relevant during bidding and trick play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandState {
    /// 1-based hand number within the game (0 before the first deal).
    pub hand_no: u32,
    pub dealer: PlayerId,
    pub bidding: BiddingStatus,
    /// Bids in bidding order, one per player.
    pub bids: Vec<Bid>,
    /// Winning bidder, once bidding ends.
    pub declarer: Option<PlayerId>,
    pub winning_bid: Option<u8>,
    /// Set by the first card played in the hand.
    pub trump: Option<Suit>,
    pub current_trick: Trick,
    pub completed_tricks: Vec<Trick>,
    /// Cards left in the deck after dealing.
    pub undealt: usize,
}

impl HandState {
    pub fn empty() -> Self {
        Self {
            hand_no: 0,
            dealer: 0,
            bidding: BiddingStatus::NotStarted,
            bids: Vec::with_capacity(PLAYERS),
            declarer: None,
            winning_bid: None,
            trump: None,
            current_trick: Trick::default(),
            completed_tricks: Vec::new(),
            undealt: 0,
        }
    }

    pub fn cards_played(&self) -> usize {
        self.completed_tricks.len() * PLAYERS + self.current_trick.plays.len()
    }
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub phase: Phase,
    pub players: [Player; PLAYERS],
    pub partnerships: [Partnership; PARTNERSHIPS],
    pub target_score: i16,
    /// Player whose turn it is to act.
    /// - Some(seat) when someone is expected to act
    /// - None when nobody can act (Setup, Scoring, GameOver)
    pub turn: Option<PlayerId>,
    pub hand: HandState,
    /// Last completed trick, for display.
    pub last_trick: Option<Trick>,
    /// Score of the most recently completed hand.
    pub previous_hand: Option<HandScoreResult>,
    pub winner: Option<PartnershipId>,
}

impl GameState {
    pub fn new(players: [Player; PLAYERS], target_score: i16) -> Self {
        Self {
            phase: Phase::Setup,
            players,
            partnerships: PartnershipId::ALL.map(Partnership::new),
            target_score,
            turn: None,
            hand: HandState::empty(),
            last_trick: None,
            previous_hand: None,
            winner: None,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    pub fn partnership(&self, id: PartnershipId) -> &Partnership {
        &self.partnerships[id.index()]
    }

    pub fn partnership_mut(&mut self, id: PartnershipId) -> &mut Partnership {
        &mut self.partnerships[id.index()]
    }

    pub fn scores(&self) -> [i16; PARTNERSHIPS] {
        [self.partnerships[0].score, self.partnerships[1].score]
    }

    pub fn cards_in_hands(&self) -> usize {
        self.players.iter().map(|p| p.hand.len()).sum()
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
/// Counter-clockwise direction is negative (-1).
#[inline]
pub fn seat_offset(seat: PlayerId, delta: i8) -> PlayerId {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(PLAYERS as i16)) as PlayerId
}

/// Returns the next player clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_player(p: PlayerId) -> PlayerId {
    seat_offset(p, 1)
}

/// Returns the seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: PlayerId, n: u8) -> PlayerId {
    seat_offset(start, n as i8)
}

/// Dealer for a 1-based hand number; the deal passes clockwise.
#[inline]
pub fn dealer_for_hand(first_dealer: PlayerId, hand_no: u32) -> PlayerId {
    debug_assert!(hand_no >= 1, "hand_no is 1-based and must be >= 1");
    let steps = (hand_no.saturating_sub(1) % PLAYERS as u32) as u8;
    nth_from(first_dealer, steps)
}

/// Expected bidder seat during bidding.
///
/// Bidding starts at left-of-dealer, then rotates clockwise by `bid_count`.
#[inline]
pub fn expected_bidder(dealer: PlayerId, bid_count: u8) -> PlayerId {
    seat_offset(dealer, 1 + bid_count as i8)
}

/// Expected actor seat during a trick.
#[inline]
pub fn expected_actor(first_player: PlayerId, play_count: u8) -> PlayerId {
    nth_from(first_player, play_count)
}

pub fn require_turn(state: &GameState, ctx: &'static str) -> Result<PlayerId, DomainError> {
    state
        .turn
        .ok_or_else(|| DomainError::invariant(format!("turn must be set ({ctx})")))
}

pub fn require_trump(state: &GameState, ctx: &'static str) -> Result<Suit, DomainError> {
    state
        .hand
        .trump
        .ok_or_else(|| DomainError::invariant(format!("trump must be set ({ctx})")))
}

pub fn require_declarer(state: &GameState, ctx: &'static str) -> Result<PlayerId, DomainError> {
    state
        .hand
        .declarer
        .ok_or_else(|| DomainError::invariant(format!("declarer must be set ({ctx})")))
}

pub fn require_winning_bid(state: &GameState, ctx: &'static str) -> Result<u8, DomainError> {
    state
        .hand
        .winning_bid
        .ok_or_else(|| DomainError::invariant(format!("winning bid must be set ({ctx})")))
}
