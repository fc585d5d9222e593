//! Hand scoring and game completion.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::rules::{PARTNERSHIPS, PLAYERS, TRICKS_PER_HAND};
use crate::domain::state::{
    require_declarer, require_trump, require_winning_bid, GameState, HandState, PartnershipId,
    Phase,
};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// One scoring category won by a partnership. `card` is `None` for Game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryAward {
    pub partnership: PartnershipId,
    pub card: Option<Card>,
}

impl CategoryAward {
    fn for_card(card: Card, owner: PartnershipId) -> Self {
        Self {
            partnership: owner,
            card: Some(card),
        }
    }
}

/// Full breakdown of a scored hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandScoreResult {
    pub hand_no: u32,
    pub trump: Suit,
    pub high: Option<CategoryAward>,
    pub low: Option<CategoryAward>,
    pub jack: Option<CategoryAward>,
    pub off_jack: Option<CategoryAward>,
    pub joker: Option<CategoryAward>,
    pub game: Option<CategoryAward>,
    /// Captured game points (J=1, Q=2, K=3, A=4, 10=10) per partnership.
    pub game_points: [u32; PARTNERSHIPS],
    pub bid_amount: u8,
    pub bid_made: bool,
    pub bidding_partnership: PartnershipId,
    /// Categories won by the bidding partnership (0..=6).
    pub bidding_partnership_points: u8,
    pub non_bidding_partnership_points: u8,
    /// Applied to cumulative scores, indexed by [`PartnershipId::index`].
    pub score_deltas: [i16; PARTNERSHIPS],
}

impl HandScoreResult {
    pub fn awards(&self) -> [Option<CategoryAward>; 6] {
        [
            self.high, self.low, self.jack, self.off_jack, self.joker, self.game,
        ]
    }

    pub fn points_for(&self, id: PartnershipId) -> u8 {
        self.awards()
            .iter()
            .flatten()
            .filter(|a| a.partnership == id)
            .count() as u8
    }
}

/// Why the game ended with the winner it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEndReason {
    /// Only one partnership reached the target.
    SoleQualifier,
    /// Both reached it; the higher score wins.
    HigherScore,
    /// Both reached it with equal scores; the hand's bidders win.
    BiddingTieBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub winner: PartnershipId,
    pub final_scores: [i16; PARTNERSHIPS],
    pub decided_by: GameEndReason,
}

/// Every card captured in the hand, tagged with the partnership that won it.
pub fn captured_cards(hand: &HandState) -> Result<Vec<(PartnershipId, Card)>, DomainError> {
    let mut out = Vec::with_capacity(hand.completed_tricks.len() * PLAYERS);
    for (i, trick) in hand.completed_tricks.iter().enumerate() {
        let winner = trick
            .winner
            .ok_or_else(|| DomainError::invariant(format!("trick {} has no winner", i + 1)))?;
        let owner = PartnershipId::of(winner);
        out.extend(trick.cards().map(|c| (owner, c)));
    }
    Ok(out)
}

/// Score a finished hand without touching cumulative scores.
pub fn score_hand(hand: &HandState) -> Result<HandScoreResult, DomainError> {
    if hand.completed_tricks.len() != TRICKS_PER_HAND as usize {
        return Err(DomainError::invariant(format!(
            "scoring needs {TRICKS_PER_HAND} tricks, found {}",
            hand.completed_tricks.len()
        )));
    }
    let trump = hand
        .trump
        .ok_or_else(|| DomainError::invariant("trump must be set (score_hand)"))?;
    let declarer = hand
        .declarer
        .ok_or_else(|| DomainError::invariant("declarer must be set (score_hand)"))?;
    let bid_amount = hand
        .winning_bid
        .ok_or_else(|| DomainError::invariant("winning bid must be set (score_hand)"))?;

    let captured = captured_cards(hand)?;
    let bidders = PartnershipId::of(declarer);

    // High and Low: genuine trump-suit cards by natural rank.
    let trump_suit_cards = || {
        captured.iter().filter_map(move |&(owner, card)| match card {
            Card::Suited { suit, rank } if suit == trump => Some((owner, card, rank)),
            _ => None,
        })
    };
    let high = trump_suit_cards()
        .max_by_key(|&(_, _, r)| r)
        .map(|(owner, card, _)| CategoryAward::for_card(card, owner));
    let low = trump_suit_cards()
        .min_by_key(|&(_, _, r)| r)
        .map(|(owner, card, _)| CategoryAward::for_card(card, owner));

    let find = |wanted: Card| {
        captured
            .iter()
            .find(|&&(_, c)| c == wanted)
            .map(|&(owner, card)| CategoryAward::for_card(card, owner))
    };
    let jack = find(Card::new(trump, Rank::Jack));
    let off_jack = find(Card::new(trump.same_color_partner(), Rank::Jack));
    let joker = find(Card::Joker);

    let mut game_points = [0u32; PARTNERSHIPS];
    for &(owner, card) in &captured {
        game_points[owner.index()] += u32::from(card.point_value());
    }
    let [ns, ew] = game_points;
    let game_winner = match ns.cmp(&ew) {
        std::cmp::Ordering::Greater => PartnershipId::NorthSouth,
        std::cmp::Ordering::Less => PartnershipId::EastWest,
        std::cmp::Ordering::Equal => bidders,
    };
    let game = Some(CategoryAward {
        partnership: game_winner,
        card: None,
    });

    let mut result = HandScoreResult {
        hand_no: hand.hand_no,
        trump,
        high,
        low,
        jack,
        off_jack,
        joker,
        game,
        game_points,
        bid_amount,
        bid_made: false,
        bidding_partnership: bidders,
        bidding_partnership_points: 0,
        non_bidding_partnership_points: 0,
        score_deltas: [0; PARTNERSHIPS],
    };

    let earned = result.points_for(bidders);
    let other_earned = result.points_for(bidders.other());
    let bid_made = earned >= bid_amount;
    let bid_delta = if bid_made {
        i16::from(bid_amount)
    } else {
        -i16::from(bid_amount)
    };

    result.bid_made = bid_made;
    result.bidding_partnership_points = earned;
    result.non_bidding_partnership_points = other_earned;
    result.score_deltas[bidders.index()] = bid_delta;
    result.score_deltas[bidders.other().index()] = i16::from(other_earned);
    Ok(result)
}

/// Score the finished hand and add the deltas to cumulative scores.
pub fn apply_hand_scoring(state: &mut GameState) -> Result<HandScoreResult, DomainError> {
    if state.phase != Phase::Scoring {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Not in scoring phase",
        ));
    }
    require_trump(state, "apply_hand_scoring")?;
    require_declarer(state, "apply_hand_scoring")?;
    require_winning_bid(state, "apply_hand_scoring")?;

    let result = score_hand(&state.hand)?;
    let mut totals = state.scores();
    for id in PartnershipId::ALL {
        let i = id.index();
        totals[i] = totals[i].checked_add(result.score_deltas[i]).ok_or_else(|| {
            DomainError::invariant(format!(
                "score overflow: {:?} at {} with delta {}",
                id, totals[i], result.score_deltas[i]
            ))
        })?;
    }
    for id in PartnershipId::ALL {
        state.partnership_mut(id).score = totals[id.index()];
    }

    info!(
        hand_no = result.hand_no,
        trump = %result.trump,
        bid = result.bid_amount,
        bid_made = result.bid_made,
        ns_score = state.partnerships[0].score,
        ew_score = state.partnerships[1].score,
        "Hand scored"
    );

    state.previous_hand = Some(result.clone());
    Ok(result)
}

/// Decide whether the game is over after a hand was applied.
///
/// `bidders` is the bidding partnership of that hand; it wins an exact tie at
/// or above the target.
pub fn check_game_end(state: &GameState, bidders: PartnershipId) -> Option<GameOutcome> {
    let scores = state.scores();
    let target = state.target_score;
    let [ns, ew] = scores;

    let (winner, decided_by) = match (ns >= target, ew >= target) {
        (false, false) => return None,
        (true, false) => (PartnershipId::NorthSouth, GameEndReason::SoleQualifier),
        (false, true) => (PartnershipId::EastWest, GameEndReason::SoleQualifier),
        (true, true) => match ns.cmp(&ew) {
            std::cmp::Ordering::Greater => (PartnershipId::NorthSouth, GameEndReason::HigherScore),
            std::cmp::Ordering::Less => (PartnershipId::EastWest, GameEndReason::HigherScore),
            std::cmp::Ordering::Equal => {
                warn!(
                    score = ns,
                    target,
                    winner = ?bidders,
                    "Both partnerships tied at or above target; bidding partnership wins"
                );
                (bidders, GameEndReason::BiddingTieBreak)
            }
        },
    };

    Some(GameOutcome {
        winner,
        final_scores: scores,
        decided_by,
    })
}
