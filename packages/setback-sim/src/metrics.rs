//! Metrics collection and output for simulation results.

use serde::Serialize;
use setback_core::{GameEndReason, HandScoreResult, PartnershipId};

use crate::simulator::GameResult;
use crate::types::MetricsLevel;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: SimConfig,
    pub result: GameResultMetrics,
    pub bidding: BidStats,
    /// Per-hand breakdown; empty at `MetricsLevel::Basic`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hands: Vec<HandScoreResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimConfig {
    pub target_score: i16,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub final_scores: [i16; 2],
    pub winner: PartnershipId,
    pub decided_by: GameEndReason,
    pub hands_played: usize,
    pub intents: u32,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BidStats {
    pub made: u32,
    pub set: u32,
    /// Hands won per bid amount, index 0 = bid of 2.
    pub made_by_amount: [u32; 5],
    pub set_by_amount: [u32; 5],
}

impl BidStats {
    fn record(&mut self, hand: &HandScoreResult) {
        let slot = usize::from(hand.bid_amount.saturating_sub(2)).min(4);
        if hand.bid_made {
            self.made += 1;
            self.made_by_amount[slot] += 1;
        } else {
            self.set += 1;
            self.set_by_amount[slot] += 1;
        }
    }
}

/// Build metrics from a finished game.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    config: SimConfig,
    result: &GameResult,
    duration_ms: f64,
    level: &MetricsLevel,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let mut bidding = BidStats::default();
    for hand in &result.hands {
        bidding.record(hand);
    }

    let hands = match level {
        MetricsLevel::Basic => Vec::new(),
        MetricsLevel::Detailed => result.hands.clone(),
    };

    GameMetrics {
        game_id,
        seed,
        timestamp,
        config,
        result: GameResultMetrics {
            final_scores: result.final_scores,
            winner: result.winner,
            decided_by: result.decided_by,
            hands_played: result.hands.len(),
            intents: result.intents,
            duration_ms,
        },
        bidding,
        hands,
    }
}

/// CSV summary row (one per game).
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub winner: String,
    pub decided_by: String,
    pub ns_score: i16,
    pub ew_score: i16,
    pub hands_played: usize,
    pub bids_made: u32,
    pub bids_set: u32,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed,
            winner: format!("{:?}", metrics.result.winner),
            decided_by: format!("{:?}", metrics.result.decided_by),
            ns_score: metrics.result.final_scores[0],
            ew_score: metrics.result.final_scores[1],
            hands_played: metrics.result.hands_played,
            bids_made: metrics.bidding.made,
            bids_set: metrics.bidding.set,
        }
    }
}
