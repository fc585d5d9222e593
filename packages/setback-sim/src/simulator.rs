//! Drives complete games through the engine with uniformly random legal intents.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use setback_core::{
    DomainError, GameConfig, GameEndReason, GameEvent, HandScoreResult, PartnershipId, Phase,
    SetbackEngine,
};
use tracing::debug;

/// Hands after which a game is considered stuck.
const MAX_HANDS: usize = 1_000;

/// Result of simulating a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub final_scores: [i16; 2],
    pub winner: PartnershipId,
    pub decided_by: GameEndReason,
    /// Every scored hand, in order.
    pub hands: Vec<HandScoreResult>,
    /// Bids and card plays submitted.
    pub intents: u32,
}

/// In-memory game simulator.
pub struct Simulator {
    engine: SetbackEngine,
    rng: StdRng,
    seed: u64,
    target_score: i16,
}

impl Simulator {
    pub fn new(seed: u64, target_score: i16) -> Self {
        Self {
            engine: SetbackEngine::new(),
            // Independent of the deal stream.
            rng: StdRng::seed_from_u64(!seed),
            seed,
            target_score,
        }
    }

    /// Simulate a complete game.
    pub fn simulate_game(mut self) -> Result<GameResult, SimulatorError> {
        let config = GameConfig {
            target_score: self.target_score,
            ..GameConfig::default().with_seed(self.seed)
        };
        self.engine.start_game(config)?;

        let mut hands = Vec::new();
        let mut intents = 0u32;

        loop {
            if hands.len() > MAX_HANDS {
                return Err(SimulatorError::Stalled(hands.len()));
            }
            let events = self.step()?;
            intents += 1;

            for event in events {
                match event {
                    GameEvent::HandScored { result } => hands.push(result),
                    GameEvent::GameEnded {
                        winner,
                        final_scores,
                        decided_by,
                    } => {
                        debug!(seed = self.seed, hands = hands.len(), ?winner, "Simulated game ended");
                        return Ok(GameResult {
                            final_scores,
                            winner,
                            decided_by,
                            hands,
                            intents,
                        });
                    }
                    _ => {}
                }
            }
        }
    }

    /// Submit one random legal intent for the player on turn.
    fn step(&mut self) -> Result<Vec<GameEvent>, SimulatorError> {
        let snap = self.engine.game_state();
        let who = snap
            .turn
            .ok_or_else(|| SimulatorError::InvalidState(format!("nobody to act in {:?}", snap.phase)))?;

        match snap.phase {
            Phase::Bidding => {
                let bid = *self
                    .engine
                    .legal_bids(who)
                    .choose(&mut self.rng)
                    .ok_or_else(|| SimulatorError::InvalidState(format!("no legal bid for {who}")))?;
                Ok(self.engine.place_bid(who, bid)?)
            }
            Phase::Playing { .. } => {
                let card = *self
                    .engine
                    .legal_moves(who)
                    .choose(&mut self.rng)
                    .ok_or_else(|| SimulatorError::InvalidState(format!("no legal card for {who}")))?;
                Ok(self.engine.play_card(who, card)?)
            }
            other => Err(SimulatorError::InvalidState(format!(
                "unexpected phase {other:?}"
            ))),
        }
    }
}

/// Errors that can occur during simulation.
#[derive(Debug)]
pub enum SimulatorError {
    /// The engine rejected an intent the driver believed legal.
    Domain(DomainError),
    /// No winner after this many hands.
    Stalled(usize),
    InvalidState(String),
}

impl From<DomainError> for SimulatorError {
    fn from(e: DomainError) -> Self {
        SimulatorError::Domain(e)
    }
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::Domain(e) => write!(f, "Domain error: {e}"),
            SimulatorError::Stalled(hands) => write!(f, "No winner after {hands} hands"),
            SimulatorError::InvalidState(msg) => write!(f, "Invalid state: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}
