#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Rule engine for Setback, a four-player partnership trick-taking game.
//!
//! [`SetbackEngine`] owns the game state and accepts intents (`place_bid`,
//! `play_card`); everything under [`domain`] is pure logic over
//! [`domain::GameState`] that the engine composes.

pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;

pub use config::{GameConfig, PlayerConfig};
pub use domain::{
    Bid, Card, GameEndReason, GameEvent, GameSnapshot, HandScoreResult, ListenerId,
    PartnershipId, Phase, PlayerId, PlayerSnapshot, Rank, Seat, Suit,
};
pub use engine::SetbackEngine;
pub use errors::{DomainError, ValidationKind};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    setback_test_support::logging::init();
}
