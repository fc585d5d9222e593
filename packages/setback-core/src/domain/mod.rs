//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod events;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_props_scoring;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use bidding::Bid;
pub use cards_logic::{card_beats, hand_has_suit, TrumpRank, TRUMP_ORDER};
pub use cards_types::{Card, Color, Rank, Suit};
pub use deck::{deal_hands, Deck};
pub use events::{EventBus, EventListener, GameEvent, ListenerId};
pub use scoring::{CategoryAward, GameEndReason, GameOutcome, HandScoreResult};
pub use seed_derivation::derive_dealing_seed;
pub use snapshot::{GameSnapshot, PlayerSnapshot};
pub use state::{GameState, PartnershipId, Phase, PlayerId, Seat};
