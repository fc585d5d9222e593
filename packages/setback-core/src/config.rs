//! Game configuration supplied to [`crate::SetbackEngine::start_game`].

use serde::{Deserialize, Serialize};

use crate::domain::rules::{DEFAULT_TARGET_SCORE, MAX_TARGET_SCORE, PLAYERS};
use crate::domain::state::{PlayerId, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    #[serde(default)]
    pub is_human: bool,
}

impl PlayerConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: true,
        }
    }

    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: false,
        }
    }
}

/// Seats are given clockwise from North.
///
/// Every field has a default, so `{}` is a valid JSON config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub players: [PlayerConfig; PLAYERS],
    pub target_score: i16,
    /// Fixed seed for reproducible deals; drawn at random when absent.
    pub seed: Option<u64>,
    pub first_dealer: PlayerId,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: [
                PlayerConfig::human("North"),
                PlayerConfig::ai("East"),
                PlayerConfig::ai("South"),
                PlayerConfig::ai("West"),
            ],
            target_score: DEFAULT_TARGET_SCORE,
            seed: None,
            first_dealer: Seat::North.index(),
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let config: GameConfig = serde_json::from_str(json).map_err(|e| {
            DomainError::validation(ValidationKind::InvalidConfig, format!("Bad config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(i) = self.players.iter().position(|p| p.name.trim().is_empty()) {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!("Player {i} has an empty name"),
            ));
        }
        if !(1..=MAX_TARGET_SCORE).contains(&self.target_score) {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!(
                    "Target score must be in 1..={MAX_TARGET_SCORE}, got {}",
                    self.target_score
                ),
            ));
        }
        if self.first_dealer as usize >= PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!("First dealer {} is not a seat", self.first_dealer),
            ));
        }
        Ok(())
    }
}
