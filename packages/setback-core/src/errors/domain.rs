//! Domain-level error type used across the rule engine.
//!
//! Two families exist. `Validation` covers illegal intents (wrong turn, bad
//! bid, illegal card); the caller may correct and resubmit. `Invariant` covers
//! internal defects (exhausted deck, duplicate cards, impossible state) and is
//! never expected in a correct game.

use thiserror::Error;

/// Validation kinds for illegal intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Intent does not fit the current phase.
    PhaseMismatch,
    /// Not this player's turn.
    OutOfTurn,
    /// Unknown seat / player id.
    UnknownPlayer,
    /// Bid amount out of range or not above the current high bid.
    InvalidBid,
    /// Dealer tried to pass after everyone else passed.
    DealerMustBid,
    /// Card is not held by the player.
    CardNotInHand,
    /// Card violates suit-following.
    MustFollowSuit,
    /// Joker led while other cards remain in hand.
    JokerLead,
    /// Card token or id could not be parsed.
    ParseCard,
    /// Game configuration rejected.
    InvalidConfig,
    /// Game already finished.
    GameOver,
}

impl ValidationKind {
    /// Stable SCREAMING_SNAKE_CASE code for presentation layers.
    pub const fn code(self) -> &'static str {
        match self {
            ValidationKind::PhaseMismatch => "PHASE_MISMATCH",
            ValidationKind::OutOfTurn => "OUT_OF_TURN",
            ValidationKind::UnknownPlayer => "UNKNOWN_PLAYER",
            ValidationKind::InvalidBid => "INVALID_BID",
            ValidationKind::DealerMustBid => "DEALER_MUST_BID",
            ValidationKind::CardNotInHand => "CARD_NOT_IN_HAND",
            ValidationKind::MustFollowSuit => "MUST_FOLLOW_SUIT",
            ValidationKind::JokerLead => "JOKER_LEAD",
            ValidationKind::ParseCard => "PARSE_CARD",
            ValidationKind::InvalidConfig => "INVALID_CONFIG",
            ValidationKind::GameOver => "GAME_OVER",
        }
    }
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Illegal intent; state is unchanged.
    #[error("validation error ({code}): {1}", code = .0.code())]
    Validation(ValidationKind, String),
    /// Internal defect; should never happen in a correct game.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    /// Validation kind, if this is an illegal-intent error.
    pub fn kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(*kind),
            DomainError::Invariant(_) => None,
        }
    }

    /// Human-readable reason without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, detail) | DomainError::Invariant(detail) => detail,
        }
    }

    pub fn is_invariant(&self) -> bool {
        matches!(self, DomainError::Invariant(_))
    }
}
