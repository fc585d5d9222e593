//! Error handling for the Setback rule engine.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
