//! Gear error types

use opencluster_contracts::ContractError;
use thiserror::Error;

/// Errors raised by the gear crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GearError {
    /// Shift schedule breaks an ordering or hysteresis constraint.
    #[error("Invalid shift schedule: {0}")]
    InvalidSchedule(String),

    /// Selector character could not be parsed.
    #[error(transparent)]
    Selector(#[from] ContractError),
}

impl GearError {
    /// Create an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        GearError::InvalidSchedule(reason.into())
    }
}

/// Result type for gear operations.
pub type GearResult<T> = Result<T, GearError>;
