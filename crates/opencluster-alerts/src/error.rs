//! Alert configuration errors

use thiserror::Error;

/// Errors raised while validating alert configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    /// Threshold or margin is unusable.
    #[error("Invalid hysteresis band: {0}")]
    InvalidBand(String),

    /// Pulse frequency or range is unusable.
    #[error("Invalid pulse: {0}")]
    InvalidPulse(String),

    /// Blink timing is unusable.
    #[error("Invalid blink timing: {0}")]
    InvalidTiming(String),
}

/// Result type for alert configuration.
pub type AlertResult<T> = Result<T, AlertError>;
