//! Error types for simulator configuration.

use thiserror::Error;

/// Errors raised while validating [`crate::VehicleParams`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TelemetryError {
    /// A parameter is out of range or not finite.
    #[error("Invalid vehicle parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Field name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl TelemetryError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TelemetryError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for simulator configuration.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
