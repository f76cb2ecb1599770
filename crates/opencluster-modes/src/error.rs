//! Mode lookup errors

use thiserror::Error;

/// Errors raised while resolving terrain modes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    /// No mode with this name is registered.
    #[error("Unknown terrain mode: {name} (available: {available})")]
    UnknownMode {
        /// Requested name.
        name: String,
        /// Comma-separated registered names.
        available: String,
    },

    /// A mode with this name is already registered.
    #[error("Duplicate terrain mode: {0}")]
    DuplicateMode(String),

    /// Mode name is empty.
    #[error("Terrain mode name must not be empty")]
    EmptyName,

    /// Theme switching settings out of range.
    #[error("Invalid theme config: {0}")]
    InvalidTheme(String),
}

/// Result type for mode operations.
pub type ModeResult<T> = Result<T, ModeError>;
