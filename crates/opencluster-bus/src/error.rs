//! Handler error types

use core::fmt;

/// Failure reported by an event handler.
///
/// The bus logs these and keeps delivering; they never reach the publisher
/// except as a count in [`crate::DispatchReport`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    /// Handler could not process the event.
    #[error("Handler failed: {reason}")]
    Failed {
        /// Human-readable cause.
        reason: String,
    },

    /// Handler's component state was already borrowed, i.e. the event
    /// arrived re-entrantly while that component was mid-update.
    #[error("Component busy: {component}")]
    Busy {
        /// Component that rejected the event.
        component: &'static str,
    },
}

impl HandlerError {
    /// Build a [`HandlerError::Failed`] from anything displayable.
    pub fn failed(reason: impl fmt::Display) -> Self {
        HandlerError::Failed {
            reason: reason.to_string(),
        }
    }

    /// Build a [`HandlerError::Busy`] for `component`.
    pub const fn busy(component: &'static str) -> Self {
        HandlerError::Busy { component }
    }

    /// Whether the failure came from a re-entrancy conflict.
    pub fn is_busy(&self) -> bool {
        matches!(self, HandlerError::Busy { .. })
    }
}

/// Result type returned by handlers.
pub type HandlerResult = Result<(), HandlerError>;
