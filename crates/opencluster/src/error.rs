//! Facade error types

use std::path::PathBuf;

use opencluster_alerts::AlertError;
use opencluster_gear::GearError;
use opencluster_modes::ModeError;
use opencluster_telemetry::TelemetryError;
use thiserror::Error;

/// Errors raised while building a cluster or loading its configuration.
#[derive(Error, Debug)]
pub enum ClusterError {
    /// Vehicle parameters failed validation.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// Shift schedule failed validation or a selector did not parse.
    #[error(transparent)]
    Gear(#[from] GearError),

    /// Alert or indicator settings failed validation.
    #[error(transparent)]
    Alert(#[from] AlertError),

    /// Terrain mode lookup failed.
    #[error(transparent)]
    Mode(#[from] ModeError),

    /// Configuration is inconsistent across sections.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No scenario with this name.
    #[error("Unknown scenario: {name} (available: {available})")]
    UnknownScenario {
        /// Requested name.
        name: String,
        /// Comma-separated scenario names.
        available: String,
    },

    /// Config file extension is not `.yaml`, `.yml` or `.json`.
    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Config file could not be read or written.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// YAML could not be parsed or rendered.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON could not be parsed or rendered.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClusterError {
    /// Whether the error comes from a configuration value or document.
    pub fn is_invalid_config(&self) -> bool {
        match self {
            ClusterError::Telemetry(_)
            | ClusterError::Alert(_)
            | ClusterError::InvalidConfig(_)
            | ClusterError::UnsupportedFormat(_)
            | ClusterError::Yaml(_)
            | ClusterError::Json(_) => true,
            ClusterError::Gear(err) => matches!(err, GearError::InvalidSchedule(_)),
            ClusterError::Mode(err) => !matches!(err, ModeError::UnknownMode { .. }),
            ClusterError::UnknownScenario { .. } | ClusterError::Io { .. } => false,
        }
    }

    /// Whether the error is a failed mode or scenario lookup.
    pub fn is_unknown_name(&self) -> bool {
        matches!(
            self,
            ClusterError::Mode(ModeError::UnknownMode { .. }) | ClusterError::UnknownScenario { .. }
        )
    }
}

/// Result type for facade operations.
pub type ClusterResult<T> = Result<T, ClusterError>;
