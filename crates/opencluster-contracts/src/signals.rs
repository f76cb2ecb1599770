//! Alert identifiers and turn-signal states.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Threshold alerts that report through [`crate::AlertChanged`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Vehicle speed above the configured limit.
    SpeedLimit,
    /// Engine speed above the shift-light threshold.
    RpmHigh,
    /// Time-to-collision inside the warning band.
    FcwWarning,
    /// Time-to-collision inside the critical band.
    FcwCritical,
}

impl AlertKind {
    /// Every alert kind.
    pub const ALL: [AlertKind; 4] = [
        AlertKind::SpeedLimit,
        AlertKind::RpmHigh,
        AlertKind::FcwWarning,
        AlertKind::FcwCritical,
    ];

    /// Stable snake_case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            AlertKind::SpeedLimit => "speed_limit",
            AlertKind::RpmHigh => "rpm_high",
            AlertKind::FcwWarning => "fcw_warning",
            AlertKind::FcwCritical => "fcw_critical",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turn-signal stalk position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnSignalState {
    /// No indicator.
    #[default]
    Off,
    /// Left indicator.
    Left,
    /// Right indicator.
    Right,
    /// Both indicators.
    Hazard,
}

impl TurnSignalState {
    /// Whether the left lamp participates in blinking.
    pub const fn left_active(self) -> bool {
        matches!(self, TurnSignalState::Left | TurnSignalState::Hazard)
    }

    /// Whether the right lamp participates in blinking.
    pub const fn right_active(self) -> bool {
        matches!(self, TurnSignalState::Right | TurnSignalState::Hazard)
    }
}

impl fmt::Display for TurnSignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TurnSignalState::Off => "off",
            TurnSignalState::Left => "left",
            TurnSignalState::Right => "right",
            TurnSignalState::Hazard => "hazard",
        };
        f.write_str(label)
    }
}
