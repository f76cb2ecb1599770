//! Event payloads carried by the cluster bus.
//!
//! Each payload is its own type so that subscribers register for exactly
//! the signal they render. [`ClusterEvent`] is the tagged union used by
//! recorders and the JSON event stream.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{AlertKind, GearSelector, TerrainMode, Theme, TurnSignalState};

/// Vehicle speed in km/h, never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedChanged {
    /// Speed in km/h.
    pub kmh: f32,
}

/// Engine speed in revolutions per minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RpmChanged {
    /// Engine speed.
    pub rpm: f32,
}

/// Body roll in degrees, positive to the right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollChanged {
    /// Roll angle.
    pub deg: f32,
}

/// Acceleration in g.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GChanged {
    /// Lateral component, positive to the right.
    pub lateral: f32,
    /// Longitudinal component, positive when accelerating.
    pub longitudinal: f32,
}

/// Time-to-collision with the lead vehicle, in seconds.
///
/// The simulator reports a large sentinel when the gap is opening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TtcChanged {
    /// Seconds until contact.
    pub seconds: f32,
}

/// Selector lever moved (or was re-asserted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearSelectorChanged {
    /// New position.
    pub selector: GearSelector,
}

/// Drive gear changed while in `D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveGearChanged {
    /// Gear in `1..=7`.
    pub gear: u8,
}

/// Active terrain mode replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeChanged {
    /// Shared descriptor.
    pub mode: Arc<TerrainMode>,
}

/// Colour theme replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeChanged {
    /// Shared descriptor.
    pub theme: Arc<Theme>,
}

/// Threshold alert entered or left its active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertChanged {
    /// Which alert.
    pub alert: AlertKind,
    /// New state.
    pub active: bool,
}

/// Turn-signal stalk moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSignalChanged {
    /// New state.
    pub state: TurnSignalState,
}

/// Any cluster event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClusterEvent {
    /// See [`SpeedChanged`].
    Speed(SpeedChanged),
    /// See [`RpmChanged`].
    Rpm(RpmChanged),
    /// See [`RollChanged`].
    Roll(RollChanged),
    /// See [`GChanged`].
    G(GChanged),
    /// See [`TtcChanged`].
    Ttc(TtcChanged),
    /// See [`GearSelectorChanged`].
    GearSelector(GearSelectorChanged),
    /// See [`DriveGearChanged`].
    DriveGear(DriveGearChanged),
    /// See [`ModeChanged`].
    Mode(ModeChanged),
    /// See [`ThemeChanged`].
    Theme(ThemeChanged),
    /// See [`AlertChanged`].
    Alert(AlertChanged),
    /// See [`TurnSignalChanged`].
    TurnSignal(TurnSignalChanged),
}

impl ClusterEvent {
    /// Short label for logs and CLI output.
    pub const fn kind(&self) -> &'static str {
        match self {
            ClusterEvent::Speed(_) => "speed",
            ClusterEvent::Rpm(_) => "rpm",
            ClusterEvent::Roll(_) => "roll",
            ClusterEvent::G(_) => "g",
            ClusterEvent::Ttc(_) => "ttc",
            ClusterEvent::GearSelector(_) => "gear_selector",
            ClusterEvent::DriveGear(_) => "drive_gear",
            ClusterEvent::Mode(_) => "mode",
            ClusterEvent::Theme(_) => "theme",
            ClusterEvent::Alert(_) => "alert",
            ClusterEvent::TurnSignal(_) => "turn_signal",
        }
    }

    /// Whether this is one of the per-tick telemetry signals.
    pub const fn is_telemetry(&self) -> bool {
        matches!(
            self,
            ClusterEvent::Speed(_)
                | ClusterEvent::Rpm(_)
                | ClusterEvent::Roll(_)
                | ClusterEvent::G(_)
                | ClusterEvent::Ttc(_)
        )
    }
}

macro_rules! impl_from_payload {
    ($($payload:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$payload> for ClusterEvent {
                fn from(value: $payload) -> Self {
                    ClusterEvent::$variant(value)
                }
            }
        )*
    };
}

impl_from_payload! {
    SpeedChanged => Speed,
    RpmChanged => Rpm,
    RollChanged => Roll,
    GChanged => G,
    TtcChanged => Ttc,
    GearSelectorChanged => GearSelector,
    DriveGearChanged => DriveGear,
    ModeChanged => Mode,
    ThemeChanged => Theme,
    AlertChanged => Alert,
    TurnSignalChanged => TurnSignal,
}
