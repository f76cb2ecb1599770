//! Shared contracts for the OpenCluster instrument cluster
//!
//! Every value that crosses a component boundary lives here: the event
//! payloads published on the bus, the closed [`ClusterEvent`] sum type
//! used for recording, and the descriptors they carry (gear selector,
//! terrain mode, colour theme, alert and turn-signal identifiers).
//!
//! Payloads are plain values. Consumers receive them by shared reference
//! and never mutate them.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod events;
pub mod gear;
pub mod mode;
pub mod signals;
pub mod theme;

pub use events::{
    AlertChanged, ClusterEvent, DriveGearChanged, GChanged, GearSelectorChanged, ModeChanged,
    RollChanged, RpmChanged, SpeedChanged, ThemeChanged, TtcChanged, TurnSignalChanged,
};
pub use gear::{DRIVE_GEAR_COUNT, GearSelector, MAX_DRIVE_GEAR, MIN_DRIVE_GEAR};
pub use mode::{GaugeVariant, IconRef, PanelId, PanelPriority, Rgba, TerrainMode};
pub use signals::{AlertKind, TurnSignalState};
pub use theme::Theme;

use thiserror::Error;

/// Errors raised while converting raw values into contract types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Character is not one of `P`, `R`, `N`, `D`.
    #[error("Unknown gear selector: {0:?}")]
    UnknownSelector(char),

    /// Name does not match any known panel.
    #[error("Unknown panel: {0}")]
    UnknownPanel(String),
}

/// Result alias for contract conversions.
pub type ContractResult<T> = Result<T, ContractError>;
