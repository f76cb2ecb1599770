//! Gear selector and drive-gear hysteresis for the OpenCluster instrument
//! cluster
//!
//! The selector (`P`, `R`, `N`, `D`) is set by command. While it is in `D`
//! every `SpeedChanged` event re-resolves the drive gear against a
//! [`ShiftSchedule`]: upshift boundaries are checked first, then
//! downshift boundaries, and the gap between the two tables keeps the gear
//! from hunting at a constant speed.
//!
//! The pure pieces ([`ShiftSchedule::resolve`], [`GearState`]) carry all the
//! logic; [`GearShiftController`] only wires them to the bus.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod controller;
pub mod error;
pub mod schedule;
pub mod state;

pub use controller::GearShiftController;
pub use error::{GearError, GearResult};
pub use schedule::{DEFAULT_DOWNSHIFT_KMH, DEFAULT_UPSHIFT_KMH, ShiftSchedule};
pub use state::GearState;
