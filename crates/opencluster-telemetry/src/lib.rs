//! Vehicle telemetry simulator for the OpenCluster instrument cluster
//!
//! A deliberately simple longitudinal/lateral model: throttle and brake
//! integrate speed, engine speed follows speed with first-order lag,
//! steering is rate-limited, and roll and g-forces are derived from it.
//! A lead vehicle provides a time-to-collision signal.
//!
//! Inputs are never rejected. Speeds, engine speed, roll and the lead gap
//! are clamped into range after every tick, and `dt` is floored at 1e-4 s.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use opencluster_bus::EventBus;
//! use opencluster_telemetry::{ControlInputs, TelemetrySimulator};
//!
//! let bus = Rc::new(EventBus::new());
//! let mut sim = TelemetrySimulator::with_defaults(Rc::clone(&bus));
//!
//! let frame = sim.tick(&ControlInputs::throttle(), 0.5);
//! assert!(frame.speed_kmh > 0.0);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod error;
pub mod inputs;
pub mod math;
pub mod params;
pub mod simulator;
pub mod state;

pub use error::{TelemetryError, TelemetryResult};
pub use inputs::{ControlInputs, LEAD_DISTANCE_RATE_M_PER_S, LEAD_SPEED_RATE_KMH_PER_S};
pub use params::{VehicleParams, VehicleParamsBuilder};
pub use simulator::TelemetrySimulator;
pub use state::{TelemetryFrame, VehicleState, time_to_collision};
