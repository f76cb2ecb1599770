//! Threshold alerts and indicators for the OpenCluster instrument cluster
//!
//! Every threshold alert is a [`HysteresisBand`] over one bus signal:
//!
//! | alert | signal | band |
//! |-------|--------|------|
//! | speed limit | `SpeedChanged` | rising, 90 km/h, 2 km/h margin |
//! | rpm | `RpmChanged` | rising, 4500 rpm, 200 rpm margin |
//! | FCW warning | `TtcChanged` | falling, 2.0 s, 0.5 s margin |
//! | FCW critical | `TtcChanged` | falling, 1.0 s, 0.25 s margin |
//!
//! Each transition publishes `AlertChanged`. Flash intensity while an alert
//! is raised is a pure function of elapsed time ([`PulseConfig`]), as are
//! the turn-signal lamps ([`BlinkTiming`]).

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod error;
pub mod fcw;
pub mod inclinometer;
pub mod indicators;
pub mod monitor;
pub mod pulse;
pub mod rpm;
pub mod speed_limit;
pub mod threshold;

pub use error::{AlertError, AlertResult};
pub use fcw::{FcwConfig, FcwZone, ForwardCollisionWarning};
pub use inclinometer::{RollBand, display_roll};
pub use indicators::{BlinkTiming, TurnLamps, TurnSignalController, lamps_for};
pub use monitor::{AlertMonitor, AlertSignal};
pub use pulse::PulseConfig;
pub use rpm::{RpmAlert, RpmAlertConfig};
pub use speed_limit::{MAX_SPEED_LIMIT_KMH, SPEED_LIMIT_PRESETS_KMH, SpeedLimitAlert, SpeedLimitConfig};
pub use threshold::{AlertDirection, HysteresisBand, ThresholdAlert};
