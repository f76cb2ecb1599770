//! Typed publish/subscribe bus for the OpenCluster instrument cluster
//!
//! The bus decouples the telemetry simulator from everything that consumes
//! its signals. It is deliberately single-threaded: one driver ticks the
//! simulator and every handler for that tick runs to completion before the
//! driver continues.
//!
//! # Dispatch rules
//!
//! - Handlers run synchronously in subscription order.
//! - Each publish works on a snapshot of the handler list, so handlers may
//!   subscribe, unsubscribe or publish while being dispatched.
//! - Registering the same [`Handler`] twice is a no-op, as is removing one
//!   that was never registered.
//! - A handler that returns an error or panics is logged and skipped; the
//!   remaining handlers still receive the event.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use opencluster_bus::EventBus;
//! use opencluster_contracts::SpeedChanged;
//!
//! let bus = Rc::new(EventBus::new());
//! let handler = bus.on(|event: &SpeedChanged| {
//!     assert!(event.kmh >= 0.0);
//!     Ok(())
//! });
//!
//! let report = bus.publish(SpeedChanged { kmh: 42.0 });
//! assert_eq!(report.delivered, 1);
//!
//! bus.unsubscribe(&handler);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod bus;
pub mod channel;
pub mod error;
pub mod prelude;
pub mod recorder;

pub use bus::{BusEvent, EventBus};
pub use channel::{Channel, DispatchReport, Handler, handler};
pub use error::{HandlerError, HandlerResult};
pub use recorder::EventRecorder;
