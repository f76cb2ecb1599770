//! OpenCluster instrument cluster
//!
//! Wires the simulator, gearbox, alerts, indicators and terrain modes to a
//! single event bus and exposes them as one [`Cluster`]. Configuration is a
//! single [`ClusterConfig`] value, loadable from YAML or JSON, and
//! [`Scenario`] provides scripted inputs for demos and tests.
//!
//! # Example
//!
//! ```rust
//! use opencluster::{Cluster, ClusterConfig, Scenario};
//! use opencluster::contracts::GearSelector;
//!
//! let mut cluster = Cluster::new(ClusterConfig::default())?;
//! cluster.set_selector(GearSelector::Drive);
//!
//! let dt = 0.05;
//! let mut t = 0.0;
//! while t < 5.0 {
//!     cluster.tick(&Scenario::Launch.inputs_at(t), dt);
//!     t += dt;
//! }
//!
//! let snapshot = cluster.snapshot(cluster.elapsed());
//! assert_eq!(snapshot.gear, Some(2));
//! # Ok::<(), opencluster::ClusterError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod cluster;
pub mod config;
pub mod error;
pub mod scenario;

pub use cluster::{AlertSnapshot, Cluster, ClusterSnapshot};
pub use config::{ClusterConfig, ClusterConfigBuilder};
pub use error::{ClusterError, ClusterResult};
pub use scenario::{Scenario, Segment};

pub use opencluster_alerts as alerts;
pub use opencluster_bus as bus;
pub use opencluster_contracts as contracts;
pub use opencluster_gear as gear;
pub use opencluster_modes as modes;
pub use opencluster_telemetry as telemetry;
