//! Terrain modes for the OpenCluster instrument cluster
//!
//! A terrain mode bundles a panel ranking, gauge styles, an accent colour
//! and a badge icon. [`TerrainModeCoordinator`] owns the active mode and
//! publishes `ModeChanged` once per distinct selection; what the panels do
//! with the new descriptor is up to their subscribers.
//!
//! [`ThemeController`] does the same for the day/night colour theme,
//! switching on the ambient light level.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod catalog;
pub mod coordinator;
pub mod error;
pub mod presets;
pub mod theme;

pub use catalog::ModeCatalog;
pub use coordinator::TerrainModeCoordinator;
pub use error::{ModeError, ModeResult};
pub use theme::{ThemeConfig, ThemeController};
