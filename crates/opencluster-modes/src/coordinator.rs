//! Terrain mode selection.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use opencluster_bus::EventBus;
use opencluster_contracts::{ModeChanged, TerrainMode};

use crate::catalog::ModeCatalog;
use crate::error::ModeResult;

/// Holds the active terrain mode and announces changes.
///
/// Selecting the mode that is already active is a no-op. Any other
/// selection replaces the current mode and publishes `ModeChanged` once.
#[derive(Debug)]
pub struct TerrainModeCoordinator {
    bus: Rc<EventBus>,
    catalog: ModeCatalog,
    current: RefCell<Arc<TerrainMode>>,
}

impl TerrainModeCoordinator {
    /// Start on `initial` without publishing.
    pub fn new(bus: &Rc<EventBus>, catalog: ModeCatalog, initial: Arc<TerrainMode>) -> Self {
        Self {
            bus: Rc::clone(bus),
            catalog,
            current: RefCell::new(initial),
        }
    }

    /// Start on the catalog entry named `initial`.
    ///
    /// # Errors
    ///
    /// Returns an error if `initial` is not in `catalog`.
    pub fn with_catalog(bus: &Rc<EventBus>, catalog: ModeCatalog, initial: &str) -> ModeResult<Self> {
        let mode = catalog.get(initial)?;
        Ok(Self::new(bus, catalog, mode))
    }

    /// Make `mode` current. Returns `true` if it replaced a different mode.
    ///
    /// Two modes are the same when they share an allocation or compare
    /// equal.
    pub fn select_mode(&self, mode: Arc<TerrainMode>) -> bool {
        let previous = {
            let mut current = self.current.borrow_mut();
            if Arc::ptr_eq(&current, &mode) || **current == *mode {
                return false;
            }
            std::mem::replace(&mut *current, Arc::clone(&mode))
        };
        tracing::info!(from = %previous.name, to = %mode.name, "terrain mode changed");
        self.bus.publish(ModeChanged { mode });
        true
    }

    /// Select a catalog mode by name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModeError::UnknownMode`] for unregistered names; the
    /// current mode is kept.
    pub fn select_by_name(&self, name: &str) -> ModeResult<bool> {
        let mode = self.catalog.get(name)?;
        Ok(self.select_mode(mode))
    }

    /// Active mode.
    pub fn current(&self) -> Arc<TerrainMode> {
        Arc::clone(&self.current.borrow())
    }

    /// Modes available by name.
    pub fn catalog(&self) -> &ModeCatalog {
        &self.catalog
    }
}
