//! Name lookup over registered terrain modes.

use std::sync::Arc;

use opencluster_contracts::TerrainMode;

use crate::error::{ModeError, ModeResult};
use crate::presets;

/// Registered modes in registration order. Names are unique ignoring case.
#[derive(Debug, Clone, Default)]
pub struct ModeCatalog {
    modes: Vec<Arc<TerrainMode>>,
}

impl ModeCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding Road, Trail and Snow.
    pub fn stock() -> Self {
        Self {
            modes: presets::all().into_iter().map(Arc::new).collect(),
        }
    }

    /// Add a mode and return the shared handle.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::EmptyName`] for a blank name and
    /// [`ModeError::DuplicateMode`] when the name is already taken.
    pub fn register(&mut self, mode: TerrainMode) -> ModeResult<Arc<TerrainMode>> {
        let name = mode.name.trim();
        if name.is_empty() {
            return Err(ModeError::EmptyName);
        }
        if self.find(name).is_some() {
            return Err(ModeError::DuplicateMode(name.to_string()));
        }
        let mode = Arc::new(mode);
        self.modes.push(Arc::clone(&mode));
        Ok(mode)
    }

    /// Look up a mode by name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::UnknownMode`] listing the registered names.
    pub fn get(&self, name: &str) -> ModeResult<Arc<TerrainMode>> {
        self.find(name).ok_or_else(|| ModeError::UnknownMode {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }

    fn find(&self, name: &str) -> Option<Arc<TerrainMode>> {
        let name = name.trim();
        self.modes
            .iter()
            .find(|mode| mode.name.trim().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Whether `name` resolves.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Registered names in order.
    pub fn names(&self) -> Vec<&str> {
        self.modes.iter().map(|mode| mode.name.as_str()).collect()
    }

    /// Registered modes in order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TerrainMode>> {
        self.modes.iter()
    }

    /// First registered mode.
    pub fn first(&self) -> Option<Arc<TerrainMode>> {
        self.modes.first().cloned()
    }

    /// Number of modes.
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Whether no mode is registered.
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}
