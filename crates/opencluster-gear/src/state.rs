//! Pure selector/drive-gear state machine.

use opencluster_contracts::{GearSelector, MAX_DRIVE_GEAR, MIN_DRIVE_GEAR};
use serde::{Deserialize, Serialize};

use crate::schedule::ShiftSchedule;

/// Selector position plus the drive-gear sub-state.
///
/// The drive gear is kept while the selector is outside `D` and only
/// recomputed from speed while in `D`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearState {
    selector: GearSelector,
    drive_gear: u8,
    last_speed_kmh: Option<f32>,
}

impl Default for GearState {
    fn default() -> Self {
        Self::new()
    }
}

impl GearState {
    /// `N` with drive gear 1.
    pub const fn new() -> Self {
        Self {
            selector: GearSelector::Neutral,
            drive_gear: MIN_DRIVE_GEAR,
            last_speed_kmh: None,
        }
    }

    /// Move the selector. Entering `D` clamps the drive gear into range.
    pub fn set_selector(&mut self, selector: GearSelector) {
        self.selector = selector;
        if selector.is_drive() {
            self.drive_gear = self.drive_gear.clamp(MIN_DRIVE_GEAR, MAX_DRIVE_GEAR);
        }
    }

    /// Feed a speed sample. Returns the new gear when it changed.
    ///
    /// Outside `D` the sample is remembered but the gear is left alone.
    pub fn on_speed(&mut self, kmh: f32, schedule: &ShiftSchedule) -> Option<u8> {
        if kmh.is_finite() {
            self.last_speed_kmh = Some(kmh);
        }
        if !self.selector.is_drive() {
            return None;
        }
        let resolved = schedule.resolve(self.drive_gear, kmh);
        if resolved == self.drive_gear {
            return None;
        }
        self.drive_gear = resolved;
        Some(resolved)
    }

    /// Current selector.
    pub const fn selector(&self) -> GearSelector {
        self.selector
    }

    /// Drive gear, kept even outside `D`.
    pub const fn drive_gear(&self) -> u8 {
        self.drive_gear
    }

    /// Gear to show on the cluster: `Some` only while in `D`.
    pub const fn displayed_gear(&self) -> Option<u8> {
        if self.selector.is_drive() {
            Some(self.drive_gear)
        } else {
            None
        }
    }

    /// Last finite speed sample.
    pub const fn last_speed_kmh(&self) -> Option<f32> {
        self.last_speed_kmh
    }
}
