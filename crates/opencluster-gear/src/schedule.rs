//! Shift schedule and the hysteresis scan.

use opencluster_contracts::{DRIVE_GEAR_COUNT, MAX_DRIVE_GEAR, MIN_DRIVE_GEAR};
use serde::{Deserialize, Serialize};

use crate::error::{GearError, GearResult};

/// Stock upshift boundaries, km/h.
pub const DEFAULT_UPSHIFT_KMH: [f32; DRIVE_GEAR_COUNT] =
    [30.0, 55.0, 85.0, 115.0, 145.0, 170.0, 185.0];

/// Stock downshift boundaries, km/h. The last entry is never consulted.
pub const DEFAULT_DOWNSHIFT_KMH: [f32; DRIVE_GEAR_COUNT] =
    [25.0, 50.0, 80.0, 110.0, 140.0, 168.0, 999.0];

/// Speed boundaries for automatic gear selection.
///
/// `upshift_kmh[g - 1]` is the speed at which gear `g` shifts up;
/// `downshift_kmh[g - 2]` is the speed at or below which gear `g` shifts
/// down. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftSchedule {
    /// Upshift boundaries, km/h.
    pub upshift_kmh: [f32; DRIVE_GEAR_COUNT],
    /// Downshift boundaries, km/h.
    pub downshift_kmh: [f32; DRIVE_GEAR_COUNT],
}

impl Default for ShiftSchedule {
    fn default() -> Self {
        Self {
            upshift_kmh: DEFAULT_UPSHIFT_KMH,
            downshift_kmh: DEFAULT_DOWNSHIFT_KMH,
        }
    }
}

impl ShiftSchedule {
    /// Build and validate a schedule.
    ///
    /// # Errors
    ///
    /// See [`ShiftSchedule::validate`].
    pub fn new(
        upshift_kmh: [f32; DRIVE_GEAR_COUNT],
        downshift_kmh: [f32; DRIVE_GEAR_COUNT],
    ) -> GearResult<Self> {
        let schedule = Self {
            upshift_kmh,
            downshift_kmh,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check ordering and hysteresis.
    ///
    /// # Errors
    ///
    /// Returns [`GearError::InvalidSchedule`] when a boundary is not finite,
    /// the upshift table is not strictly increasing, the used part of the
    /// downshift table is not strictly increasing, or a downshift boundary
    /// is not below its upshift counterpart.
    pub fn validate(&self) -> GearResult<()> {
        let used = DRIVE_GEAR_COUNT.saturating_sub(1);

        if let Some(i) = self.upshift_kmh.iter().position(|v| !v.is_finite()) {
            return Err(GearError::invalid_schedule(format!(
                "upshift[{i}] is not finite"
            )));
        }
        if let Some(i) = self
            .downshift_kmh
            .iter()
            .take(used)
            .position(|v| !v.is_finite())
        {
            return Err(GearError::invalid_schedule(format!(
                "downshift[{i}] is not finite"
            )));
        }
        if self.upshift_kmh.first().is_some_and(|v| *v <= 0.0) {
            return Err(GearError::invalid_schedule(
                "upshift[0] must be greater than 0",
            ));
        }
        if let Some(i) = first_non_increasing(&self.upshift_kmh) {
            return Err(GearError::invalid_schedule(format!(
                "upshift[{i}] must be greater than upshift[{}]",
                i.saturating_sub(1)
            )));
        }
        if let Some(i) = first_non_increasing(self.downshift_kmh.get(..used).unwrap_or_default())
        {
            return Err(GearError::invalid_schedule(format!(
                "downshift[{i}] must be greater than downshift[{}]",
                i.saturating_sub(1)
            )));
        }
        for (i, (down, up)) in self
            .downshift_kmh
            .iter()
            .zip(self.upshift_kmh.iter())
            .take(used)
            .enumerate()
        {
            if down >= up {
                return Err(GearError::invalid_schedule(format!(
                    "downshift[{i}] ({down}) must be below upshift[{i}] ({up})"
                )));
            }
        }
        Ok(())
    }

    /// Resolve the drive gear for `kmh` starting from `current`.
    ///
    /// Upshifts are scanned first, then downshifts. A non-finite speed
    /// leaves the gear unchanged.
    pub fn resolve(&self, current: u8, kmh: f32) -> u8 {
        let mut gear = current.clamp(MIN_DRIVE_GEAR, MAX_DRIVE_GEAR);

        while gear < MAX_DRIVE_GEAR {
            match self.upshift_kmh.get(usize::from(gear - 1)) {
                Some(&up) if kmh >= up => gear += 1,
                _ => break,
            }
        }
        while gear > MIN_DRIVE_GEAR {
            match self.downshift_kmh.get(usize::from(gear - 2)) {
                Some(&down) if kmh <= down => gear -= 1,
                _ => break,
            }
        }
        gear
    }

    /// Speed band `(downshift, upshift)` inside which `gear` is held.
    ///
    /// Gear 1 has no lower bound and the top gear no upper bound.
    pub fn hold_band(&self, gear: u8) -> Option<(Option<f32>, Option<f32>)> {
        if !(MIN_DRIVE_GEAR..=MAX_DRIVE_GEAR).contains(&gear) {
            return None;
        }
        let lower = if gear > MIN_DRIVE_GEAR {
            self.downshift_kmh.get(usize::from(gear - 2)).copied()
        } else {
            None
        };
        let upper = if gear < MAX_DRIVE_GEAR {
            self.upshift_kmh.get(usize::from(gear - 1)).copied()
        } else {
            None
        };
        Some((lower, upper))
    }
}

fn first_non_increasing(values: &[f32]) -> Option<usize> {
    values
        .windows(2)
        .position(|pair| matches!(pair, [a, b] if b <= a))
        .map(|i| i + 1)
}
