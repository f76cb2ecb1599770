//! Binary alert state with one-sided hysteresis.

use serde::{Deserialize, Serialize};

use crate::error::{AlertError, AlertResult};

/// Which side of the threshold is the alarming one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertDirection {
    /// Alarm at or above the threshold (speed, rpm).
    #[default]
    Rising,
    /// Alarm at or below the threshold (time-to-collision).
    Falling,
}

/// Activation threshold plus the release margin.
///
/// Rising: on at `v >= threshold`, off at `v <= threshold - margin`.
/// Falling: on at `v <= threshold`, off at `v >= threshold + margin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HysteresisBand {
    /// Activation threshold.
    pub threshold: f32,
    /// Width of the release band. The sign is ignored.
    pub margin: f32,
    /// Alarming side.
    #[serde(default)]
    pub direction: AlertDirection,
}

impl HysteresisBand {
    /// Band that alarms at or above `threshold`.
    pub const fn rising(threshold: f32, margin: f32) -> Self {
        Self {
            threshold,
            margin,
            direction: AlertDirection::Rising,
        }
    }

    /// Band that alarms at or below `threshold`.
    pub const fn falling(threshold: f32, margin: f32) -> Self {
        Self {
            threshold,
            margin,
            direction: AlertDirection::Falling,
        }
    }

    /// Check that threshold and margin are finite.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::InvalidBand`] otherwise.
    pub fn validate(&self) -> AlertResult<()> {
        if !self.threshold.is_finite() {
            return Err(AlertError::InvalidBand("threshold must be finite".into()));
        }
        if !self.margin.is_finite() {
            return Err(AlertError::InvalidBand("margin must be finite".into()));
        }
        Ok(())
    }

    /// Value at which an active alert releases.
    pub fn release_point(&self) -> f32 {
        match self.direction {
            AlertDirection::Rising => self.threshold - self.margin.abs(),
            AlertDirection::Falling => self.threshold + self.margin.abs(),
        }
    }

    /// `v` is on the alarming side of the threshold.
    pub fn triggers(&self, v: f32) -> bool {
        match self.direction {
            AlertDirection::Rising => v >= self.threshold,
            AlertDirection::Falling => v <= self.threshold,
        }
    }

    /// `v` is past the release point.
    pub fn releases(&self, v: f32) -> bool {
        let release = self.release_point();
        match self.direction {
            AlertDirection::Rising => v <= release,
            AlertDirection::Falling => v >= release,
        }
    }

    /// Next state given the current one and a sample.
    pub fn next_state(&self, active: bool, v: f32) -> bool {
        if v.is_nan() {
            return active;
        }
        if active {
            !self.releases(v)
        } else {
            self.triggers(v)
        }
    }
}

/// Stateful alert over a [`HysteresisBand`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdAlert {
    band: HysteresisBand,
    active: bool,
    last_value: Option<f32>,
}

impl ThresholdAlert {
    /// Inactive alert over `band`.
    pub const fn new(band: HysteresisBand) -> Self {
        Self {
            band,
            active: false,
            last_value: None,
        }
    }

    /// Feed a sample. Returns `Some(active)` only when the state flips.
    ///
    /// NaN samples are ignored entirely.
    pub fn update(&mut self, v: f32) -> Option<bool> {
        if v.is_nan() {
            return None;
        }
        self.last_value = Some(v);
        self.apply()
    }

    /// Replace the band and re-evaluate against the last sample.
    pub fn set_band(&mut self, band: HysteresisBand) -> Option<bool> {
        self.band = band;
        self.apply()
    }

    fn apply(&mut self) -> Option<bool> {
        let v = self.last_value?;
        let next = self.band.next_state(self.active, v);
        if next == self.active {
            return None;
        }
        self.active = next;
        Some(next)
    }

    /// Current state.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Band in use.
    pub const fn band(&self) -> HysteresisBand {
        self.band
    }

    /// Last non-NaN sample.
    pub const fn last_value(&self) -> Option<f32> {
        self.last_value
    }

    /// Deactivate and forget the last sample.
    pub fn reset(&mut self) {
        self.active = false;
        self.last_value = None;
    }
}
