//! Time-based pulse intensity.
//!
//! Intensity is a pure function of elapsed time so the presentation layer
//! can reproduce it from any timestamp without carrying phase state.

use std::f64::consts::TAU;

use opencluster_telemetry::math::lerp;
use serde::{Deserialize, Serialize};

use crate::error::{AlertError, AlertResult};

/// Sinusoidal pulse between `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseConfig {
    /// Cycles per second.
    pub frequency_hz: f32,
    /// Intensity at the trough.
    pub min: f32,
    /// Intensity at the crest.
    pub max: f32,
}

impl PulseConfig {
    /// 1 Hz warning flash.
    pub const ALERT_FLASH: Self = Self {
        frequency_hz: 1.0,
        min: 0.65,
        max: 1.0,
    };

    /// 6 Hz brake warning flash.
    pub const BRAKE_FLASH: Self = Self {
        frequency_hz: 6.0,
        min: 0.1,
        max: 1.0,
    };

    /// Check frequency and range.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::InvalidPulse`] for a non-finite or negative
    /// frequency, a non-finite bound, or `min > max`.
    pub fn validate(&self) -> AlertResult<()> {
        if !self.frequency_hz.is_finite() || self.frequency_hz < 0.0 {
            return Err(AlertError::InvalidPulse(
                "frequency_hz must be finite and not negative".into(),
            ));
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(AlertError::InvalidPulse("bounds must be finite".into()));
        }
        if self.min > self.max {
            return Err(AlertError::InvalidPulse("min must not exceed max".into()));
        }
        Ok(())
    }

    /// `lerp(min, max, (sin(2π·f·t) + 1) / 2)`.
    ///
    /// Phase is computed in `f64` so long-running clocks keep precision.
    pub fn intensity(&self, elapsed_secs: f64) -> f32 {
        let phase = (TAU * f64::from(self.frequency_hz) * elapsed_secs).sin();
        let t = ((phase + 1.0) * 0.5) as f32;
        lerp(self.min, self.max, t)
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self::ALERT_FLASH
    }
}
