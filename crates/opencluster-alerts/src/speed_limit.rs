//! Speed-limit alert.

use std::rc::Rc;

use opencluster_bus::EventBus;
use opencluster_contracts::{AlertKind, SpeedChanged};
use serde::{Deserialize, Serialize};

use crate::error::{AlertError, AlertResult};
use crate::monitor::AlertMonitor;
use crate::pulse::PulseConfig;
use crate::threshold::HysteresisBand;

/// Limits offered by the limit selector, km/h.
pub const SPEED_LIMIT_PRESETS_KMH: [f32; 6] = [30.0, 50.0, 70.0, 90.0, 110.0, 130.0];

/// Highest limit accepted by [`SpeedLimitAlert::set_limit`], km/h.
pub const MAX_SPEED_LIMIT_KMH: f32 = 200.0;

/// Speed-limit alert settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedLimitConfig {
    /// Initial limit, km/h.
    pub limit_kmh: f32,
    /// Release margin below the limit, km/h.
    pub margin_kmh: f32,
    /// Flash while over the limit.
    pub flash: PulseConfig,
}

impl Default for SpeedLimitConfig {
    fn default() -> Self {
        Self {
            limit_kmh: 90.0,
            margin_kmh: 2.0,
            flash: PulseConfig::ALERT_FLASH,
        }
    }
}

impl SpeedLimitConfig {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the limit is outside `0..=200`, the margin is
    /// negative or not finite, or the flash is invalid.
    pub fn validate(&self) -> AlertResult<()> {
        if !(0.0..=MAX_SPEED_LIMIT_KMH).contains(&self.limit_kmh) {
            return Err(AlertError::InvalidBand(format!(
                "speed limit must be within 0..={MAX_SPEED_LIMIT_KMH} km/h"
            )));
        }
        if !self.margin_kmh.is_finite() || self.margin_kmh < 0.0 {
            return Err(AlertError::InvalidBand(
                "speed limit margin must be finite and not negative".into(),
            ));
        }
        self.flash.validate()
    }

    fn band(&self, limit_kmh: f32) -> HysteresisBand {
        HysteresisBand::rising(limit_kmh, self.margin_kmh)
    }
}

/// Raises [`AlertKind::SpeedLimit`] while speed is at or over the limit.
#[derive(Debug)]
pub struct SpeedLimitAlert {
    config: SpeedLimitConfig,
    monitor: AlertMonitor<SpeedChanged>,
}

impl SpeedLimitAlert {
    /// Subscribe to speed updates on `bus`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn attach(bus: &Rc<EventBus>, config: SpeedLimitConfig) -> AlertResult<Self> {
        config.validate()?;
        let monitor = AlertMonitor::attach(
            bus,
            AlertKind::SpeedLimit,
            config.band(config.limit_kmh),
            config.flash,
        )?;
        Ok(Self { config, monitor })
    }

    /// Change the limit, clamped into `0..=200` km/h, and re-evaluate
    /// against the last speed. Returns the limit applied. NaN is ignored.
    pub fn set_limit(&self, kmh: f32) -> f32 {
        if kmh.is_nan() {
            return self.limit();
        }
        let limit = kmh.clamp(0.0, MAX_SPEED_LIMIT_KMH);
        // band is finite after the clamp
        if self.monitor.set_band(self.config.band(limit)).is_ok() {
            tracing::debug!(limit_kmh = limit, "speed limit changed");
        }
        limit
    }

    /// Step to the next preset above the current limit, wrapping to the
    /// lowest. Returns the limit applied.
    pub fn cycle_preset(&self) -> f32 {
        let current = self.limit();
        let next = SPEED_LIMIT_PRESETS_KMH
            .iter()
            .copied()
            .find(|preset| *preset > current)
            .or_else(|| SPEED_LIMIT_PRESETS_KMH.first().copied())
            .unwrap_or(current);
        self.set_limit(next)
    }

    /// Current limit, km/h.
    pub fn limit(&self) -> f32 {
        self.monitor.band().threshold
    }

    /// Whether the alert is raised.
    pub fn is_active(&self) -> bool {
        self.monitor.is_active()
    }

    /// Flash intensity at `elapsed_secs`, `None` while inactive.
    pub fn pulse(&self, elapsed_secs: f64) -> Option<f32> {
        self.monitor.pulse(elapsed_secs)
    }

    /// Last speed seen, km/h.
    pub fn last_speed(&self) -> Option<f32> {
        self.monitor.last_value()
    }
}
