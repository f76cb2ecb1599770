//! Forward-collision warning.
//!
//! Two independent falling bands watch time-to-collision: a general
//! warning and a stricter critical level that drives the brake flash.

use std::rc::Rc;

use opencluster_bus::EventBus;
use opencluster_contracts::{AlertKind, TtcChanged};
use opencluster_telemetry::math::inverse_lerp;
use serde::{Deserialize, Serialize};

use crate::error::{AlertError, AlertResult};
use crate::monitor::AlertMonitor;
use crate::pulse::PulseConfig;
use crate::threshold::HysteresisBand;

/// Forward-collision warning settings. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FcwConfig {
    /// General warning at or below this TTC.
    pub warning_ttc_s: f32,
    /// General warning releases at `warning_ttc_s + warning_margin_s`.
    pub warning_margin_s: f32,
    /// Critical brake warning at or below this TTC.
    pub critical_ttc_s: f32,
    /// Critical warning releases at `critical_ttc_s + critical_margin_s`.
    pub critical_margin_s: f32,
    /// TTC at which the danger level starts rising from 0.
    pub danger_far_s: f32,
    /// TTC at which the danger level reaches 1.
    pub danger_near_s: f32,
    /// Largest TTC shown on the readout.
    pub display_cap_s: f32,
    /// Flash of the general warning.
    pub warning_flash: PulseConfig,
    /// Flash of the brake warning.
    pub brake_flash: PulseConfig,
}

impl Default for FcwConfig {
    fn default() -> Self {
        Self {
            warning_ttc_s: 2.0,
            warning_margin_s: 0.5,
            critical_ttc_s: 1.0,
            critical_margin_s: 0.25,
            danger_far_s: 4.0,
            danger_near_s: 0.5,
            display_cap_s: 99.9,
            warning_flash: PulseConfig::ALERT_FLASH,
            brake_flash: PulseConfig::BRAKE_FLASH,
        }
    }
}

impl FcwConfig {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is not finite or negative, the critical
    /// level is not below the warning level, the danger range is inverted,
    /// or a flash is invalid.
    pub fn validate(&self) -> AlertResult<()> {
        let fields = [
            ("warning_ttc_s", self.warning_ttc_s),
            ("warning_margin_s", self.warning_margin_s),
            ("critical_ttc_s", self.critical_ttc_s),
            ("critical_margin_s", self.critical_margin_s),
            ("danger_far_s", self.danger_far_s),
            ("danger_near_s", self.danger_near_s),
            ("display_cap_s", self.display_cap_s),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(AlertError::InvalidBand(format!(
                    "{name} must be finite and not negative"
                )));
            }
        }
        if self.critical_ttc_s >= self.warning_ttc_s {
            return Err(AlertError::InvalidBand(
                "critical_ttc_s must be below warning_ttc_s".into(),
            ));
        }
        if self.danger_near_s >= self.danger_far_s {
            return Err(AlertError::InvalidBand(
                "danger_near_s must be below danger_far_s".into(),
            ));
        }
        self.warning_flash.validate()?;
        self.brake_flash.validate()
    }

    /// General warning band.
    pub fn warning_band(&self) -> HysteresisBand {
        HysteresisBand::falling(self.warning_ttc_s, self.warning_margin_s)
    }

    /// Critical brake warning band.
    pub fn critical_band(&self) -> HysteresisBand {
        HysteresisBand::falling(self.critical_ttc_s, self.critical_margin_s)
    }
}

/// Colour zone of the TTC readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FcwZone {
    /// Above the warning level.
    Clear,
    /// Between the critical and warning levels.
    Caution,
    /// At or below the critical level.
    Critical,
}

impl FcwZone {
    /// Zone for `ttc_s` under `config`. NaN reads as clear.
    pub fn classify(ttc_s: f32, config: &FcwConfig) -> Self {
        if ttc_s.is_nan() || ttc_s > config.warning_ttc_s {
            FcwZone::Clear
        } else if ttc_s > config.critical_ttc_s {
            FcwZone::Caution
        } else {
            FcwZone::Critical
        }
    }
}

/// Forward-collision warning driven by `TtcChanged`.
///
/// Publishes [`AlertKind::FcwWarning`] and [`AlertKind::FcwCritical`]
/// transitions independently.
#[derive(Debug)]
pub struct ForwardCollisionWarning {
    config: FcwConfig,
    warning: AlertMonitor<TtcChanged>,
    critical: AlertMonitor<TtcChanged>,
}

impl ForwardCollisionWarning {
    /// Subscribe both bands to TTC updates on `bus`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn attach(bus: &Rc<EventBus>, config: FcwConfig) -> AlertResult<Self> {
        config.validate()?;
        let warning = AlertMonitor::attach(
            bus,
            AlertKind::FcwWarning,
            config.warning_band(),
            config.warning_flash,
        )?;
        let critical = AlertMonitor::attach(
            bus,
            AlertKind::FcwCritical,
            config.critical_band(),
            config.brake_flash,
        )?;
        Ok(Self {
            config,
            warning,
            critical,
        })
    }

    /// General warning raised.
    pub fn is_warning(&self) -> bool {
        self.warning.is_active()
    }

    /// Critical brake warning raised.
    pub fn is_critical(&self) -> bool {
        self.critical.is_active()
    }

    /// Last TTC received, seconds.
    pub fn ttc(&self) -> Option<f32> {
        self.warning.last_value()
    }

    /// Danger in `[0, 1]`: 0 at or beyond `danger_far_s`, 1 at or inside
    /// `danger_near_s`. 0 before the first sample.
    pub fn danger_level(&self) -> f32 {
        self.ttc().map_or(0.0, |ttc| {
            let ttc = ttc.clamp(self.config.danger_near_s, self.config.danger_far_s);
            inverse_lerp(self.config.danger_far_s, self.config.danger_near_s, ttc)
        })
    }

    /// Readout zone. Clear before the first sample.
    pub fn zone(&self) -> FcwZone {
        self.ttc()
            .map_or(FcwZone::Clear, |ttc| FcwZone::classify(ttc, &self.config))
    }

    /// TTC for the readout, capped at `display_cap_s`.
    pub fn display_ttc(&self) -> Option<f32> {
        self.ttc().map(|ttc| ttc.min(self.config.display_cap_s))
    }

    /// General warning flash, `None` while inactive.
    pub fn warning_pulse(&self, elapsed_secs: f64) -> Option<f32> {
        self.warning.pulse(elapsed_secs)
    }

    /// Brake flash, `None` unless the critical warning is raised.
    pub fn brake_pulse(&self, elapsed_secs: f64) -> Option<f32> {
        self.critical.pulse(elapsed_secs)
    }

    /// Settings in use.
    pub fn config(&self) -> &FcwConfig {
        &self.config
    }
}
