//! Engine-speed (shift light) alert.

use std::rc::Rc;

use opencluster_bus::EventBus;
use opencluster_contracts::{AlertKind, RpmChanged};
use serde::{Deserialize, Serialize};

use crate::error::{AlertError, AlertResult};
use crate::monitor::AlertMonitor;
use crate::pulse::PulseConfig;
use crate::threshold::HysteresisBand;

/// RPM alert settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpmAlertConfig {
    /// Activation threshold.
    pub threshold_rpm: f32,
    /// Release margin below the threshold.
    pub margin_rpm: f32,
    /// Flash while active.
    pub flash: PulseConfig,
}

impl Default for RpmAlertConfig {
    fn default() -> Self {
        Self {
            threshold_rpm: 4500.0,
            margin_rpm: 200.0,
            flash: PulseConfig::ALERT_FLASH,
        }
    }
}

impl RpmAlertConfig {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive or non-finite threshold, a
    /// negative margin, or an invalid flash.
    pub fn validate(&self) -> AlertResult<()> {
        if !self.threshold_rpm.is_finite() || self.threshold_rpm <= 0.0 {
            return Err(AlertError::InvalidBand(
                "rpm threshold must be finite and greater than 0".into(),
            ));
        }
        if !self.margin_rpm.is_finite() || self.margin_rpm < 0.0 {
            return Err(AlertError::InvalidBand(
                "rpm margin must be finite and not negative".into(),
            ));
        }
        self.flash.validate()
    }

    /// Band described by these settings.
    pub fn band(&self) -> HysteresisBand {
        HysteresisBand::rising(self.threshold_rpm, self.margin_rpm)
    }
}

/// Raises [`AlertKind::RpmHigh`] near the redline.
#[derive(Debug)]
pub struct RpmAlert {
    monitor: AlertMonitor<RpmChanged>,
}

impl RpmAlert {
    /// Subscribe to rpm updates on `bus`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn attach(bus: &Rc<EventBus>, config: RpmAlertConfig) -> AlertResult<Self> {
        config.validate()?;
        let monitor = AlertMonitor::attach(bus, AlertKind::RpmHigh, config.band(), config.flash)?;
        Ok(Self { monitor })
    }

    /// Whether the alert is raised.
    pub fn is_active(&self) -> bool {
        self.monitor.is_active()
    }

    /// Flash intensity at `elapsed_secs`, `None` while inactive.
    pub fn pulse(&self, elapsed_secs: f64) -> Option<f32> {
        self.monitor.pulse(elapsed_secs)
    }

    /// Activation threshold.
    pub fn threshold(&self) -> f32 {
        self.monitor.band().threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shift_light() -> AlertResult<()> {
        let bus = Rc::new(EventBus::new());
        let alert = RpmAlert::attach(&bus, RpmAlertConfig::default())?;
        assert!((alert.threshold() - 4500.0).abs() < f32::EPSILON);

        bus.publish(RpmChanged { rpm: 4500.0 });
        assert!(alert.is_active());
        bus.publish(RpmChanged { rpm: 4350.0 });
        assert!(alert.is_active());
        bus.publish(RpmChanged { rpm: 4300.0 });
        assert!(!alert.is_active());
        Ok(())
    }

    #[test]
    fn test_rejects_negative_margin() {
        let config = RpmAlertConfig {
            margin_rpm: -1.0,
            ..RpmAlertConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
