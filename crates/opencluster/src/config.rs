//! Cluster configuration.
//!
//! One immutable value built at startup. Every section falls back to the
//! stock tuning when omitted, so an empty document is a valid config.

use std::fs;
use std::path::Path;

use opencluster_alerts::{BlinkTiming, FcwConfig, RpmAlertConfig, SpeedLimitConfig};
use opencluster_gear::ShiftSchedule;
use opencluster_modes::{ModeCatalog, ThemeConfig, presets};
use opencluster_telemetry::VehicleParams;
use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, ClusterResult};

/// Settings for every cluster component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Vehicle model.
    pub vehicle: VehicleParams,
    /// Automatic gearbox boundaries.
    pub gears: ShiftSchedule,
    /// Speed-limit alert.
    pub speed_limit: SpeedLimitConfig,
    /// Shift light.
    pub rpm_alert: RpmAlertConfig,
    /// Forward-collision warning.
    pub fcw: FcwConfig,
    /// Indicator blink cadence.
    pub turn_signals: BlinkTiming,
    /// Terrain mode active at start, by name.
    pub default_mode: String,
    /// Day/night theme switching.
    pub theme: ThemeConfig,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            vehicle: VehicleParams::default(),
            gears: ShiftSchedule::default(),
            speed_limit: SpeedLimitConfig::default(),
            rpm_alert: RpmAlertConfig::default(),
            fcw: FcwConfig::default(),
            turn_signals: BlinkTiming::default(),
            default_mode: presets::ROAD.to_string(),
            theme: ThemeConfig::default(),
        }
    }
}

impl ClusterConfig {
    /// Start a builder from the defaults.
    #[must_use]
    pub fn builder() -> ClusterConfigBuilder {
        ClusterConfigBuilder::default()
    }

    /// Validate every section and resolve the default mode against the
    /// stock catalog.
    ///
    /// # Errors
    ///
    /// Returns the first section error found.
    pub fn validate(&self) -> ClusterResult<()> {
        self.vehicle.validate()?;
        self.gears.validate()?;
        self.speed_limit.validate()?;
        self.rpm_alert.validate()?;
        self.fcw.validate()?;
        self.turn_signals.validate()?;
        self.theme.validate()?;
        let catalog = ModeCatalog::stock();
        if !catalog.contains(&self.default_mode) {
            return Err(ClusterError::InvalidConfig(format!(
                "default_mode `{}` is not one of {}",
                self.default_mode,
                catalog.names().join(", ")
            )));
        }
        Ok(())
    }

    /// Read and validate a YAML (`.yaml`, `.yml`) or JSON (`.json`) file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown
    /// extension, does not parse, or fails validation.
    pub fn load(path: impl AsRef<Path>) -> ClusterResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ClusterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = match format {
            ConfigFormat::Yaml => Self::from_yaml_str(&content)?,
            ConfigFormat::Json => Self::from_json_str(&content)?,
        };
        tracing::debug!(path = %path.display(), "loaded cluster config");
        Ok(config)
    }

    /// Parse and validate YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or fails validation.
    pub fn from_yaml_str(content: &str) -> ClusterResult<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or fails validation.
    pub fn from_json_str(content: &str) -> ClusterResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> ClusterResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Render as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ClusterResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ClusterResult<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ClusterError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Builder for [`ClusterConfig`].
#[derive(Debug, Default)]
pub struct ClusterConfigBuilder {
    config: ClusterConfig,
}

impl ClusterConfigBuilder {
    /// Replace the vehicle model.
    #[must_use]
    pub fn vehicle(mut self, vehicle: VehicleParams) -> Self {
        self.config.vehicle = vehicle;
        self
    }

    /// Replace the shift schedule.
    #[must_use]
    pub fn gears(mut self, gears: ShiftSchedule) -> Self {
        self.config.gears = gears;
        self
    }

    /// Set the initial speed limit, km/h.
    #[must_use]
    pub fn speed_limit_kmh(mut self, kmh: f32) -> Self {
        self.config.speed_limit.limit_kmh = kmh;
        self
    }

    /// Set the shift-light threshold, rpm.
    #[must_use]
    pub fn rpm_threshold(mut self, rpm: f32) -> Self {
        self.config.rpm_alert.threshold_rpm = rpm;
        self
    }

    /// Set the FCW warning and critical TTC levels, seconds.
    #[must_use]
    pub fn fcw_levels(mut self, warning_s: f32, critical_s: f32) -> Self {
        self.config.fcw.warning_ttc_s = warning_s;
        self.config.fcw.critical_ttc_s = critical_s;
        self
    }

    /// Set the indicator cadence.
    #[must_use]
    pub fn turn_signals(mut self, timing: BlinkTiming) -> Self {
        self.config.turn_signals = timing;
        self
    }

    /// Set the starting terrain mode.
    #[must_use]
    pub fn default_mode(mut self, name: impl Into<String>) -> Self {
        self.config.default_mode = name.into();
        self
    }

    /// Set theme switching.
    #[must_use]
    pub fn theme(mut self, theme: ThemeConfig) -> Self {
        self.config.theme = theme;
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// See [`ClusterConfig::validate`].
    pub fn build(self) -> ClusterResult<ClusterConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
