//! Composition root.

use std::rc::Rc;

use opencluster_alerts::{
    FcwZone, ForwardCollisionWarning, RollBand, RpmAlert, SpeedLimitAlert, TurnLamps,
    TurnSignalController, display_roll,
};
use opencluster_bus::EventBus;
use opencluster_contracts::{AlertKind, GearSelector, TurnSignalState};
use opencluster_gear::GearShiftController;
use opencluster_modes::{ModeCatalog, TerrainModeCoordinator, ThemeController};
use opencluster_telemetry::math::sanitize_dt;
use opencluster_telemetry::{ControlInputs, TelemetryFrame, TelemetrySimulator};
use serde::{Deserialize, Serialize};

use crate::config::ClusterConfig;
use crate::error::ClusterResult;

/// State of one threshold alert at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertSnapshot {
    /// Which alert.
    pub alert: AlertKind,
    /// Raised.
    pub active: bool,
    /// Flash intensity while raised.
    pub intensity: Option<f32>,
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    /// Simulated seconds since start.
    pub elapsed_s: f64,
    /// Last tick's signals, `None` before the first tick.
    pub frame: Option<TelemetryFrame>,
    /// PRND position.
    pub selector: GearSelector,
    /// Drive gear, shown only in `D`.
    pub gear: Option<u8>,
    /// Active speed limit, km/h.
    pub speed_limit_kmh: f32,
    /// Threshold alerts in [`AlertKind::ALL`] order.
    pub alerts: Vec<AlertSnapshot>,
    /// TTC readout colour.
    pub fcw_zone: FcwZone,
    /// FCW danger in `[0, 1]`.
    pub fcw_danger: f32,
    /// TTC readout, seconds.
    pub ttc_display_s: Option<f32>,
    /// Roll shown on the inclinometer, degrees.
    pub roll_display_deg: f32,
    /// Inclinometer colour.
    pub roll_band: RollBand,
    /// Stalk position.
    pub turn_signal: TurnSignalState,
    /// Indicator lamps lit.
    pub lamps: TurnLamps,
    /// Active terrain mode.
    pub mode: String,
    /// Active colour theme.
    pub theme: String,
}

impl ClusterSnapshot {
    /// State of `alert`.
    pub fn alert(&self, alert: AlertKind) -> Option<&AlertSnapshot> {
        self.alerts.iter().find(|a| a.alert == alert)
    }

    /// Whether `alert` is raised.
    pub fn is_active(&self, alert: AlertKind) -> bool {
        self.alert(alert).is_some_and(|a| a.active)
    }
}

/// The whole instrument cluster wired to one bus.
///
/// Components are built in subscription order: gearbox first, then the
/// alerts, so every tick's `DriveGearChanged` precedes its alert changes.
#[derive(Debug)]
pub struct Cluster {
    config: ClusterConfig,
    bus: Rc<EventBus>,
    simulator: TelemetrySimulator,
    gear: GearShiftController,
    speed_limit: SpeedLimitAlert,
    rpm: RpmAlert,
    fcw: ForwardCollisionWarning,
    turn_signals: TurnSignalController,
    modes: TerrainModeCoordinator,
    themes: ThemeController,
    last_frame: Option<TelemetryFrame>,
    elapsed_s: f64,
}

impl Cluster {
    /// Validate `config` and wire every component to a fresh bus.
    ///
    /// # Errors
    ///
    /// Returns an error if any section of `config` is invalid.
    pub fn new(config: ClusterConfig) -> ClusterResult<Self> {
        config.validate()?;
        let bus = Rc::new(EventBus::new());
        let simulator = TelemetrySimulator::new(Rc::clone(&bus), config.vehicle)?;
        let gear = GearShiftController::attach(&bus, config.gears)?;
        let speed_limit = SpeedLimitAlert::attach(&bus, config.speed_limit)?;
        let rpm = RpmAlert::attach(&bus, config.rpm_alert)?;
        let fcw = ForwardCollisionWarning::attach(&bus, config.fcw)?;
        let turn_signals = TurnSignalController::new(&bus, config.turn_signals)?;
        let modes =
            TerrainModeCoordinator::with_catalog(&bus, ModeCatalog::stock(), &config.default_mode)?;
        let themes = ThemeController::new(&bus, config.theme)?;

        tracing::info!(
            mode = %modes.current().name,
            theme = %themes.current().name,
            speed_limit_kmh = speed_limit.limit(),
            subscribers = bus.total_subscribers(),
            "cluster ready"
        );

        Ok(Self {
            config,
            bus,
            simulator,
            gear,
            speed_limit,
            rpm,
            fcw,
            turn_signals,
            modes,
            themes,
            last_frame: None,
            elapsed_s: 0.0,
        })
    }

    /// Cluster with the stock configuration.
    ///
    /// # Errors
    ///
    /// Never fails for the stock configuration; the result mirrors
    /// [`Cluster::new`].
    pub fn with_defaults() -> ClusterResult<Self> {
        Self::new(ClusterConfig::default())
    }

    /// Advance the simulation by `dt` seconds. Every subscriber has seen
    /// the tick's events when this returns.
    pub fn tick(&mut self, inputs: &ControlInputs, dt: f32) -> TelemetryFrame {
        let frame = self.simulator.tick(inputs, dt);
        self.elapsed_s += f64::from(sanitize_dt(dt));
        self.last_frame = Some(frame);
        frame
    }

    /// Presentation state at `elapsed_secs` on the display clock.
    pub fn snapshot(&self, elapsed_secs: f64) -> ClusterSnapshot {
        let alerts = AlertKind::ALL
            .into_iter()
            .map(|alert| {
                let (active, intensity) = match alert {
                    AlertKind::SpeedLimit => (
                        self.speed_limit.is_active(),
                        self.speed_limit.pulse(elapsed_secs),
                    ),
                    AlertKind::RpmHigh => (self.rpm.is_active(), self.rpm.pulse(elapsed_secs)),
                    AlertKind::FcwWarning => {
                        (self.fcw.is_warning(), self.fcw.warning_pulse(elapsed_secs))
                    }
                    AlertKind::FcwCritical => {
                        (self.fcw.is_critical(), self.fcw.brake_pulse(elapsed_secs))
                    }
                };
                AlertSnapshot {
                    alert,
                    active,
                    intensity,
                }
            })
            .collect();
        let roll = self.last_frame.map_or(0.0, |frame| frame.roll_deg);

        ClusterSnapshot {
            elapsed_s: self.elapsed_s,
            frame: self.last_frame,
            selector: self.gear.selector(),
            gear: self.gear.displayed_gear(),
            speed_limit_kmh: self.speed_limit.limit(),
            alerts,
            fcw_zone: self.fcw.zone(),
            fcw_danger: self.fcw.danger_level(),
            ttc_display_s: self.fcw.display_ttc(),
            roll_display_deg: display_roll(roll),
            roll_band: RollBand::classify(roll),
            turn_signal: self.turn_signals.state(),
            lamps: self.turn_signals.lamps(elapsed_secs),
            mode: self.modes.current().name.clone(),
            theme: self.themes.current().name.clone(),
        }
    }

    /// Move the PRND selector.
    pub fn set_selector(&self, selector: GearSelector) {
        self.gear.set_selector(selector);
    }

    /// Select a terrain mode by name. Returns `true` if the mode changed.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown names.
    pub fn select_mode(&self, name: &str) -> ClusterResult<bool> {
        Ok(self.modes.select_by_name(name)?)
    }

    /// Feed the ambient light sensor, `[0, 1]`. Returns `true` if the
    /// theme changed; readings are ignored unless automatic switching is
    /// on.
    pub fn set_ambient_light(&self, level: f32) -> bool {
        self.themes.on_ambient_light(level)
    }

    /// Return the simulator to rest. Subscribers, selector, mode and alert
    /// states are kept; alerts settle on the next tick.
    pub fn reset(&mut self) {
        self.simulator.reset();
        self.last_frame = None;
        self.elapsed_s = 0.0;
    }

    /// Shared bus, for attaching recorders or extra consumers.
    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    /// Configuration in use.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Simulated seconds since start or the last reset.
    pub fn elapsed(&self) -> f64 {
        self.elapsed_s
    }

    /// Last tick's signals.
    pub fn last_frame(&self) -> Option<TelemetryFrame> {
        self.last_frame
    }

    /// Vehicle simulator.
    pub fn simulator(&self) -> &TelemetrySimulator {
        &self.simulator
    }

    /// Gearbox.
    pub fn gear(&self) -> &GearShiftController {
        &self.gear
    }

    /// Speed-limit alert.
    pub fn speed_limit(&self) -> &SpeedLimitAlert {
        &self.speed_limit
    }

    /// Shift light.
    pub fn rpm_alert(&self) -> &RpmAlert {
        &self.rpm
    }

    /// Forward-collision warning.
    pub fn fcw(&self) -> &ForwardCollisionWarning {
        &self.fcw
    }

    /// Turn-signal stalk.
    pub fn turn_signals(&self) -> &TurnSignalController {
        &self.turn_signals
    }

    /// Terrain mode coordinator.
    pub fn modes(&self) -> &TerrainModeCoordinator {
        &self.modes
    }

    /// Day/night theme.
    pub fn themes(&self) -> &ThemeController {
        &self.themes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencluster_bus::EventRecorder;
    use opencluster_contracts::{ClusterEvent, DriveGearChanged};
    use opencluster_modes::ThemeConfig;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_snapshot_before_first_tick() -> TestResult {
        let cluster = Cluster::with_defaults()?;
        let snapshot = cluster.snapshot(0.0);
        assert_eq!(snapshot.frame, None);
        assert_eq!(snapshot.selector, GearSelector::Neutral);
        assert_eq!(snapshot.gear, None);
        assert_eq!(snapshot.mode, "Road");
        assert_eq!(snapshot.fcw_zone, FcwZone::Clear);
        assert!(snapshot.alerts.iter().all(|a| !a.active && a.intensity.is_none()));
        Ok(())
    }

    #[test]
    fn test_launch_reaches_second_gear_at_thirty() -> TestResult {
        let mut cluster = Cluster::with_defaults()?;
        let recorder = EventRecorder::attach(cluster.bus());
        cluster.set_selector(GearSelector::Drive);

        let mut crossed = None;
        for _ in 0..400 {
            let frame = cluster.tick(&ControlInputs::throttle(), 0.01);
            if crossed.is_none() && frame.speed_kmh >= 30.0 {
                crossed = Some(frame.tick);
            }
            if crossed.is_some() {
                break;
            }
        }
        assert!(crossed.is_some());
        let shifts = recorder.filter(|e| matches!(e, ClusterEvent::DriveGear(_)));
        assert_eq!(
            shifts,
            vec![ClusterEvent::DriveGear(DriveGearChanged { gear: 2 })]
        );
        assert_eq!(cluster.snapshot(0.0).gear, Some(2));
        Ok(())
    }

    #[test]
    fn test_tick_ordering_within_a_tick() -> TestResult {
        let mut cluster = Cluster::with_defaults()?;
        let recorder = EventRecorder::attach(cluster.bus());
        cluster.tick(&ControlInputs::IDLE, 0.1);
        let kinds: Vec<&str> = recorder.events().iter().map(ClusterEvent::kind).collect();
        assert_eq!(kinds, vec!["speed", "rpm", "roll", "g", "ttc"]);
        Ok(())
    }

    #[test]
    fn test_elapsed_uses_sanitized_dt() -> TestResult {
        let mut cluster = Cluster::with_defaults()?;
        cluster.tick(&ControlInputs::IDLE, -1.0);
        cluster.tick(&ControlInputs::IDLE, f32::NAN);
        assert!((cluster.elapsed() - 2e-4).abs() < 1e-9);
        cluster.reset();
        assert!(cluster.elapsed().abs() < f64::EPSILON);
        assert_eq!(cluster.last_frame(), None);
        Ok(())
    }

    #[test]
    fn test_select_mode_by_name() -> TestResult {
        let cluster = Cluster::with_defaults()?;
        assert!(cluster.select_mode("SNOW")?);
        assert!(!cluster.select_mode("snow")?);
        assert!(cluster.select_mode("mud").is_err());
        assert_eq!(cluster.snapshot(0.0).mode, "Snow");
        Ok(())
    }

    #[test]
    fn test_ambient_light_switches_theme_when_auto() -> TestResult {
        let config = ClusterConfig::builder()
            .theme(ThemeConfig {
                auto: true,
                ..ThemeConfig::default()
            })
            .build()?;
        let cluster = Cluster::new(config)?;
        let recorder = EventRecorder::attach(cluster.bus());
        assert_eq!(cluster.snapshot(0.0).theme, "Day");

        assert!(cluster.set_ambient_light(0.2));
        assert_eq!(cluster.snapshot(0.0).theme, "Night");
        assert_eq!(recorder.count_kind("theme"), 1);
        Ok(())
    }

    #[test]
    fn test_ambient_light_ignored_by_default() -> TestResult {
        let cluster = Cluster::with_defaults()?;
        assert!(!cluster.set_ambient_light(0.0));
        assert_eq!(cluster.snapshot(0.0).theme, "Day");
        Ok(())
    }
}
