//! Bus-attached telemetry simulator.

use std::rc::Rc;

use opencluster_bus::{DispatchReport, EventBus};
use opencluster_contracts::{GChanged, RollChanged, RpmChanged, SpeedChanged, TtcChanged};

use crate::error::TelemetryResult;
use crate::inputs::ControlInputs;
use crate::math::sanitize_dt;
use crate::params::VehicleParams;
use crate::state::{TelemetryFrame, VehicleState};

/// Advances the vehicle model and publishes its signals.
///
/// Every [`TelemetrySimulator::tick`] publishes, in order, `SpeedChanged`,
/// `RpmChanged`, `RollChanged`, `GChanged` and `TtcChanged`. All handlers
/// have run by the time `tick` returns.
#[derive(Debug)]
pub struct TelemetrySimulator {
    bus: Rc<EventBus>,
    params: VehicleParams,
    state: VehicleState,
    ticks: u64,
    last_dispatch: DispatchReport,
}

impl TelemetrySimulator {
    /// Create a simulator with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fail validation.
    pub fn new(bus: Rc<EventBus>, params: VehicleParams) -> TelemetryResult<Self> {
        params.validate()?;
        Ok(Self::with_valid_params(bus, params))
    }

    /// Create a simulator with the stock tuning.
    pub fn with_defaults(bus: Rc<EventBus>) -> Self {
        Self::with_valid_params(bus, VehicleParams::default())
    }

    fn with_valid_params(bus: Rc<EventBus>, params: VehicleParams) -> Self {
        Self {
            bus,
            state: VehicleState::initial(&params),
            params,
            ticks: 0,
            last_dispatch: DispatchReport::default(),
        }
    }

    /// Advance by `dt` seconds and publish the new signals.
    ///
    /// `dt` below 1e-4 s, or not finite, is treated as 1e-4 s.
    pub fn tick(&mut self, inputs: &ControlInputs, dt: f32) -> TelemetryFrame {
        let dt = sanitize_dt(dt);
        self.state.advance(&self.params, inputs, dt);
        self.ticks = self.ticks.saturating_add(1);
        let frame = TelemetryFrame::capture(self.ticks, &self.state);

        tracing::trace!(
            tick = frame.tick,
            speed_kmh = frame.speed_kmh,
            rpm = frame.rpm,
            ttc_s = frame.ttc_s,
            "telemetry tick"
        );

        let mut report = self.bus.publish(SpeedChanged {
            kmh: frame.speed_kmh,
        });
        report += self.bus.publish(RpmChanged { rpm: frame.rpm });
        report += self.bus.publish(RollChanged {
            deg: frame.roll_deg,
        });
        report += self.bus.publish(GChanged {
            lateral: frame.g_lateral,
            longitudinal: frame.g_longitudinal,
        });
        report += self.bus.publish(TtcChanged {
            seconds: frame.ttc_s,
        });
        self.last_dispatch = report;

        frame
    }

    /// Return to the start-of-simulation state. Subscribers are untouched.
    pub fn reset(&mut self) {
        self.state = VehicleState::initial(&self.params);
        self.ticks = 0;
        self.last_dispatch = DispatchReport::default();
        tracing::debug!("telemetry simulator reset");
    }

    /// Current state.
    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    /// Parameters in use.
    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    /// Ticks since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Combined dispatch outcome of the most recent tick.
    pub fn last_dispatch(&self) -> DispatchReport {
        self.last_dispatch
    }

    /// Bus this simulator publishes to.
    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }
}
