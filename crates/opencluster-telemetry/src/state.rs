//! Vehicle state and the per-tick integration step.

use serde::{Deserialize, Serialize};

use crate::inputs::ControlInputs;
use crate::math::{clamp01, clamp_or_min, kmh_to_ms, lerp, move_towards};
use crate::params::VehicleParams;

/// Mutable vehicle model state.
///
/// Owned by [`crate::TelemetrySimulator`]; exposed read-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Speed, km/h, in `[0, max_speed_kmh]`.
    pub speed_kmh: f32,
    /// Engine speed, in `[idle_rpm, max_rpm]`.
    pub rpm: f32,
    /// Body roll, degrees, in `[-roll_limit, roll_limit]`.
    pub roll_deg: f32,
    /// Smoothed steering, `[-1, 1]`, left negative.
    pub steer: f32,
    /// Lateral acceleration, g.
    pub g_lateral: f32,
    /// Longitudinal acceleration, g.
    pub g_longitudinal: f32,
    /// Speed at the end of the previous tick, m/s.
    pub prev_speed_ms: f32,
    /// Lead vehicle speed, km/h, never negative.
    pub lead_speed_kmh: f32,
    /// Gap to the lead vehicle, metres.
    pub distance_m: f32,
    /// Time-to-collision, seconds, or the sentinel when not closing.
    pub ttc_s: f32,
}

impl VehicleState {
    /// Start-of-simulation state: stationary at idle.
    pub fn initial(params: &VehicleParams) -> Self {
        Self {
            speed_kmh: 0.0,
            rpm: params.idle_rpm,
            roll_deg: 0.0,
            steer: 0.0,
            g_lateral: 0.0,
            g_longitudinal: 0.0,
            prev_speed_ms: 0.0,
            lead_speed_kmh: params.initial_lead_speed_kmh,
            distance_m: params.initial_distance_m,
            ttc_s: params.ttc_sentinel_s,
        }
    }

    /// Advance by `dt` seconds. `dt` must already be sanitized.
    pub(crate) fn advance(&mut self, params: &VehicleParams, inputs: &ControlInputs, dt: f32) {
        // longitudinal
        let mut speed = self.speed_kmh;
        if inputs.throttle {
            speed += params.throttle_accel * dt;
        } else {
            let coast = params
                .coast_decel_base
                .max(params.coast_decel_factor * speed);
            speed -= coast * dt;
        }
        if inputs.brake {
            speed -= params.brake_decel * dt;
        }
        self.speed_kmh = clamp_or_min(speed, 0.0, params.max_speed_kmh);

        // engine
        let t = clamp01(self.speed_kmh / params.max_speed_kmh);
        let mut target_rpm = lerp(params.idle_rpm, params.max_rpm, t);
        if inputs.throttle {
            target_rpm += params.rpm_throttle_blip;
        }
        let target_rpm = target_rpm.clamp(params.idle_rpm, params.max_rpm);
        self.rpm = clamp_or_min(
            lerp(self.rpm, target_rpm, dt * params.rpm_follow),
            params.idle_rpm,
            params.max_rpm,
        );

        // steering
        let rate = if inputs.is_steering() {
            params.steer_accel
        } else {
            params.steer_return
        };
        self.steer = move_towards(self.steer, inputs.steer_target(), rate * dt).clamp(-1.0, 1.0);

        // accelerations, estimated from the previous tick's speed
        let ego_ms = kmh_to_ms(self.speed_kmh);
        let a_long = (ego_ms - self.prev_speed_ms) / dt;
        let yaw_rate = self.steer * params.yaw_rate_max;
        let a_lat = ego_ms * yaw_rate;
        self.g_longitudinal = a_long / params.gravity;
        self.g_lateral = a_lat / params.gravity;

        // roll
        let limit = params.roll_limit_deg;
        let target_roll = (self.steer * params.roll_gain_deg).clamp(-limit, limit);
        self.roll_deg =
            lerp(self.roll_deg, target_roll, dt * params.roll_follow).clamp(-limit, limit);

        // closing scenario
        let lead = self.lead_speed_kmh + inputs.lead_speed_delta * dt;
        self.lead_speed_kmh = if lead.is_nan() { 0.0 } else { lead.max(0.0) };
        self.distance_m = clamp_or_min(
            self.distance_m + inputs.lead_distance_delta * dt,
            params.min_distance_m,
            params.max_distance_m,
        );
        self.ttc_s = time_to_collision(
            ego_ms,
            kmh_to_ms(self.lead_speed_kmh),
            self.distance_m,
            params.ttc_sentinel_s,
        );

        self.prev_speed_ms = ego_ms;
    }
}

/// Seconds until the gap closes, or `sentinel` when it is not closing.
pub fn time_to_collision(ego_ms: f32, lead_ms: f32, distance_m: f32, sentinel: f32) -> f32 {
    let closing = (ego_ms - lead_ms).max(0.0);
    if closing > 0.0 {
        distance_m / closing
    } else {
        sentinel
    }
}

/// Everything published for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    /// Tick counter, starting at 1 for the first tick.
    pub tick: u64,
    /// Speed, km/h.
    pub speed_kmh: f32,
    /// Engine speed.
    pub rpm: f32,
    /// Roll, degrees.
    pub roll_deg: f32,
    /// Lateral acceleration, g.
    pub g_lateral: f32,
    /// Longitudinal acceleration, g.
    pub g_longitudinal: f32,
    /// Time-to-collision, seconds.
    pub ttc_s: f32,
    /// Lead vehicle speed, km/h.
    pub lead_speed_kmh: f32,
    /// Gap, metres.
    pub distance_m: f32,
}

impl TelemetryFrame {
    pub(crate) fn capture(tick: u64, state: &VehicleState) -> Self {
        Self {
            tick,
            speed_kmh: state.speed_kmh,
            rpm: state.rpm,
            roll_deg: state.roll_deg,
            g_lateral: state.g_lateral,
            g_longitudinal: state.g_longitudinal,
            ttc_s: state.ttc_s,
            lead_speed_kmh: state.lead_speed_kmh,
            distance_m: state.distance_m,
        }
    }
}
