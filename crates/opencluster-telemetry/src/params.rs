//! Vehicle model constants.

use serde::{Deserialize, Serialize};

use crate::error::{TelemetryError, TelemetryResult};

/// Tunable constants of the vehicle model.
///
/// `Default` reproduces the stock cluster tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParams {
    /// Top speed, km/h.
    pub max_speed_kmh: f32,
    /// Idle engine speed, rpm.
    pub idle_rpm: f32,
    /// Redline, rpm.
    pub max_rpm: f32,
    /// Acceleration under throttle, km/h per second.
    pub throttle_accel: f32,
    /// Minimum coasting deceleration, km/h per second.
    pub coast_decel_base: f32,
    /// Speed-proportional coasting drag, 1/s.
    pub coast_decel_factor: f32,
    /// Extra deceleration while braking, km/h per second.
    pub brake_decel: f32,
    /// Exponential follow rate of rpm toward its target, 1/s.
    pub rpm_follow: f32,
    /// Target rpm bonus while the throttle is held.
    pub rpm_throttle_blip: f32,
    /// Steering wind-up rate, units per second.
    pub steer_accel: f32,
    /// Steering self-centering rate, units per second.
    pub steer_return: f32,
    /// Yaw rate at full lock, rad/s.
    pub yaw_rate_max: f32,
    /// Standard gravity, m/s².
    pub gravity: f32,
    /// Roll degrees per unit of steering.
    pub roll_gain_deg: f32,
    /// Roll magnitude limit, degrees.
    pub roll_limit_deg: f32,
    /// Exponential follow rate of roll toward its target, 1/s.
    pub roll_follow: f32,
    /// Lead vehicle speed at start, km/h.
    pub initial_lead_speed_kmh: f32,
    /// Gap to the lead vehicle at start, metres.
    pub initial_distance_m: f32,
    /// Smallest modelled gap, metres.
    pub min_distance_m: f32,
    /// Largest modelled gap, metres.
    pub max_distance_m: f32,
    /// Time-to-collision reported when the gap is not closing, seconds.
    pub ttc_sentinel_s: f32,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            max_speed_kmh: 185.0,
            idle_rpm: 1700.0,
            max_rpm: 5500.0,
            throttle_accel: 10.0,
            coast_decel_base: 1.5,
            coast_decel_factor: 0.015,
            brake_decel: 28.5,
            rpm_follow: 6.0,
            rpm_throttle_blip: 300.0,
            steer_accel: 2.0,
            steer_return: 3.0,
            yaw_rate_max: 0.9,
            gravity: 9.81,
            roll_gain_deg: 20.0,
            roll_limit_deg: 30.0,
            roll_follow: 5.0,
            initial_lead_speed_kmh: 10.0,
            initial_distance_m: 25.0,
            min_distance_m: 0.5,
            max_distance_m: 200.0,
            ttc_sentinel_s: 999.0,
        }
    }
}

impl VehicleParams {
    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidParameter`] for the first value that
    /// is not finite or breaks an ordering constraint.
    pub fn validate(&self) -> TelemetryResult<()> {
        let fields = [
            ("max_speed_kmh", self.max_speed_kmh),
            ("idle_rpm", self.idle_rpm),
            ("max_rpm", self.max_rpm),
            ("throttle_accel", self.throttle_accel),
            ("coast_decel_base", self.coast_decel_base),
            ("coast_decel_factor", self.coast_decel_factor),
            ("brake_decel", self.brake_decel),
            ("rpm_follow", self.rpm_follow),
            ("rpm_throttle_blip", self.rpm_throttle_blip),
            ("steer_accel", self.steer_accel),
            ("steer_return", self.steer_return),
            ("yaw_rate_max", self.yaw_rate_max),
            ("gravity", self.gravity),
            ("roll_gain_deg", self.roll_gain_deg),
            ("roll_limit_deg", self.roll_limit_deg),
            ("roll_follow", self.roll_follow),
            ("initial_lead_speed_kmh", self.initial_lead_speed_kmh),
            ("initial_distance_m", self.initial_distance_m),
            ("min_distance_m", self.min_distance_m),
            ("max_distance_m", self.max_distance_m),
            ("ttc_sentinel_s", self.ttc_sentinel_s),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(TelemetryError::invalid(name, "must be finite"));
            }
            if value < 0.0 {
                return Err(TelemetryError::invalid(name, "must not be negative"));
            }
        }

        if self.max_speed_kmh <= 0.0 {
            return Err(TelemetryError::invalid(
                "max_speed_kmh",
                "must be greater than 0",
            ));
        }
        if self.max_rpm <= self.idle_rpm {
            return Err(TelemetryError::invalid(
                "max_rpm",
                "must be greater than idle_rpm",
            ));
        }
        if self.gravity <= 0.0 {
            return Err(TelemetryError::invalid("gravity", "must be greater than 0"));
        }
        if self.min_distance_m <= 0.0 {
            return Err(TelemetryError::invalid(
                "min_distance_m",
                "must be greater than 0",
            ));
        }
        if self.max_distance_m <= self.min_distance_m {
            return Err(TelemetryError::invalid(
                "max_distance_m",
                "must be greater than min_distance_m",
            ));
        }
        if !(self.min_distance_m..=self.max_distance_m).contains(&self.initial_distance_m) {
            return Err(TelemetryError::invalid(
                "initial_distance_m",
                "must lie within [min_distance_m, max_distance_m]",
            ));
        }
        Ok(())
    }

    /// Create a parameter builder.
    #[must_use]
    pub fn builder() -> VehicleParamsBuilder {
        VehicleParamsBuilder::default()
    }
}

/// Builder for [`VehicleParams`].
#[derive(Debug, Default)]
pub struct VehicleParamsBuilder {
    params: VehicleParams,
}

impl VehicleParamsBuilder {
    /// Set top speed.
    #[must_use]
    pub fn max_speed_kmh(mut self, kmh: f32) -> Self {
        self.params.max_speed_kmh = kmh;
        self
    }

    /// Set idle and redline rpm.
    #[must_use]
    pub fn rpm_range(mut self, idle: f32, max: f32) -> Self {
        self.params.idle_rpm = idle;
        self.params.max_rpm = max;
        self
    }

    /// Set throttle acceleration.
    #[must_use]
    pub fn throttle_accel(mut self, kmh_per_s: f32) -> Self {
        self.params.throttle_accel = kmh_per_s;
        self
    }

    /// Set brake deceleration.
    #[must_use]
    pub fn brake_decel(mut self, kmh_per_s: f32) -> Self {
        self.params.brake_decel = kmh_per_s;
        self
    }

    /// Set the starting lead speed and gap.
    #[must_use]
    pub fn lead(mut self, speed_kmh: f32, distance_m: f32) -> Self {
        self.params.initial_lead_speed_kmh = speed_kmh;
        self.params.initial_distance_m = distance_m;
        self
    }

    /// Build the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid.
    pub fn build(self) -> TelemetryResult<VehicleParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(VehicleParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_rpm_range() {
        let result = VehicleParams::builder().rpm_range(6000.0, 5500.0).build();
        assert!(matches!(
            result,
            Err(TelemetryError::InvalidParameter { name: "max_rpm", .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite() {
        let params = VehicleParams {
            brake_decel: f32::NAN,
            ..VehicleParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(TelemetryError::invalid("brake_decel", "must be finite"))
        );
    }

    #[test]
    fn test_rejects_initial_gap_outside_clamp() {
        let result = VehicleParams::builder().lead(10.0, 500.0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_overrides() -> TelemetryResult<()> {
        let params = VehicleParams::builder()
            .max_speed_kmh(120.0)
            .throttle_accel(20.0)
            .build()?;
        assert!((params.max_speed_kmh - 120.0).abs() < f32::EPSILON);
        assert!((params.throttle_accel - 20.0).abs() < f32::EPSILON);
        Ok(())
    }
}
