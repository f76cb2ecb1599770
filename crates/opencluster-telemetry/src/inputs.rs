//! Per-tick control inputs.

use serde::{Deserialize, Serialize};

/// Lead-vehicle speed change applied while the "faster"/"slower" control is
/// held, km/h per second.
pub const LEAD_SPEED_RATE_KMH_PER_S: f32 = 40.0;

/// Gap change applied while the "closer"/"farther" control is held, metres
/// per second.
pub const LEAD_DISTANCE_RATE_M_PER_S: f32 = 10.0;

/// Discrete driver controls plus the closing-scenario adjustments.
///
/// `lead_speed_delta` and `lead_distance_delta` are rates; the simulator
/// multiplies them by `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlInputs {
    /// Accelerator held.
    pub throttle: bool,
    /// Brake held.
    pub brake: bool,
    /// Steering left held. Wins over `steer_right` when both are held.
    pub steer_left: bool,
    /// Steering right held.
    pub steer_right: bool,
    /// Lead vehicle speed rate, km/h per second.
    pub lead_speed_delta: f32,
    /// Gap rate, metres per second. Negative closes the gap.
    pub lead_distance_delta: f32,
}

impl ControlInputs {
    /// No control held.
    pub const IDLE: Self = Self {
        throttle: false,
        brake: false,
        steer_left: false,
        steer_right: false,
        lead_speed_delta: 0.0,
        lead_distance_delta: 0.0,
    };

    /// Throttle only.
    #[must_use]
    pub const fn throttle() -> Self {
        Self {
            throttle: true,
            ..Self::IDLE
        }
    }

    /// Brake only.
    #[must_use]
    pub const fn brake() -> Self {
        Self {
            brake: true,
            ..Self::IDLE
        }
    }

    /// Hold left steering.
    #[must_use]
    pub const fn with_left(mut self) -> Self {
        self.steer_left = true;
        self
    }

    /// Hold right steering.
    #[must_use]
    pub const fn with_right(mut self) -> Self {
        self.steer_right = true;
        self
    }

    /// Set the closing-scenario rates.
    #[must_use]
    pub const fn with_lead(mut self, speed_delta: f32, distance_delta: f32) -> Self {
        self.lead_speed_delta = speed_delta;
        self.lead_distance_delta = distance_delta;
        self
    }

    /// Steering target in `{-1, 0, 1}`; left is negative.
    pub const fn steer_target(&self) -> f32 {
        if self.steer_left {
            -1.0
        } else if self.steer_right {
            1.0
        } else {
            0.0
        }
    }

    /// Any steering control held.
    pub const fn is_steering(&self) -> bool {
        self.steer_left || self.steer_right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_wins_over_right() {
        let inputs = ControlInputs::IDLE.with_left().with_right();
        assert!(inputs.steer_target() < 0.0);
        assert!(inputs.is_steering());
    }

    #[test]
    fn test_idle_has_no_target() {
        assert!(ControlInputs::default().steer_target().abs() < f32::EPSILON);
        assert!(!ControlInputs::IDLE.is_steering());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let inputs: ControlInputs = serde_json::from_str(r#"{"throttle":true}"#)?;
        assert_eq!(inputs, ControlInputs::throttle());
        Ok(())
    }
}
