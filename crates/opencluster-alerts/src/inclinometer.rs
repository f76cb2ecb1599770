//! Inclinometer colour band.

use serde::{Deserialize, Serialize};

/// Largest roll shown by the inclinometer, degrees.
pub const ROLL_DISPLAY_LIMIT_DEG: f32 = 30.0;

/// Roll below this magnitude reads as level.
pub const ROLL_CAUTION_DEG: f32 = 10.0;

/// Roll below this magnitude reads as caution.
pub const ROLL_CRITICAL_DEG: f32 = 20.0;

/// Severity of the current roll angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollBand {
    /// `|roll| < 10°`.
    #[default]
    Level,
    /// `10° <= |roll| < 20°`.
    Caution,
    /// `|roll| >= 20°`.
    Critical,
}

impl RollBand {
    /// Band for `deg`, after clamping to the display range. NaN reads as
    /// level.
    pub fn classify(deg: f32) -> Self {
        let magnitude = display_roll(deg).abs();
        if magnitude < ROLL_CAUTION_DEG {
            RollBand::Level
        } else if magnitude < ROLL_CRITICAL_DEG {
            RollBand::Caution
        } else {
            RollBand::Critical
        }
    }

    /// Lower-case label.
    pub const fn as_str(self) -> &'static str {
        match self {
            RollBand::Level => "level",
            RollBand::Caution => "caution",
            RollBand::Critical => "critical",
        }
    }
}

/// Roll clamped to `±30°`; NaN becomes `0`.
pub fn display_roll(deg: f32) -> f32 {
    if deg.is_nan() {
        return 0.0;
    }
    deg.clamp(-ROLL_DISPLAY_LIMIT_DEG, ROLL_DISPLAY_LIMIT_DEG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_are_symmetric() {
        for (deg, band) in [
            (0.0, RollBand::Level),
            (9.9, RollBand::Level),
            (10.0, RollBand::Caution),
            (19.9, RollBand::Caution),
            (20.0, RollBand::Critical),
            (90.0, RollBand::Critical),
        ] {
            assert_eq!(RollBand::classify(deg), band);
            assert_eq!(RollBand::classify(-deg), band);
        }
    }

    #[test]
    fn test_display_roll_clamps() {
        assert!((display_roll(45.0) - 30.0).abs() < f32::EPSILON);
        assert!((display_roll(-45.0) + 30.0).abs() < f32::EPSILON);
        assert!(display_roll(f32::NAN).abs() < f32::EPSILON);
        assert_eq!(RollBand::classify(f32::NAN), RollBand::Level);
    }
}
