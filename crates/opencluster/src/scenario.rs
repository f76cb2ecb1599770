//! Scripted driving scenarios.
//!
//! A scenario is a list of timed input segments. Past the last segment its
//! inputs hold indefinitely.

use core::fmt;
use core::str::FromStr;

use opencluster_telemetry::{ControlInputs, LEAD_DISTANCE_RATE_M_PER_S};
use serde::{Deserialize, Serialize};

use crate::error::ClusterError;

/// Inputs held for a fixed time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Seconds the inputs are held.
    pub duration_s: f32,
    /// Inputs for the whole segment.
    pub inputs: ControlInputs,
}

impl Segment {
    const fn new(duration_s: f32, inputs: ControlInputs) -> Self {
        Self { duration_s, inputs }
    }
}

/// Stock driving scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Full throttle from rest through the gears, then coast.
    Launch,
    /// Accelerate to about 90 km/h and hover around it.
    Cruise,
    /// Accelerate, then brake to a stop.
    BrakeTest,
    /// Weave left and right at moderate speed.
    Slalom,
    /// Run up on the lead vehicle until the critical warning fires, then
    /// brake.
    Closing,
}

impl Scenario {
    /// Every scenario.
    pub const ALL: [Scenario; 5] = [
        Scenario::Launch,
        Scenario::Cruise,
        Scenario::BrakeTest,
        Scenario::Slalom,
        Scenario::Closing,
    ];

    /// Stable snake_case name.
    pub const fn name(self) -> &'static str {
        match self {
            Scenario::Launch => "launch",
            Scenario::Cruise => "cruise",
            Scenario::BrakeTest => "brake_test",
            Scenario::Slalom => "slalom",
            Scenario::Closing => "closing",
        }
    }

    /// One-line description.
    pub const fn description(self) -> &'static str {
        match self {
            Scenario::Launch => "full throttle for 15 s, then coast",
            Scenario::Cruise => "reach 90 km/h and hover around the limit",
            Scenario::BrakeTest => "accelerate for 10 s, then brake to a stop",
            Scenario::Slalom => "alternate left and right steering at 50 km/h",
            Scenario::Closing => "close on the lead vehicle, then brake",
        }
    }

    /// Input segments in order.
    pub fn segments(self) -> Vec<Segment> {
        let throttle = ControlInputs::throttle();
        let idle = ControlInputs::IDLE;
        match self {
            Scenario::Launch => vec![Segment::new(15.0, throttle), Segment::new(0.0, idle)],
            Scenario::Cruise => {
                let mut segments = vec![Segment::new(9.0, throttle)];
                for _ in 0..4 {
                    segments.push(Segment::new(3.0, idle));
                    segments.push(Segment::new(0.5, throttle));
                }
                segments.push(Segment::new(0.0, idle));
                segments
            }
            Scenario::BrakeTest => vec![
                Segment::new(10.0, throttle),
                Segment::new(0.0, ControlInputs::brake()),
            ],
            Scenario::Slalom => {
                let mut segments = vec![Segment::new(5.0, throttle)];
                for _ in 0..4 {
                    segments.push(Segment::new(1.5, idle.with_left()));
                    segments.push(Segment::new(1.5, idle.with_right()));
                }
                segments.push(Segment::new(0.0, idle));
                segments
            }
            Scenario::Closing => vec![
                Segment::new(6.0, throttle),
                Segment::new(
                    1.5,
                    throttle.with_lead(0.0, -LEAD_DISTANCE_RATE_M_PER_S),
                ),
                Segment::new(0.0, ControlInputs::brake()),
            ],
        }
    }

    /// Length of the scripted part, seconds.
    pub fn duration(self) -> f32 {
        self.segments().iter().map(|s| s.duration_s).sum()
    }

    /// Inputs active at `t` seconds. Before 0 the first segment applies;
    /// past the end the last one holds.
    pub fn inputs_at(self, t: f32) -> ControlInputs {
        let segments = self.segments();
        let mut start = 0.0;
        for segment in &segments {
            let end = start + segment.duration_s;
            if t < end {
                return segment.inputs;
            }
            start = end;
        }
        segments
            .last()
            .map_or(ControlInputs::IDLE, |segment| segment.inputs)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = ClusterError;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == key)
            .ok_or_else(|| ClusterError::UnknownScenario {
                name: s.to_string(),
                available: Scenario::ALL
                    .iter()
                    .map(|scenario| scenario.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
