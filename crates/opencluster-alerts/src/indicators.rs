//! Turn-signal indicator.

use std::cell::Cell;
use std::rc::Rc;

use opencluster_bus::EventBus;
use opencluster_contracts::{TurnSignalChanged, TurnSignalState};
use serde::{Deserialize, Serialize};

use crate::error::{AlertError, AlertResult};

/// Blink cadence of the indicator lamps, seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkTiming {
    /// Lit portion of a cycle.
    pub on_s: f32,
    /// Dark portion of a cycle.
    pub off_s: f32,
}

impl Default for BlinkTiming {
    fn default() -> Self {
        Self {
            on_s: 0.25,
            off_s: 0.25,
        }
    }
}

impl BlinkTiming {
    /// Validate the cadence.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::InvalidTiming`] unless `on_s > 0`, `off_s >= 0`
    /// and both are finite.
    pub fn validate(&self) -> AlertResult<()> {
        if !self.on_s.is_finite() || self.on_s <= 0.0 {
            return Err(AlertError::InvalidTiming(
                "on_s must be finite and greater than 0".into(),
            ));
        }
        if !self.off_s.is_finite() || self.off_s < 0.0 {
            return Err(AlertError::InvalidTiming(
                "off_s must be finite and not negative".into(),
            ));
        }
        Ok(())
    }

    /// Whether the blink phase is lit at `elapsed_secs`.
    pub fn is_lit(&self, elapsed_secs: f64) -> bool {
        let on = f64::from(self.on_s);
        let period = on + f64::from(self.off_s);
        if !elapsed_secs.is_finite() || period <= 0.0 {
            return false;
        }
        elapsed_secs.rem_euclid(period) < on
    }
}

/// Lamp outputs for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnLamps {
    /// Left arrow lit.
    pub left: bool,
    /// Right arrow lit.
    pub right: bool,
}

/// Turn-signal stalk. Every command publishes `TurnSignalChanged`.
#[derive(Debug)]
pub struct TurnSignalController {
    bus: Rc<EventBus>,
    timing: BlinkTiming,
    state: Cell<TurnSignalState>,
}

impl TurnSignalController {
    /// New controller in the `Off` position.
    ///
    /// # Errors
    ///
    /// Returns an error if `timing` is invalid.
    pub fn new(bus: &Rc<EventBus>, timing: BlinkTiming) -> AlertResult<Self> {
        timing.validate()?;
        Ok(Self {
            bus: Rc::clone(bus),
            timing,
            state: Cell::new(TurnSignalState::Off),
        })
    }

    /// Switch to `state`, or back to `Off` if already there.
    pub fn toggle(&self, state: TurnSignalState) -> TurnSignalState {
        let next = if self.state.get() == state {
            TurnSignalState::Off
        } else {
            state
        };
        self.set(next)
    }

    /// Switch to `state`.
    pub fn set(&self, state: TurnSignalState) -> TurnSignalState {
        let previous = self.state.replace(state);
        if previous != state {
            tracing::debug!(from = %previous, to = %state, "turn signal changed");
        }
        self.bus.publish(TurnSignalChanged { state });
        state
    }

    /// Switch off.
    pub fn clear(&self) -> TurnSignalState {
        self.set(TurnSignalState::Off)
    }

    /// Current position.
    pub fn state(&self) -> TurnSignalState {
        self.state.get()
    }

    /// Blink cadence.
    pub fn timing(&self) -> BlinkTiming {
        self.timing
    }

    /// Lamps lit at `elapsed_secs`.
    pub fn lamps(&self, elapsed_secs: f64) -> TurnLamps {
        lamps_for(self.state.get(), &self.timing, elapsed_secs)
    }
}

/// Lamps lit for `state` at `elapsed_secs`.
pub fn lamps_for(state: TurnSignalState, timing: &BlinkTiming, elapsed_secs: f64) -> TurnLamps {
    let lit = timing.is_lit(elapsed_secs);
    TurnLamps {
        left: lit && state.left_active(),
        right: lit && state.right_active(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencluster_bus::EventRecorder;
    use opencluster_contracts::ClusterEvent;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_toggle_twice_returns_to_off() -> TestResult {
        let bus = Rc::new(EventBus::new());
        let signals = TurnSignalController::new(&bus, BlinkTiming::default())?;
        assert_eq!(signals.toggle(TurnSignalState::Left), TurnSignalState::Left);
        assert_eq!(signals.toggle(TurnSignalState::Left), TurnSignalState::Off);
        assert_eq!(signals.toggle(TurnSignalState::Right), TurnSignalState::Right);
        assert_eq!(signals.toggle(TurnSignalState::Hazard), TurnSignalState::Hazard);
        Ok(())
    }

    #[test]
    fn test_every_command_publishes() -> TestResult {
        let bus = Rc::new(EventBus::new());
        let recorder = EventRecorder::attach(&bus);
        let signals = TurnSignalController::new(&bus, BlinkTiming::default())?;
        signals.set(TurnSignalState::Left);
        signals.set(TurnSignalState::Left);
        signals.clear();
        assert_eq!(
            recorder.events(),
            vec![
                ClusterEvent::TurnSignal(TurnSignalChanged {
                    state: TurnSignalState::Left
                }),
                ClusterEvent::TurnSignal(TurnSignalChanged {
                    state: TurnSignalState::Left
                }),
                ClusterEvent::TurnSignal(TurnSignalChanged {
                    state: TurnSignalState::Off
                }),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lamp_cadence() {
        let timing = BlinkTiming::default();
        let hazard = |t| lamps_for(TurnSignalState::Hazard, &timing, t);
        assert_eq!(hazard(0.1), TurnLamps { left: true, right: true });
        assert_eq!(hazard(0.3), TurnLamps::default());
        assert_eq!(hazard(0.6), TurnLamps { left: true, right: true });

        let left = lamps_for(TurnSignalState::Left, &timing, 0.1);
        assert_eq!(left, TurnLamps { left: true, right: false });
        assert_eq!(lamps_for(TurnSignalState::Off, &timing, 0.1), TurnLamps::default());
    }

    #[test]
    fn test_timing_validation() {
        let zero_on = BlinkTiming {
            on_s: 0.0,
            off_s: 0.25,
        };
        assert!(zero_on.validate().is_err());
        let steady = BlinkTiming {
            on_s: 1.0,
            off_s: 0.0,
        };
        assert!(steady.validate().is_ok());
        assert!(steady.is_lit(123.4));
    }
}
