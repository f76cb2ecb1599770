//! Generic bus-attached threshold alert.

use core::fmt;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use opencluster_bus::{BusEvent, EventBus, Handler, HandlerError, handler};
use opencluster_contracts::{AlertChanged, AlertKind, RpmChanged, SpeedChanged, TtcChanged};

use crate::error::AlertResult;
use crate::pulse::PulseConfig;
use crate::threshold::{HysteresisBand, ThresholdAlert};

/// Event that carries the scalar an alert watches.
pub trait AlertSignal: BusEvent {
    /// Watched value.
    fn value(&self) -> f32;
}

impl AlertSignal for SpeedChanged {
    fn value(&self) -> f32 {
        self.kmh
    }
}

impl AlertSignal for RpmChanged {
    fn value(&self) -> f32 {
        self.rpm
    }
}

impl AlertSignal for TtcChanged {
    fn value(&self) -> f32 {
        self.seconds
    }
}

/// Publish `AlertChanged` for a transition, if any.
pub(crate) fn announce(bus: &EventBus, alert: AlertKind, transition: Option<bool>, value: f32) {
    if let Some(active) = transition {
        if active {
            tracing::info!(alert = %alert, value, "alert raised");
        } else {
            tracing::info!(alert = %alert, value, "alert cleared");
        }
        bus.publish(AlertChanged { alert, active });
    }
}

/// Threshold alert that follows signal `E` on the bus.
///
/// Publishes `AlertChanged` on every activation and release. While active,
/// [`AlertMonitor::pulse`] yields the flash intensity for a timestamp.
pub struct AlertMonitor<E: AlertSignal> {
    kind: AlertKind,
    pulse: PulseConfig,
    bus: Rc<EventBus>,
    alert: Rc<RefCell<ThresholdAlert>>,
    on_signal: Handler<E>,
}

impl<E: AlertSignal> AlertMonitor<E> {
    /// Validate `band` and `pulse` and subscribe to `E` on `bus`.
    ///
    /// # Errors
    ///
    /// Returns an error if the band or pulse is invalid.
    pub fn attach(
        bus: &Rc<EventBus>,
        kind: AlertKind,
        band: HysteresisBand,
        pulse: PulseConfig,
    ) -> AlertResult<Self> {
        band.validate()?;
        pulse.validate()?;

        let alert = Rc::new(RefCell::new(ThresholdAlert::new(band)));
        let weak_alert: Weak<RefCell<ThresholdAlert>> = Rc::downgrade(&alert);
        let weak_bus: Weak<EventBus> = Rc::downgrade(bus);
        let on_signal = handler(move |event: &E| {
            let Some(alert) = weak_alert.upgrade() else {
                return Ok(());
            };
            let value = event.value();
            let transition = {
                let Ok(mut alert) = alert.try_borrow_mut() else {
                    return Err(HandlerError::busy(kind.as_str()));
                };
                alert.update(value)
            };
            if let Some(bus) = weak_bus.upgrade() {
                announce(&bus, kind, transition, value);
            }
            Ok(())
        });
        bus.subscribe(&on_signal);

        Ok(Self {
            kind,
            pulse,
            bus: Rc::clone(bus),
            alert,
            on_signal,
        })
    }

    /// Alert identifier.
    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    /// Whether the alert is raised.
    pub fn is_active(&self) -> bool {
        self.alert.borrow().is_active()
    }

    /// Flash intensity at `elapsed_secs`, `None` while inactive.
    pub fn pulse(&self, elapsed_secs: f64) -> Option<f32> {
        self.is_active()
            .then(|| self.pulse.intensity(elapsed_secs))
    }

    /// Pulse configuration.
    pub fn pulse_config(&self) -> PulseConfig {
        self.pulse
    }

    /// Band in use.
    pub fn band(&self) -> HysteresisBand {
        self.alert.borrow().band()
    }

    /// Last non-NaN sample received.
    pub fn last_value(&self) -> Option<f32> {
        self.alert.borrow().last_value()
    }

    /// Replace the band, re-evaluate against the last sample and publish
    /// any resulting transition.
    ///
    /// # Errors
    ///
    /// Returns an error if `band` is invalid; the old band stays in place.
    pub fn set_band(&self, band: HysteresisBand) -> AlertResult<()> {
        band.validate()?;
        let (transition, value) = {
            let mut alert = self.alert.borrow_mut();
            let transition = alert.set_band(band);
            (transition, alert.last_value().unwrap_or(f32::NAN))
        };
        announce(&self.bus, self.kind, transition, value);
        Ok(())
    }
}

impl<E: AlertSignal> Drop for AlertMonitor<E> {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.on_signal);
    }
}

impl<E: AlertSignal> fmt::Debug for AlertMonitor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertMonitor")
            .field("kind", &self.kind)
            .field("alert", &*self.alert.borrow())
            .field("pulse", &self.pulse)
            .finish_non_exhaustive()
    }
}
