//! Bus-attached gear-shift controller.

use core::fmt;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use opencluster_bus::{EventBus, Handler, HandlerError, handler};
use opencluster_contracts::{DriveGearChanged, GearSelector, GearSelectorChanged, SpeedChanged};

use crate::error::GearResult;
use crate::schedule::ShiftSchedule;
use crate::state::GearState;

const COMPONENT: &str = "gear";

struct GearCore {
    schedule: ShiftSchedule,
    state: GearState,
}

/// Tracks the PRND selector and resolves the drive gear from
/// `SpeedChanged` events.
///
/// Publishes `GearSelectorChanged` on every [`GearShiftController::set_selector`]
/// call and `DriveGearChanged` whenever the resolved drive gear differs
/// from the previous one. Unsubscribes from the bus when dropped.
pub struct GearShiftController {
    bus: Rc<EventBus>,
    core: Rc<RefCell<GearCore>>,
    on_speed: Handler<SpeedChanged>,
}

impl GearShiftController {
    /// Validate `schedule` and subscribe to speed updates on `bus`.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule is invalid.
    pub fn attach(bus: &Rc<EventBus>, schedule: ShiftSchedule) -> GearResult<Self> {
        schedule.validate()?;
        Ok(Self::attach_validated(bus, schedule))
    }

    /// Attach with the stock schedule.
    pub fn with_default_schedule(bus: &Rc<EventBus>) -> Self {
        Self::attach_validated(bus, ShiftSchedule::default())
    }

    fn attach_validated(bus: &Rc<EventBus>, schedule: ShiftSchedule) -> Self {
        let core = Rc::new(RefCell::new(GearCore {
            schedule,
            state: GearState::new(),
        }));

        let weak_core: Weak<RefCell<GearCore>> = Rc::downgrade(&core);
        let weak_bus: Weak<EventBus> = Rc::downgrade(bus);
        let on_speed = handler(move |event: &SpeedChanged| {
            let Some(core) = weak_core.upgrade() else {
                return Ok(());
            };
            let changed = {
                let Ok(mut core) = core.try_borrow_mut() else {
                    return Err(HandlerError::busy(COMPONENT));
                };
                let schedule = core.schedule;
                core.state.on_speed(event.kmh, &schedule)
            };
            if let Some(gear) = changed {
                tracing::debug!(gear, speed_kmh = event.kmh, "drive gear changed");
                if let Some(bus) = weak_bus.upgrade() {
                    bus.publish(DriveGearChanged { gear });
                }
            }
            Ok(())
        });
        bus.subscribe(&on_speed);

        Self {
            bus: Rc::clone(bus),
            core,
            on_speed,
        }
    }

    /// Move the selector and publish `GearSelectorChanged`.
    ///
    /// Publishes even when `selector` equals the current position.
    pub fn set_selector(&self, selector: GearSelector) {
        let previous = {
            let mut core = self.core.borrow_mut();
            let previous = core.state.selector();
            core.state.set_selector(selector);
            previous
        };
        if previous != selector {
            tracing::debug!(from = %previous, to = %selector, "gear selector moved");
        }
        self.bus.publish(GearSelectorChanged { selector });
    }

    /// Parse `c` as `P`, `R`, `N` or `D` and move the selector.
    ///
    /// # Errors
    ///
    /// Returns an error for any other character; state is unchanged.
    pub fn set_selector_char(&self, c: char) -> GearResult<()> {
        let selector = GearSelector::try_from(c)?;
        self.set_selector(selector);
        Ok(())
    }

    /// Current selector.
    pub fn selector(&self) -> GearSelector {
        self.core.borrow().state.selector()
    }

    /// Drive gear, kept even outside `D`.
    pub fn drive_gear(&self) -> u8 {
        self.core.borrow().state.drive_gear()
    }

    /// Gear to show on the cluster, `Some` only in `D`.
    pub fn displayed_gear(&self) -> Option<u8> {
        self.core.borrow().state.displayed_gear()
    }

    /// Snapshot of the state machine.
    pub fn state(&self) -> GearState {
        self.core.borrow().state
    }

    /// Schedule in use.
    pub fn schedule(&self) -> ShiftSchedule {
        self.core.borrow().schedule
    }
}

impl Drop for GearShiftController {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.on_speed);
    }
}

impl fmt::Debug for GearShiftController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GearShiftController")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
