//! Event recorder: collects every published event in delivery order.

use core::fmt;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use opencluster_contracts::{
    AlertChanged, ClusterEvent, DriveGearChanged, GChanged, GearSelectorChanged, ModeChanged,
    RollChanged, RpmChanged, SpeedChanged, ThemeChanged, TtcChanged, TurnSignalChanged,
};

use crate::bus::{BusEvent, EventBus};
use crate::channel::handler;

type Detach = Box<dyn Fn(&EventBus)>;

/// Bus subscriber that records [`ClusterEvent`]s.
///
/// Subscribes to every channel on [`EventRecorder::attach`] and removes
/// its handlers on [`EventRecorder::detach`] or drop.
pub struct EventRecorder {
    bus: Weak<EventBus>,
    events: Rc<RefCell<Vec<ClusterEvent>>>,
    detachers: Vec<Detach>,
}

impl EventRecorder {
    /// Subscribe a new recorder to all channels of `bus`.
    pub fn attach(bus: &Rc<EventBus>) -> Self {
        let mut recorder = Self {
            bus: Rc::downgrade(bus),
            events: Rc::new(RefCell::new(Vec::new())),
            detachers: Vec::new(),
        };
        recorder.track::<SpeedChanged>(bus);
        recorder.track::<RpmChanged>(bus);
        recorder.track::<RollChanged>(bus);
        recorder.track::<GChanged>(bus);
        recorder.track::<TtcChanged>(bus);
        recorder.track::<GearSelectorChanged>(bus);
        recorder.track::<DriveGearChanged>(bus);
        recorder.track::<ModeChanged>(bus);
        recorder.track::<ThemeChanged>(bus);
        recorder.track::<AlertChanged>(bus);
        recorder.track::<TurnSignalChanged>(bus);
        recorder
    }

    fn track<T>(&mut self, bus: &EventBus)
    where
        T: BusEvent + Clone + Into<ClusterEvent>,
    {
        let sink = Rc::clone(&self.events);
        let h = handler(move |event: &T| {
            sink.borrow_mut().push(event.clone().into());
            Ok(())
        });
        bus.subscribe(&h);
        self.detachers.push(Box::new(move |bus: &EventBus| {
            bus.unsubscribe(&h);
        }));
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<ClusterEvent> {
        self.events.borrow().clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<ClusterEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Recorded events matching `predicate`.
    pub fn filter<F>(&self, predicate: F) -> Vec<ClusterEvent>
    where
        F: Fn(&ClusterEvent) -> bool,
    {
        self.events
            .borrow()
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    /// Count of recorded events whose [`ClusterEvent::kind`] is `kind`.
    pub fn count_kind(&self, kind: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.kind() == kind)
            .count()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Nothing recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Forget recorded events but stay subscribed.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Unsubscribe from the bus. Recorded events are kept.
    pub fn detach(&mut self) {
        let detachers = std::mem::take(&mut self.detachers);
        if let Some(bus) = self.bus.upgrade() {
            for detach in &detachers {
                detach(&bus);
            }
        }
    }

    /// Still subscribed.
    pub fn is_attached(&self) -> bool {
        !self.detachers.is_empty() && self.bus.strong_count() > 0
    }
}

impl Drop for EventRecorder {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for EventRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRecorder")
            .field("events", &self.len())
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_delivery_order() {
        let bus = Rc::new(EventBus::new());
        let recorder = EventRecorder::attach(&bus);
        bus.publish(SpeedChanged { kmh: 1.0 });
        bus.publish(DriveGearChanged { gear: 2 });
        let kinds: Vec<&str> = recorder.events().iter().map(ClusterEvent::kind).collect();
        assert_eq!(kinds, vec!["speed", "drive_gear"]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = Rc::new(EventBus::new());
        {
            let _recorder = EventRecorder::attach(&bus);
            assert_eq!(bus.total_subscribers(), 11);
        }
        assert_eq!(bus.total_subscribers(), 0);
    }

    #[test]
    fn test_detach_keeps_events() {
        let bus = Rc::new(EventBus::new());
        let mut recorder = EventRecorder::attach(&bus);
        bus.publish(RpmChanged { rpm: 1700.0 });
        recorder.detach();
        bus.publish(RpmChanged { rpm: 1800.0 });
        assert_eq!(recorder.len(), 1);
        assert!(!recorder.is_attached());
        assert_eq!(recorder.count_kind("rpm"), 1);
    }

    #[test]
    fn test_take_drains() {
        let bus = Rc::new(EventBus::new());
        let recorder = EventRecorder::attach(&bus);
        bus.publish(TtcChanged { seconds: 3.0 });
        assert_eq!(recorder.take().len(), 1);
        assert!(recorder.is_empty());
    }
}
