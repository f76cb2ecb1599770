//! Integration tests for re-entrant dispatch and failure isolation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use opencluster_bus::prelude::*;
use opencluster_contracts::{ClusterEvent, RpmChanged, SpeedChanged, TtcChanged};

fn log() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn test_delivery_follows_subscription_order() {
    let bus = EventBus::new();
    let seen = log();
    let mut handles = Vec::new();
    for name in ["a", "b", "c"] {
        let seen = Rc::clone(&seen);
        handles.push(bus.on(move |_: &SpeedChanged| {
            seen.borrow_mut().push(name.to_string());
            Ok(())
        }));
    }

    bus.publish(SpeedChanged { kmh: 10.0 });
    assert_eq!(*seen.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn test_subscribe_during_dispatch_waits_for_next_publish() {
    let bus = Rc::new(EventBus::new());
    let seen = log();
    let late_seen = Rc::clone(&seen);
    let late = handler(move |_: &SpeedChanged| {
        late_seen.borrow_mut().push("late".to_string());
        Ok(())
    });

    let weak: Weak<EventBus> = Rc::downgrade(&bus);
    let late_for_adder = Rc::clone(&late);
    let adder_seen = Rc::clone(&seen);
    let _adder = bus.on(move |_: &SpeedChanged| {
        adder_seen.borrow_mut().push("adder".to_string());
        if let Some(bus) = weak.upgrade() {
            bus.subscribe(&late_for_adder);
        }
        Ok(())
    });

    let first = bus.publish(SpeedChanged { kmh: 1.0 });
    assert_eq!(first.delivered, 1);
    assert_eq!(*seen.borrow(), vec!["adder"]);

    let second = bus.publish(SpeedChanged { kmh: 2.0 });
    assert_eq!(second.delivered, 2);
    assert_eq!(*seen.borrow(), vec!["adder", "adder", "late"]);
}

#[test]
fn test_unsubscribe_during_dispatch_keeps_current_snapshot() {
    let bus = Rc::new(EventBus::new());
    let seen = log();

    let victim_seen = Rc::clone(&seen);
    let victim = handler(move |_: &RpmChanged| {
        victim_seen.borrow_mut().push("victim".to_string());
        Ok(())
    });

    let weak = Rc::downgrade(&bus);
    let victim_ref = Rc::clone(&victim);
    let _remover = bus.on(move |_: &RpmChanged| {
        if let Some(bus) = weak.upgrade() {
            bus.unsubscribe(&victim_ref);
        }
        Ok(())
    });
    bus.subscribe(&victim);

    bus.publish(RpmChanged { rpm: 2000.0 });
    assert_eq!(seen.borrow().len(), 1);

    bus.publish(RpmChanged { rpm: 2100.0 });
    assert_eq!(seen.borrow().len(), 1);
    assert!(!bus.is_subscribed(&victim));
}

#[test]
fn test_handler_may_unsubscribe_itself() {
    let bus = Rc::new(EventBus::new());
    let calls = Rc::new(RefCell::new(0u32));
    let slot: Rc<RefCell<Option<Handler<TtcChanged>>>> = Rc::new(RefCell::new(None));

    let weak = Rc::downgrade(&bus);
    let slot_inner = Rc::downgrade(&slot);
    let calls_inner = Rc::clone(&calls);
    let once = bus.on(move |_: &TtcChanged| {
        *calls_inner.borrow_mut() += 1;
        let own = slot_inner.upgrade().and_then(|s| s.borrow_mut().take());
        if let (Some(bus), Some(own)) = (weak.upgrade(), own) {
            bus.unsubscribe(&own);
        }
        Ok(())
    });
    *slot.borrow_mut() = Some(once);

    bus.publish(TtcChanged { seconds: 5.0 });
    bus.publish(TtcChanged { seconds: 4.0 });
    assert_eq!(*calls.borrow(), 1);
    assert_eq!(bus.subscriber_count::<TtcChanged>(), 0);
}

#[test]
fn test_nested_publish_completes_before_outer_continues() {
    let bus = Rc::new(EventBus::new());
    let recorder = EventRecorder::attach(&bus);

    let weak = Rc::downgrade(&bus);
    let _relay = bus.on(move |e: &SpeedChanged| {
        if let Some(bus) = weak.upgrade() {
            bus.publish(RpmChanged { rpm: e.kmh * 100.0 });
        }
        Ok(())
    });

    bus.publish(SpeedChanged { kmh: 20.0 });
    let kinds: Vec<&str> = recorder.events().iter().map(ClusterEvent::kind).collect();
    // recorder subscribed first, so it sees speed before the relay fires
    assert_eq!(kinds, vec!["speed", "rpm"]);
}

#[test]
#[expect(clippy::panic, reason = "exercises panic isolation")]
fn test_faulty_handlers_do_not_stop_delivery() {
    let bus = EventBus::new();
    let seen = log();

    let _err = bus.on(|_: &SpeedChanged| Err(HandlerError::failed("display offline")));
    let _boom = bus.on(|_: &SpeedChanged| panic!("gauge exploded"));
    let ok_seen = Rc::clone(&seen);
    let _ok = bus.on(move |e: &SpeedChanged| {
        ok_seen.borrow_mut().push(format!("{:.0}", e.kmh));
        Ok(())
    });

    for kmh in [10.0, 20.0] {
        let report = bus.publish(SpeedChanged { kmh });
        assert_eq!(report.failed, 2);
        assert_eq!(report.delivered, 1);
    }
    assert_eq!(*seen.borrow(), vec!["10", "20"]);
}

#[test]
fn test_publish_without_subscribers_repeatedly() {
    let bus = EventBus::new();
    for i in 0..10_000u32 {
        let report = bus.publish(TtcChanged {
            seconds: f32::from(u16::try_from(i % 100).unwrap_or(0)),
        });
        assert_eq!(report, DispatchReport::default());
    }
    assert_eq!(bus.total_subscribers(), 0);
}
