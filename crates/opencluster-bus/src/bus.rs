//! Typed event bus with one channel per cluster event kind.

use core::fmt;

use opencluster_contracts::{
    AlertChanged, DriveGearChanged, GChanged, GearSelectorChanged, ModeChanged, RollChanged,
    RpmChanged, SpeedChanged, ThemeChanged, TtcChanged, TurnSignalChanged,
};

use crate::channel::{Channel, DispatchReport, Handler};
use crate::error::HandlerResult;

/// Payload type that has a channel on [`EventBus`].
pub trait BusEvent: Sized + 'static {
    /// Label used in logs.
    const KIND: &'static str;

    /// Channel carrying this payload.
    fn channel(bus: &EventBus) -> &Channel<Self>;
}

macro_rules! event_bus {
    ($($field:ident: $payload:ty => $kind:literal),* $(,)?) => {
        /// Synchronous, single-threaded publish/subscribe hub.
        ///
        /// Share it as `Rc<EventBus>`; components capture `Weak` references
        /// in their handlers.
        #[derive(Default)]
        pub struct EventBus {
            $($field: Channel<$payload>,)*
        }

        $(
            impl BusEvent for $payload {
                const KIND: &'static str = $kind;

                fn channel(bus: &EventBus) -> &Channel<Self> {
                    &bus.$field
                }
            }
        )*

        impl EventBus {
            /// Handlers registered across every channel.
            pub fn total_subscribers(&self) -> usize {
                0usize $(.saturating_add(self.$field.len()))*
            }

            /// Remove every handler from every channel.
            pub fn clear(&self) {
                $(self.$field.clear();)*
            }
        }

        impl fmt::Debug for EventBus {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct("EventBus")
                    $(.field($kind, &self.$field.len()))*
                    .finish()
            }
        }
    };
}

event_bus! {
    speed: SpeedChanged => "speed",
    rpm: RpmChanged => "rpm",
    roll: RollChanged => "roll",
    g: GChanged => "g",
    ttc: TtcChanged => "ttc",
    gear_selector: GearSelectorChanged => "gear_selector",
    drive_gear: DriveGearChanged => "drive_gear",
    mode: ModeChanged => "mode",
    theme: ThemeChanged => "theme",
    alert: AlertChanged => "alert",
    turn_signal: TurnSignalChanged => "turn_signal",
}

impl EventBus {
    /// Empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `T`. Duplicate registration is a no-op
    /// returning `false`.
    pub fn subscribe<T: BusEvent>(&self, handler: &Handler<T>) -> bool {
        T::channel(self).subscribe(handler)
    }

    /// Remove `handler` for `T`. Unknown handlers are ignored and yield
    /// `false`.
    pub fn unsubscribe<T: BusEvent>(&self, handler: &Handler<T>) -> bool {
        T::channel(self).unsubscribe(handler)
    }

    /// Wrap `f`, subscribe it and hand back the handle for a later
    /// [`EventBus::unsubscribe`].
    pub fn on<T, F>(&self, f: F) -> Handler<T>
    where
        T: BusEvent,
        F: Fn(&T) -> HandlerResult + 'static,
    {
        let handler = crate::channel::handler(f);
        T::channel(self).subscribe(&handler);
        handler
    }

    /// Deliver `event` synchronously to every handler registered for `T`.
    pub fn publish<T: BusEvent>(&self, event: T) -> DispatchReport {
        T::channel(self).dispatch(T::KIND, &event)
    }

    /// Handlers currently registered for `T`.
    pub fn subscriber_count<T: BusEvent>(&self) -> usize {
        T::channel(self).len()
    }

    /// Whether `handler` is registered for `T`.
    pub fn is_subscribed<T: BusEvent>(&self, handler: &Handler<T>) -> bool {
        T::channel(self).contains(handler)
    }
}
