//! Per-type subscriber list with snapshot dispatch.

use core::fmt;
use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::error::HandlerResult;

/// Shared handler for events of type `T`.
///
/// Identity is the `Rc` allocation: clone the handle to unsubscribe later.
pub type Handler<T> = Rc<dyn Fn(&T) -> HandlerResult>;

/// Wrap a closure as a [`Handler`].
pub fn handler<T, F>(f: F) -> Handler<T>
where
    F: Fn(&T) -> HandlerResult + 'static,
{
    Rc::new(f)
}

/// Outcome of one publish call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Handlers that returned `Ok`.
    pub delivered: usize,
    /// Handlers that returned `Err` or panicked.
    pub failed: usize,
}

impl DispatchReport {
    /// Total handlers invoked.
    pub fn invoked(&self) -> usize {
        self.delivered.saturating_add(self.failed)
    }

    /// No handler failed.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl core::ops::AddAssign for DispatchReport {
    fn add_assign(&mut self, rhs: Self) {
        self.delivered = self.delivered.saturating_add(rhs.delivered);
        self.failed = self.failed.saturating_add(rhs.failed);
    }
}

/// Ordered handler list for one event type.
pub struct Channel<T> {
    handlers: RefCell<Vec<Handler<T>>>,
}

impl<T> Channel<T> {
    /// Empty channel.
    pub const fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Append `handler`. Returns `false` if that exact handler is already
    /// registered.
    pub fn subscribe(&self, handler: &Handler<T>) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        if handlers.iter().any(|h| Rc::ptr_eq(h, handler)) {
            return false;
        }
        handlers.push(Rc::clone(handler));
        true
    }

    /// Remove `handler`. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, handler: &Handler<T>) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|h| !Rc::ptr_eq(h, handler));
        handlers.len() != before
    }

    /// Whether `handler` is registered.
    pub fn contains(&self, handler: &Handler<T>) -> bool {
        self.handlers.borrow().iter().any(|h| Rc::ptr_eq(h, handler))
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// No handlers registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }

    /// Drop every handler.
    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }

    /// Deliver `event` to the handlers registered at call time, in
    /// subscription order.
    ///
    /// The list is copied before the first handler runs, so handlers may
    /// subscribe, unsubscribe or publish without affecting this dispatch.
    /// Errors and panics are logged and counted; delivery always continues.
    pub fn dispatch(&self, kind: &'static str, event: &T) -> DispatchReport {
        let snapshot: Vec<Handler<T>> = {
            let handlers = self.handlers.borrow();
            if handlers.is_empty() {
                return DispatchReport::default();
            }
            handlers.clone()
        };

        let mut report = DispatchReport::default();
        for (index, handler) in snapshot.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(Ok(())) => report.delivered = report.delivered.saturating_add(1),
                Ok(Err(error)) => {
                    tracing::warn!(event = kind, handler = index, %error, "event handler failed");
                    report.failed = report.failed.saturating_add(1);
                }
                Err(payload) => {
                    tracing::error!(
                        event = kind,
                        handler = index,
                        panic = panic_message(payload.as_ref()),
                        "event handler panicked"
                    );
                    report.failed = report.failed.saturating_add(1);
                }
            }
        }
        report
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("handlers", &self.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
