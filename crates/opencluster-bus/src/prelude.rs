//! Common imports for bus users

pub use crate::bus::{BusEvent, EventBus};
pub use crate::channel::{DispatchReport, Handler, handler};
pub use crate::error::{HandlerError, HandlerResult};
pub use crate::recorder::EventRecorder;
