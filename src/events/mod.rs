//! Events module - typed bus, compact serialization, session logging

pub mod bus;
pub mod format;
pub mod logger;
pub mod types;

pub use bus::{BusEvent, EventBus, update_event_bus_time};
pub use format::serialize_event;
pub use logger::{EventBuffer, EventLogConfig, EventLogger, log_bus_events};
pub use types::{GameConfig, GameEvent};
