//! In-process admin alert events.
//!
//! - [`EventBus`]: publish/subscribe hub over `tokio::sync::broadcast`.
//! - [`AdminEvent`]: the event envelope handlers publish after a mutation.
//! - [`EventLogger`]: background subscriber that writes every event to the
//!   log.
//!
//! Delivery is best effort. A subscriber that falls behind skips events and
//! nothing is retried or stored.

pub mod bus;
pub mod logger;

pub use bus::{event_types, AdminEvent, EntityRef, EventBus};
pub use logger::EventLogger;
