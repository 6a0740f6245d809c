//! Broadcast event bus shared as `Arc<EventBus>` through application state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use wayfarer_core::types::DbId;

/// Event names published by the API.
pub mod event_types {
    pub const DYNAMIC_TABLE_CREATED: &str = "dynamic_table.created";
    pub const DYNAMIC_TABLE_UPDATED: &str = "dynamic_table.updated";
    pub const DYNAMIC_TABLE_DELETED: &str = "dynamic_table.deleted";
    pub const DETAIL_PAGE_PROVISIONED: &str = "detail_page.provisioned";
    pub const CONTENT_CHANGED: &str = "content.changed";
    pub const ADMIN_LOGGED_IN: &str = "admin.logged_in";
}

/// The record an event is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity name, e.g. `"DynamicTable"`.
    pub kind: String,
    pub id: DbId,
}

/// Something an admin did that other admins may want to hear about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminEvent {
    /// Dot-separated name, see [`event_types`].
    pub event_type: String,
    pub entity: Option<EntityRef>,
    /// Admin user that caused the event.
    pub actor_id: Option<DbId>,
    /// Event-specific JSON.
    pub payload: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
}

impl AdminEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            entity: None,
            actor_id: None,
            payload: serde_json::Value::Object(Default::default()),
            occurred_at: Utc::now(),
        }
    }

    pub fn about(mut self, kind: impl Into<String>, id: DbId) -> Self {
        self.entity = Some(EntityRef {
            kind: kind.into(),
            id,
        });
        self
    }

    pub fn by(mut self, actor_id: DbId) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

const DEFAULT_CAPACITY: usize = 1024;

/// Fan-out bus: every subscriber sees every event published after it
/// subscribed.
///
/// ```rust
/// use wayfarer_events::{AdminEvent, EventBus};
///
/// let bus = EventBus::default();
/// let _rx = bus.subscribe();
/// assert_eq!(bus.publish(AdminEvent::new("dynamic_table.created")), 1);
/// ```
pub struct EventBus {
    sender: broadcast::Sender<AdminEvent>,
}

impl EventBus {
    /// Create a bus holding up to `capacity` unread events per subscriber.
    /// Older events are dropped for subscribers that fall further behind.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers, returning how many will see the
    /// event. With no subscribers the event is dropped.
    pub fn publish(&self, event: AdminEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AdminEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_enriched_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            AdminEvent::new(event_types::DYNAMIC_TABLE_CREATED)
                .about("DynamicTable", 12)
                .by(3)
                .with_payload(serde_json::json!({"title": "Deadlines"})),
        );

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, "dynamic_table.created");
        assert_eq!(
            event.entity,
            Some(EntityRef {
                kind: "DynamicTable".into(),
                id: 12
            })
        );
        assert_eq!(event.actor_id, Some(3));
        assert_eq!(event.payload["title"], "Deadlines");
    }

    #[tokio::test]
    async fn every_subscriber_gets_a_copy() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        assert_eq!(bus.publish(AdminEvent::new("content.changed")), 2);
        assert_eq!(a.recv().await.unwrap().event_type, "content.changed");
        assert_eq!(b.recv().await.unwrap().event_type, "content.changed");
    }

    #[test]
    fn publish_without_subscribers_is_dropped() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(AdminEvent::new("admin.logged_in")), 0);
    }

    #[tokio::test]
    async fn slow_subscriber_lags_instead_of_blocking() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();
        for _ in 0..3 {
            bus.publish(AdminEvent::new("content.changed"));
        }
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
    }
}
