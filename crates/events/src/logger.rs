//! Background subscriber that records admin events in the log.

use tokio::sync::broadcast;

use crate::bus::AdminEvent;

/// Drains the bus into `tracing` until the bus is dropped.
pub struct EventLogger;

impl EventLogger {
    /// Run until the channel closes. Returns how many events were logged.
    pub async fn run(mut receiver: broadcast::Receiver<AdminEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    Self::record(&event);
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event logger lagged, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(logged, "Event bus closed, event logger stopping");
                    break;
                }
            }
        }
        logged
    }

    fn record(event: &AdminEvent) {
        let (kind, id) = match &event.entity {
            Some(entity) => (Some(entity.kind.as_str()), Some(entity.id)),
            None => (None, None),
        };
        tracing::info!(
            event_type = %event.event_type,
            entity_kind = kind,
            entity_id = id,
            actor_id = event.actor_id,
            payload = %event.payload,
            occurred_at = %event.occurred_at,
            "Admin event"
        );
    }
}
