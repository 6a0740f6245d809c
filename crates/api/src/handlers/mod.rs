use wayfarer_core::types::DbId;
use wayfarer_events::{event_types, AdminEvent};

pub mod auth;
pub mod card;
pub mod category;
pub mod detail_page;
pub mod dynamic_table;
pub mod study_page;

/// `content.changed` alert for a study page, category, card or detail page.
fn content_changed(kind: &str, id: DbId, action: &str, actor: DbId) -> AdminEvent {
    AdminEvent::new(event_types::CONTENT_CHANGED)
        .about(kind, id)
        .by(actor)
        .with_payload(serde_json::json!({ "action": action }))
}
