use std::sync::Arc;

use wayfarer_events::EventBus;

use crate::config::ServerConfig;

/// Shared state handed to every handler via `State<AppState>`. Cheap to
/// clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: wayfarer_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Admin alert events; see [`wayfarer_events`].
    pub event_bus: Arc<EventBus>,
}
