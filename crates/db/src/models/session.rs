//! Admin session model and DTOs.

use sqlx::FromRow;
use wayfarer_core::types::{DbId, Timestamp};

/// A row from the `admin_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: DbId,
    pub user_id: DbId,
    pub expires_at: Timestamp,
}

/// A refresh session to persist. Only the token digest is stored.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
}
