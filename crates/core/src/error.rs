//! Domain error taxonomy shared by every crate in the workspace.

use crate::types::DbId;

/// Errors raised by domain logic and translated to HTTP responses by the API.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced record (detail page, card, dynamic table, ...) does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a presence or shape check. Raised before any write.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Build a single validation error listing every missing required field.
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::Validation(format!("Missing required fields: {}", fields.join(", ")))
    }
}
