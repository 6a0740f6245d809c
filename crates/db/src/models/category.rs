//! Category model and DTOs. Categories group cards on a study page.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wayfarer_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub study_page_id: DbId,
    pub name: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category. The study page comes from the URL path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Defaults to 0 if omitted.
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}
