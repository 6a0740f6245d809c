//! Study destination page model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wayfarer_core::types::{DbId, Timestamp};

/// A row from the `study_pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudyPage {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a study page. The slug is derived from the title when
/// omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudyPage {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 120))]
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating a study page. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStudyPage {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub slug: Option<String>,
    pub description: Option<String>,
}
