//! Detail page model and DTOs. Each card owns at most one detail page,
//! which hosts the card's dynamic tables.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wayfarer_core::types::{DbId, Timestamp};

/// A row from the `detail_pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DetailPage {
    pub id: DbId,
    pub card_id: DbId,
    pub title: String,
    pub content: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating a detail page. Detail pages are only ever created
/// through card provisioning.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDetailPage {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub content: Option<String>,
}
