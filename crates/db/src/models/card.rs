//! Card model and DTOs. A card is one university or programme inside a
//! category.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use wayfarer_core::types::{DbId, Timestamp};

/// A row from the `cards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Card {
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a card. The category comes from the URL path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCard {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub summary: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    /// Defaults to 0 if omitted.
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCard {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub summary: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
}
