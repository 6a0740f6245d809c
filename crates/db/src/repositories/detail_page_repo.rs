//! Repository for the `detail_pages` table.

use sqlx::PgPool;
use wayfarer_core::types::DbId;

use crate::models::detail_page::{DetailPage, UpdateDetailPage};

const COLUMNS: &str = "id, card_id, title, content, created_at, updated_at";

/// Provides lookups and provisioning for card detail pages.
pub struct DetailPageRepo;

impl DetailPageRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DetailPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM detail_pages WHERE id = $1");
        sqlx::query_as::<_, DetailPage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The detail page owned by a card, if one has been provisioned.
    pub async fn find_by_card_id(
        pool: &PgPool,
        card_id: DbId,
    ) -> Result<Option<DetailPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM detail_pages WHERE card_id = $1");
        sqlx::query_as::<_, DetailPage>(&query)
            .bind(card_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the card's detail page, creating it (titled after the card)
    /// when absent. The flag is `true` only when this call created the row.
    ///
    /// Returns `None` when the card does not exist.
    pub async fn get_or_create_for_card(
        pool: &PgPool,
        card_id: DbId,
    ) -> Result<Option<(DetailPage, bool)>, sqlx::Error> {
        if let Some(page) = Self::find_by_card_id(pool, card_id).await? {
            return Ok(Some((page, false)));
        }

        let query = format!(
            "INSERT INTO detail_pages (card_id, title)
             SELECT id, title FROM cards WHERE id = $1
             ON CONFLICT (card_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, DetailPage>(&query)
            .bind(card_id)
            .fetch_optional(pool)
            .await?;
        if let Some(page) = created {
            tracing::debug!(card_id, detail_page_id = page.id, "Provisioned detail page");
            return Ok(Some((page, true)));
        }

        // Either the card is missing or a concurrent request won the insert.
        Ok(Self::find_by_card_id(pool, card_id)
            .await?
            .map(|page| (page, false)))
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDetailPage,
    ) -> Result<Option<DetailPage>, sqlx::Error> {
        let query = format!(
            "UPDATE detail_pages SET
                title = COALESCE($2, title),
                content = COALESCE($3, content)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DetailPage>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }
}
