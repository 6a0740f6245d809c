//! Repository for the `cards` table.

use sqlx::PgPool;
use wayfarer_core::types::DbId;

use crate::models::card::{Card, CreateCard, UpdateCard};

const COLUMNS: &str = "id, category_id, title, summary, image_url, sort_order, created_at, updated_at";

pub struct CardRepo;

impl CardRepo {
    pub async fn create(
        pool: &PgPool,
        category_id: DbId,
        input: &CreateCard,
    ) -> Result<Card, sqlx::Error> {
        let query = format!(
            "INSERT INTO cards (category_id, title, summary, image_url, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(category_id)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.image_url)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1");
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Cards of a category in display order.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE category_id = $1
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCard,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET
                title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                image_url = COALESCE($4, image_url),
                sort_order = COALESCE($5, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.image_url)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
