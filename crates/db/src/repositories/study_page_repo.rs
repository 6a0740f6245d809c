//! Repository for the `study_pages` table.

use sqlx::PgPool;
use wayfarer_core::types::DbId;

use crate::models::study_page::{StudyPage, UpdateStudyPage};

const COLUMNS: &str = "id, title, slug, description, created_at, updated_at";

/// Provides CRUD operations for study destination pages.
pub struct StudyPageRepo;

impl StudyPageRepo {
    /// Insert a study page. The caller resolves the slug.
    pub async fn create(
        pool: &PgPool,
        title: &str,
        slug: &str,
        description: Option<&str>,
    ) -> Result<StudyPage, sqlx::Error> {
        let query = format!(
            "INSERT INTO study_pages (title, slug, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudyPage>(&query)
            .bind(title)
            .bind(slug)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StudyPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM study_pages WHERE id = $1");
        sqlx::query_as::<_, StudyPage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all study pages alphabetically by title.
    pub async fn list(pool: &PgPool) -> Result<Vec<StudyPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM study_pages ORDER BY title, id");
        sqlx::query_as::<_, StudyPage>(&query).fetch_all(pool).await
    }

    /// Update a study page. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudyPage,
    ) -> Result<Option<StudyPage>, sqlx::Error> {
        let query = format!(
            "UPDATE study_pages SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudyPage>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a study page and, by cascade, everything beneath it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM study_pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
