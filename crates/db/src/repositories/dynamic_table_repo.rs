//! Repository for the `dynamic_tables` table.

use sqlx::types::Json;
use sqlx::PgPool;
use wayfarer_core::pagination::PageRequest;
use wayfarer_core::types::DbId;

use crate::models::dynamic_table::{
    DynamicTable, DynamicTableFilter, DynamicTableWithContext, TableContent,
};
use crate::repositories::{CardRepo, CategoryRepo, DetailPageRepo, StudyPageRepo};

const COLUMNS: &str = "id, detail_page_id, title, description, icon_url, columns, rows, \
                       created_at, updated_at";

/// Provides CRUD and search for dynamic tables.
pub struct DynamicTableRepo;

impl DynamicTableRepo {
    pub async fn create(
        pool: &PgPool,
        detail_page_id: DbId,
        content: &TableContent,
    ) -> Result<DynamicTable, sqlx::Error> {
        let query = format!(
            "INSERT INTO dynamic_tables (detail_page_id, title, description, icon_url, columns, rows)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DynamicTable>(&query)
            .bind(detail_page_id)
            .bind(&content.title)
            .bind(&content.description)
            .bind(&content.icon_url)
            .bind(Json(&content.columns))
            .bind(Json(&content.rows))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DynamicTable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dynamic_tables WHERE id = $1");
        sqlx::query_as::<_, DynamicTable>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a table together with its detail page, card, category and
    /// study page. `None` if the table does not exist.
    pub async fn find_with_context(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DynamicTableWithContext>, sqlx::Error> {
        let Some(table) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        Self::attach_context(pool, table).await.map(Some)
    }

    /// Resolve the ownership chain of an already loaded table.
    ///
    /// Foreign keys cascade, so a broken chain is reported as
    /// `RowNotFound`.
    pub async fn attach_context(
        pool: &PgPool,
        table: DynamicTable,
    ) -> Result<DynamicTableWithContext, sqlx::Error> {
        let detail_page = DetailPageRepo::find_by_id(pool, table.detail_page_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let card = CardRepo::find_by_id(pool, detail_page.card_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let category = CategoryRepo::find_by_id(pool, card.category_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let study_page = StudyPageRepo::find_by_id(pool, category.study_page_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(DynamicTableWithContext {
            table,
            detail_page,
            card,
            category,
            study_page,
        })
    }

    /// One page of tables, most recently updated first.
    pub async fn list(
        pool: &PgPool,
        filter: &DynamicTableFilter,
        page: PageRequest,
    ) -> Result<Vec<DynamicTable>, sqlx::Error> {
        let (where_clause, bind_idx) = where_clause(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM dynamic_tables {where_clause} \
             ORDER BY updated_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, DynamicTable>(&query);
        if let Some(ref search) = filter.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(detail_page_id) = filter.detail_page_id {
            q = q.bind(detail_page_id);
        }
        q.bind(page.limit).bind(page.offset()).fetch_all(pool).await
    }

    /// Total number of tables matching `filter`.
    pub async fn count(pool: &PgPool, filter: &DynamicTableFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM dynamic_tables {where_clause}");

        let mut q = sqlx::query_as::<_, (i64,)>(&query);
        if let Some(ref search) = filter.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(detail_page_id) = filter.detail_page_id {
            q = q.bind(detail_page_id);
        }
        let (count,) = q.fetch_one(pool).await?;
        Ok(count)
    }

    /// Replace a table's content and parent. Returns `None` if no row with
    /// the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        detail_page_id: DbId,
        content: &TableContent,
    ) -> Result<Option<DynamicTable>, sqlx::Error> {
        let query = format!(
            "UPDATE dynamic_tables SET
                detail_page_id = $2,
                title = $3,
                description = $4,
                icon_url = $5,
                columns = $6,
                rows = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DynamicTable>(&query)
            .bind(id)
            .bind(detail_page_id)
            .bind(&content.title)
            .bind(&content.description)
            .bind(&content.icon_url)
            .bind(Json(&content.columns))
            .bind(Json(&content.rows))
            .fetch_optional(pool)
            .await
    }

    /// Delete a table by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dynamic_tables WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build the `WHERE` clause for `filter`, returning it with the next free
/// bind index.
fn where_clause(filter: &DynamicTableFilter) -> (String, u32) {
    let mut conditions = Vec::new();
    let mut bind_idx = 1u32;

    if filter.search.is_some() {
        conditions.push(format!(
            "(title ILIKE ${bind_idx} OR description ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
    }
    if filter.detail_page_id.is_some() {
        conditions.push(format!("detail_page_id = ${bind_idx}"));
        bind_idx += 1;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, bind_idx)
}

/// `%search%` with LIKE metacharacters escaped.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("mit"), "%mit%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn where_clause_numbers_binds_in_order() {
        let filter = DynamicTableFilter {
            search: Some("fees".into()),
            detail_page_id: Some(3),
        };
        let (clause, next) = where_clause(&filter);
        assert_eq!(
            clause,
            "WHERE (title ILIKE $1 OR description ILIKE $1) AND detail_page_id = $2"
        );
        assert_eq!(next, 3);
    }

    #[test]
    fn empty_filter_has_no_where_clause() {
        let (clause, next) = where_clause(&DynamicTableFilter::default());
        assert!(clause.is_empty());
        assert_eq!(next, 1);
    }
}
