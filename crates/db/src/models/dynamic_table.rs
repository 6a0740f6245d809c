//! Dynamic table model and DTOs.
//!
//! `columns` and `rows` are stored as JSONB. Submissions arrive with every
//! field optional so that missing required fields are reported together as
//! one validation error instead of a deserialization rejection.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use wayfarer_core::dynamic_table::validation::{require_fields, validate_table};
use wayfarer_core::dynamic_table::{Column, Row};
use wayfarer_core::error::CoreError;
use wayfarer_core::types::{DbId, Timestamp};

use crate::models::card::Card;
use crate::models::category::Category;
use crate::models::detail_page::DetailPage;
use crate::models::study_page::StudyPage;

/// A row from the `dynamic_tables` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DynamicTable {
    pub id: DbId,
    pub detail_page_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub columns: Json<Vec<Column>>,
    pub rows: Json<Vec<Row>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A table with its owning hierarchy resolved, for breadcrumbs.
#[derive(Debug, Clone, Serialize)]
pub struct DynamicTableWithContext {
    pub table: DynamicTable,
    pub detail_page: DetailPage,
    pub card: Card,
    pub category: Category,
    pub study_page: StudyPage,
}

/// Validated, normalized table content ready to be written.
#[derive(Debug, Clone)]
pub struct TableContent {
    pub title: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl TableContent {
    fn validated(
        title: String,
        description: Option<String>,
        icon_url: Option<String>,
        columns: Vec<Column>,
        rows: Vec<Row>,
    ) -> Result<Self, CoreError> {
        let rows = validate_table(&title, &columns, rows)?;
        Ok(Self {
            title,
            description,
            icon_url,
            columns,
            rows,
        })
    }
}

/// Create submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDynamicTable {
    pub title: Option<String>,
    pub detail_page_id: Option<DbId>,
    pub columns: Option<Vec<Column>>,
    pub rows: Option<Vec<Row>>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
}

impl CreateDynamicTable {
    /// Check required fields and table shape, returning the owning detail
    /// page id and the normalized content.
    pub fn validate(self) -> Result<(DbId, TableContent), CoreError> {
        require_fields(&[
            ("title", self.title.is_some()),
            ("detail_page_id", self.detail_page_id.is_some()),
            ("columns", self.columns.is_some()),
            ("rows", self.rows.is_some()),
        ])?;
        let content = TableContent::validated(
            self.title.unwrap_or_default(),
            self.description,
            self.icon_url,
            self.columns.unwrap_or_default(),
            self.rows.unwrap_or_default(),
        )?;
        Ok((self.detail_page_id.unwrap_or_default(), content))
    }
}

/// Where an updated table should live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentTarget {
    /// Keep the current detail page.
    Unchanged,
    /// Attach to the detail page of this card, provisioning it if needed.
    Card(DbId),
    /// A `detail_page_id` as sent by older clients. When it differs from
    /// the current parent it is interpreted as a card id.
    LegacyDetailPage(DbId),
}

/// Full-replacement update submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDynamicTable {
    pub title: Option<String>,
    pub columns: Option<Vec<Column>>,
    pub rows: Option<Vec<Row>>,
    pub detail_page_id: Option<DbId>,
    pub card_id: Option<DbId>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
}

impl UpdateDynamicTable {
    /// Check required fields and table shape. An explicit `card_id` takes
    /// precedence over `detail_page_id`.
    pub fn validate(self) -> Result<(ParentTarget, TableContent), CoreError> {
        require_fields(&[
            ("title", self.title.is_some()),
            ("columns", self.columns.is_some()),
            ("rows", self.rows.is_some()),
        ])?;
        let target = match (self.card_id, self.detail_page_id) {
            (Some(card_id), _) => ParentTarget::Card(card_id),
            (None, Some(id)) => ParentTarget::LegacyDetailPage(id),
            (None, None) => ParentTarget::Unchanged,
        };
        let content = TableContent::validated(
            self.title.unwrap_or_default(),
            self.description,
            self.icon_url,
            self.columns.unwrap_or_default(),
            self.rows.unwrap_or_default(),
        )?;
        Ok((target, content))
    }
}

/// Optional filters for listing tables.
#[derive(Debug, Clone, Default)]
pub struct DynamicTableFilter {
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
    pub detail_page_id: Option<DbId>,
}
