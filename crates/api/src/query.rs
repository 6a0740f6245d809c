//! Query-string parameter types shared by handlers.

use serde::Deserialize;
use wayfarer_core::types::DbId;

/// `GET /dynamic-tables?page=&limit=&search=&detail_page_id=`
#[derive(Debug, Default, Deserialize)]
pub struct ListTablesParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub detail_page_id: Option<DbId>,
}

/// `GET /dynamic-tables/{id}/view?search=&page=`
#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    pub search: Option<String>,
    pub page: Option<usize>,
}

/// Trim a free-text query and treat blank input as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
