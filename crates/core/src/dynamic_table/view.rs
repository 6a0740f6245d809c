//! Generic table view: free-text search and client-style pagination.

use serde::Serialize;

use super::render::{render_cell, RenderedCell};
use super::schema::{CellType, Column, Row};

/// Rows per rendered page.
pub const PAGE_SIZE: usize = 10;

/// Maximum number of page-number controls shown at once.
pub const MAX_PAGE_BUTTONS: usize = 5;

/// Column header as shown above the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub cell_type: CellType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One row of formatted cells, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    pub id: String,
    pub cells: Vec<RenderedCell>,
}

/// Current page plus the numbered controls to show around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: usize,
    pub total_pages: usize,
    pub pages: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageWindow {
    /// Clamp `requested` into `1..=total_pages` and compute the window.
    pub fn new(requested: usize, total_items: usize, page_size: usize) -> Self {
        let total_pages = total_items.div_ceil(page_size.max(1));
        let page = requested.clamp(1, total_pages.max(1));
        Self {
            page,
            total_pages,
            pages: page_numbers(page, total_pages),
            has_prev: page > 1,
            has_next: page < total_pages,
        }
    }

    /// Index range of the current page within the filtered rows.
    pub fn bounds(&self, total_items: usize, page_size: usize) -> (usize, usize) {
        let start = ((self.page - 1) * page_size).min(total_items);
        let end = (start + page_size).min(total_items);
        (start, end)
    }
}

/// Page numbers to display: at most [`MAX_PAGE_BUTTONS`], centered on
/// `current` except near either end, where the window is pinned.
pub fn page_numbers(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= MAX_PAGE_BUTTONS {
        return (1..=total_pages).collect();
    }
    let half = MAX_PAGE_BUTTONS / 2;
    let start = if current <= half + 1 {
        1
    } else if current + half >= total_pages {
        total_pages - MAX_PAGE_BUTTONS + 1
    } else {
        current - half
    };
    (start..start + MAX_PAGE_BUTTONS).collect()
}

/// Whether any cell of `row`, raw or rendered, contains `needle`.
///
/// `needle` must already be lower-cased.
pub fn row_matches(columns: &[Column], row: &Row, needle: &str) -> bool {
    columns.iter().any(|column| {
        let value = row.get(&column.id);
        let raw_hit = value
            .map(|v| v.raw_text().to_lowercase().contains(needle))
            .unwrap_or(false);
        raw_hit
            || render_cell(column.cell_type, value)
                .search_text()
                .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// Rows matching `query`, in their original order. An empty query keeps
/// every row.
pub fn filter_rows<'a>(columns: &[Column], rows: &'a [Row], query: &str) -> Vec<&'a Row> {
    if query.is_empty() {
        return rows.iter().collect();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| row_matches(columns, row, &needle))
        .collect()
}

pub fn render_row(columns: &[Column], row: &Row) -> RenderedRow {
    RenderedRow {
        id: row.id.clone(),
        cells: columns
            .iter()
            .map(|c| render_cell(c.cell_type, row.get(&c.id)))
            .collect(),
    }
}

/// A fully rendered page of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub headers: Vec<Header>,
    pub rows: Vec<RenderedRow>,
    /// Rows matching the query across all pages.
    pub total_rows: usize,
    #[serde(flatten)]
    pub window: PageWindow,
}

/// Filter, paginate and render a table.
///
/// A new query should be paired with `page = 1`; out-of-range pages are
/// clamped to the nearest valid page.
pub fn render_table(columns: &[Column], rows: &[Row], query: &str, page: usize) -> TableView {
    let matching = filter_rows(columns, rows, query);
    let window = PageWindow::new(page, matching.len(), PAGE_SIZE);
    let (start, end) = window.bounds(matching.len(), PAGE_SIZE);

    TableView {
        headers: columns
            .iter()
            .map(|c| Header {
                id: c.id.clone(),
                name: c.name.clone(),
                cell_type: c.cell_type,
                icon: c.icon.clone(),
            })
            .collect(),
        rows: matching[start..end]
            .iter()
            .map(|row| render_row(columns, row))
            .collect(),
        total_rows: matching.len(),
        window,
    }
}
