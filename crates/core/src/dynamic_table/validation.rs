//! Boundary checks for table submissions.
//!
//! Every create/update runs through [`validate_table`] before anything is
//! written, so persisted rows always agree with their column set.

use std::collections::HashSet;

use super::schema::{Column, Row, RowData};
use crate::error::CoreError;

/// Maximum length of a table title.
pub const MAX_TITLE_LEN: usize = 255;

/// Maximum number of columns in one table.
pub const MAX_COLUMNS: usize = 50;

/// Maximum number of rows in one table.
pub const MAX_ROWS: usize = 1000;

/// Fail with one error naming every required field that is absent.
///
/// Each entry is `(field_name, present)`.
pub fn require_fields(fields: &[(&str, bool)]) -> Result<(), CoreError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::missing_fields(&missing))
    }
}

/// Title must be non-blank and at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Column names must contain something other than whitespace.
pub fn validate_column_name(id: &str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "Column '{id}' must have a name"
        )));
    }
    Ok(())
}

/// Column ids must be non-empty and unique; names must be non-blank.
pub fn validate_columns(columns: &[Column]) -> Result<(), CoreError> {
    if columns.len() > MAX_COLUMNS {
        return Err(CoreError::Validation(format!(
            "A table may have at most {MAX_COLUMNS} columns"
        )));
    }
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if column.id.trim().is_empty() {
            return Err(CoreError::Validation("Column id must not be empty".into()));
        }
        validate_column_name(&column.id, &column.name)?;
        if !seen.insert(column.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate column id '{}'",
                column.id
            )));
        }
    }
    Ok(())
}

/// Row ids must be non-empty and unique. Every data key must name a column
/// and every value must have a shape the column type accepts.
pub fn validate_rows(columns: &[Column], rows: &[Row]) -> Result<(), CoreError> {
    if rows.len() > MAX_ROWS {
        return Err(CoreError::Validation(format!(
            "A table may have at most {MAX_ROWS} rows"
        )));
    }
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        if row.id.trim().is_empty() {
            return Err(CoreError::Validation("Row id must not be empty".into()));
        }
        if !seen.insert(row.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate row id '{}'",
                row.id
            )));
        }
        for (key, value) in &row.data {
            let column = columns.iter().find(|c| &c.id == key).ok_or_else(|| {
                CoreError::Validation(format!(
                    "Row '{}' has a value for unknown column '{key}'",
                    row.id
                ))
            })?;
            if !column.cell_type.accepts(value) {
                return Err(CoreError::Validation(format!(
                    "Row '{}' column '{key}' expects a {} value",
                    row.id, column.cell_type
                )));
            }
        }
    }
    Ok(())
}

/// Rebuild each row's data in column order, backfilling missing cells.
pub fn normalize_rows(columns: &[Column], rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .map(|mut row| {
            let mut data = RowData::with_capacity(columns.len());
            for column in columns {
                let value = row
                    .data
                    .swap_remove(&column.id)
                    .unwrap_or_else(|| column.cell_type.fill_value());
                data.insert(column.id.clone(), value);
            }
            row.data = data;
            row
        })
        .collect()
}

/// Validate a full submission and return its normalized rows.
pub fn validate_table(
    title: &str,
    columns: &[Column],
    rows: Vec<Row>,
) -> Result<Vec<Row>, CoreError> {
    validate_title(title)?;
    validate_columns(columns)?;
    validate_rows(columns, &rows)?;
    Ok(normalize_rows(columns, rows))
}
