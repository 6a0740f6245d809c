//! Editor-side draft of a table's columns and rows.
//!
//! [`TableBuilder`] holds the in-progress schema while an admin edits a
//! table. Every column mutation keeps the rows in step: adding a column
//! backfills a default into each row, retyping one converts its cells,
//! deleting one strips its key.

use serde::Deserialize;
use uuid::Uuid;

use super::schema::{CellType, CellValue, Column, Row, RowData};
use super::validation::validate_column_name;
use crate::error::CoreError;

/// Prefix for builder-generated column ids.
const COLUMN_ID_PREFIX: &str = "col_";

/// Prefix for builder-generated row ids.
const ROW_ID_PREFIX: &str = "row_";

/// Fields for a new column.
#[derive(Debug, Clone, Deserialize)]
pub struct NewColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub cell_type: CellType,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Partial column update. `None` leaves the field unchanged; `icon:
/// Some(None)` clears the icon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub cell_type: Option<CellType>,
    pub icon: Option<Option<String>>,
}

/// In-memory draft of a table's schema and data.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    columns: Vec<Column>,
    rows: Vec<Row>,
    drag_source: Option<String>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an existing table for editing.
    pub fn from_parts(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let mut builder = Self::new();
        builder.load(columns, rows);
        builder
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_parts(self) -> (Vec<Column>, Vec<Row>) {
        (self.columns, self.rows)
    }

    // -----------------------------------------------------------------------
    // Columns
    // -----------------------------------------------------------------------

    /// Append a column and backfill every row with the type default.
    ///
    /// Returns the generated column id. Blank names are rejected, as are
    /// date and status columns, which have no builder default.
    pub fn add_column(&mut self, input: NewColumn) -> Result<String, CoreError> {
        let default = builder_default(input.cell_type)?;
        let id = self.fresh_id(COLUMN_ID_PREFIX, |b, id| b.column_index(id).is_some());
        validate_column_name(&id, &input.name)?;

        for row in &mut self.rows {
            row.data.insert(id.clone(), default.clone());
        }
        self.columns.push(Column {
            id: id.clone(),
            name: input.name,
            cell_type: input.cell_type,
            icon: input.icon,
        });
        Ok(id)
    }

    /// Merge `patch` into the matching column. Returns `Ok(false)` if absent.
    ///
    /// The patch is checked before anything changes: a blank name or a
    /// display-only type leaves the column untouched. Moving a column off
    /// `number` turns its numeric cells into text.
    pub fn update_column(&mut self, id: &str, patch: ColumnPatch) -> Result<bool, CoreError> {
        let Some(index) = self.column_index(id) else {
            return Ok(false);
        };
        if let Some(ref name) = patch.name {
            validate_column_name(id, name)?;
        }
        if let Some(cell_type) = patch.cell_type {
            builder_default(cell_type)?;
        }

        let column = &mut self.columns[index];
        if let Some(name) = patch.name {
            column.name = name;
        }
        if let Some(icon) = patch.icon {
            column.icon = icon;
        }
        if let Some(cell_type) = patch.cell_type {
            if column.cell_type != cell_type {
                column.cell_type = cell_type;
                for row in &mut self.rows {
                    if let Some(cell) = row.data.get_mut(id) {
                        retype_cell(cell, cell_type);
                    }
                }
            }
        }
        Ok(true)
    }

    /// Remove a column and strip its key from every row.
    pub fn delete_column(&mut self, id: &str) -> bool {
        let Some(index) = self.column_index(id) else {
            return false;
        };
        self.columns.remove(index);
        for row in &mut self.rows {
            row.data.shift_remove(id);
        }
        true
    }

    // -----------------------------------------------------------------------
    // Rows
    // -----------------------------------------------------------------------

    /// Append a row seeded with the default for every column, in column order.
    pub fn add_row(&mut self) -> String {
        let id = self.fresh_id(ROW_ID_PREFIX, |b, id| b.row_index(id).is_some());
        let data: RowData = self
            .columns
            .iter()
            .map(|c| (c.id.clone(), c.cell_type.fill_value()))
            .collect();
        self.rows.push(Row {
            id: id.clone(),
            data,
        });
        id
    }

    /// Merge key/value pairs into a row's data. Returns `false` if absent.
    pub fn update_row<I>(&mut self, id: &str, partial: I) -> bool
    where
        I: IntoIterator<Item = (String, CellValue)>,
    {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        row.data.extend(partial);
        true
    }

    pub fn delete_row(&mut self, id: &str) -> bool {
        let Some(index) = self.row_index(id) else {
            return false;
        };
        self.rows.remove(index);
        true
    }

    /// Splice the row at `from` out and back in at `to`.
    ///
    /// Only positions between `min(from, to)` and `max(from, to)` shift.
    /// Out-of-range indices are ignored. Indices refer to the sequence as it
    /// is before the move; callers chaining moves must re-resolve them.
    pub fn move_row(&mut self, from: usize, to: usize) {
        let len = self.rows.len();
        if from >= len || to >= len || from == to {
            return;
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
    }

    /// Remember the row being dragged.
    pub fn begin_drag(&mut self, row_id: &str) {
        self.drag_source = Some(row_id.to_string());
    }

    /// Drop the dragged row onto `target_id`.
    ///
    /// Both ids are resolved to their current indices at drop time; if
    /// either no longer exists, or they are the same row, nothing moves.
    /// Returns whether a move happened.
    pub fn drop_on(&mut self, target_id: &str) -> bool {
        let Some(source_id) = self.drag_source.take() else {
            return false;
        };
        if source_id == target_id {
            return false;
        }
        match (self.row_index(&source_id), self.row_index(target_id)) {
            (Some(from), Some(to)) => {
                self.move_row(from, to);
                true
            }
            _ => false,
        }
    }

    // -----------------------------------------------------------------------
    // Whole-draft operations
    // -----------------------------------------------------------------------

    pub fn reset(&mut self) {
        self.columns.clear();
        self.rows.clear();
        self.drag_source = None;
    }

    pub fn load(&mut self, columns: Vec<Column>, rows: Vec<Row>) {
        self.columns = columns;
        self.rows = rows;
        self.drag_source = None;
    }

    fn column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    fn row_index(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    fn fresh_id(&self, prefix: &str, taken: impl Fn(&Self, &str) -> bool) -> String {
        loop {
            let id = format!("{prefix}{}", Uuid::now_v7().simple());
            if !taken(self, &id) {
                return id;
            }
        }
    }
}

fn builder_default(cell_type: CellType) -> Result<CellValue, CoreError> {
    cell_type.builder_default().ok_or_else(|| {
        CoreError::Validation(format!(
            "Columns of type '{cell_type}' cannot be created in the builder"
        ))
    })
}

/// Coerce a cell so the column's new type accepts it.
fn retype_cell(cell: &mut CellValue, cell_type: CellType) {
    if cell_type.accepts(cell) {
        return;
    }
    if let CellValue::Number(n) = &*cell {
        let text = n.to_string();
        *cell = CellValue::Text(text);
    }
}
