//! User-authored tables: schema, editing, validation and rendering.

pub mod builder;
pub mod render;
pub mod schema;
pub mod validation;
pub mod view;

pub use builder::{ColumnPatch, NewColumn, TableBuilder};
pub use render::{render_cell, RenderedCell};
pub use schema::{CellType, CellValue, Column, Row, RowData};
pub use validation::validate_table;
pub use view::{render_table, TableView};
