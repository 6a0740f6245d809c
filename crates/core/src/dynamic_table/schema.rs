//! Column, row and cell types for user-authored tables.
//!
//! Columns and rows are persisted as JSONB; these types define the shape
//! that is accepted at the API boundary and written back out.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declared kind of a column. Drives default values and cell rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Text,
    Number,
    Image,
    Link,
    Richtext,
    /// Display-only; the builder cannot add date columns.
    Date,
    /// Display-only; the builder cannot add status columns.
    Status,
}

impl CellType {
    pub const ALL: [CellType; 7] = [
        CellType::Text,
        CellType::Number,
        CellType::Image,
        CellType::Link,
        CellType::Richtext,
        CellType::Date,
        CellType::Status,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CellType::Text => "text",
            CellType::Number => "number",
            CellType::Image => "image",
            CellType::Link => "link",
            CellType::Richtext => "richtext",
            CellType::Date => "date",
            CellType::Status => "status",
        }
    }

    /// Whether the builder may create a column of this type.
    pub fn is_builder_type(self) -> bool {
        self.builder_default().is_some()
    }

    /// Value seeded into new cells by the builder. `None` for display-only types.
    pub fn builder_default(self) -> Option<CellValue> {
        match self {
            CellType::Text | CellType::Link | CellType::Image | CellType::Richtext => {
                Some(CellValue::Text(String::new()))
            }
            CellType::Number => Some(CellValue::Number(0.into())),
            CellType::Date | CellType::Status => None,
        }
    }

    /// Value used to backfill a missing cell of a persisted table.
    pub fn fill_value(self) -> CellValue {
        self.builder_default()
            .unwrap_or_else(|| CellValue::Text(String::new()))
    }

    /// Whether `value` has an acceptable JSON shape for this column type.
    ///
    /// Number columns also accept strings so legacy non-numeric values
    /// survive a round trip; they render raw.
    pub fn accepts(self, value: &CellValue) -> bool {
        match (self, value) {
            (_, CellValue::Empty) => true,
            (_, CellValue::Text(_)) => true,
            (CellType::Number, CellValue::Number(_)) => true,
            (_, CellValue::Number(_)) => false,
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell. Serialized as a bare JSON number, string or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(serde_json::Number),
    Text(String),
    Empty,
}

impl CellValue {
    /// JavaScript-style falsiness: `null`, `""` and numeric zero.
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(n) => n.as_f64() == Some(0.0),
        }
    }

    /// Stringified raw value, as typed by the editor.
    pub fn raw_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(value.into())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value.into())
    }
}

/// Cell values keyed by column id, kept in column order.
pub type RowData = IndexMap<String, CellValue>;

/// A column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub cell_type: CellType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Column {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cell_type: CellType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cell_type,
            icon: None,
        }
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(default)]
    pub data: RowData,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: RowData::new(),
        }
    }

    /// Builder-style helper to set a cell.
    pub fn with(mut self, column_id: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.data.insert(column_id.into(), value.into());
        self
    }

    pub fn get(&self, column_id: &str) -> Option<&CellValue> {
        self.data.get(column_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_defaults_by_type() {
        assert_eq!(CellType::Text.builder_default(), Some(CellValue::Text(String::new())));
        assert_eq!(CellType::Link.builder_default(), Some(CellValue::Text(String::new())));
        assert_eq!(CellType::Image.builder_default(), Some(CellValue::Text(String::new())));
        assert_eq!(
            CellType::Richtext.builder_default(),
            Some(CellValue::Text(String::new()))
        );
        assert_eq!(CellType::Number.builder_default(), Some(CellValue::from(0)));
        assert_eq!(CellType::Date.builder_default(), None);
        assert_eq!(CellType::Status.builder_default(), None);
    }

    #[test]
    fn display_only_types_are_not_builder_types() {
        let builder: Vec<_> = CellType::ALL
            .into_iter()
            .filter(|t| t.is_builder_type())
            .collect();
        assert_eq!(
            builder,
            vec![
                CellType::Text,
                CellType::Number,
                CellType::Image,
                CellType::Link,
                CellType::Richtext
            ]
        );
    }

    #[test]
    fn column_uses_type_key_on_the_wire() {
        let col: Column =
            serde_json::from_value(json!({"id": "c1", "name": "University", "type": "text"}))
                .unwrap();
        assert_eq!(col.cell_type, CellType::Text);
        assert!(col.icon.is_none());

        let out = serde_json::to_value(&col).unwrap();
        assert_eq!(out, json!({"id": "c1", "name": "University", "type": "text"}));
    }

    #[test]
    fn unknown_cell_type_is_rejected() {
        let res: Result<Column, _> =
            serde_json::from_value(json!({"id": "c1", "name": "X", "type": "checkbox"}));
        assert!(res.is_err());
    }

    #[test]
    fn cell_values_keep_their_json_shape() {
        let row: Row = serde_json::from_value(json!({
            "id": "r1",
            "data": {"c1": "MIT", "c2": 42, "c3": null, "c4": 1.5}
        }))
        .unwrap();
        assert_eq!(row.get("c1"), Some(&CellValue::from("MIT")));
        assert_eq!(row.get("c2"), Some(&CellValue::from(42)));
        assert_eq!(row.get("c3"), Some(&CellValue::Empty));

        let out = serde_json::to_value(&row).unwrap();
        assert_eq!(out["data"]["c2"], json!(42));
        assert_eq!(out["data"]["c4"], json!(1.5));
        assert_eq!(out["data"]["c3"], json!(null));
    }

    #[test]
    fn row_data_preserves_key_order() {
        let row: Row =
            serde_json::from_str(r#"{"id": "r1", "data": {"z": "1", "a": "2", "m": "3"}}"#)
                .unwrap();
        let keys: Vec<_> = row.data.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn boolean_cells_are_rejected() {
        let res: Result<Row, _> =
            serde_json::from_value(json!({"id": "r1", "data": {"c1": true}}));
        assert!(res.is_err());
    }

    #[test]
    fn falsiness_matches_editor_semantics() {
        assert!(CellValue::Empty.is_falsy());
        assert!(CellValue::from("").is_falsy());
        assert!(CellValue::from(0).is_falsy());
        assert!(!CellValue::from("0").is_falsy());
        assert!(!CellValue::from(3).is_falsy());
    }

    #[test]
    fn number_columns_accept_strings_but_text_rejects_numbers() {
        assert!(CellType::Number.accepts(&CellValue::from(5)));
        assert!(CellType::Number.accepts(&CellValue::from("n/a")));
        assert!(!CellType::Text.accepts(&CellValue::from(5)));
        assert!(CellType::Status.accepts(&CellValue::Empty));
    }
}
