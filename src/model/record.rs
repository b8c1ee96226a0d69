//! JSON records browsed by the reference host.
//!
//! A [`Record`] is one JSON object. Columns are inferred from the union of
//! top-level keys across all records, in first-seen order.

use crate::model::column::ColumnDef;
use crate::model::value::CellValue;
use serde_json::{Map, Value};

/// One row of the browsed collection: a JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Wrap a JSON value. Returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Read a field as a cell value. Missing keys are `Null`.
    pub fn get(&self, key: &str) -> CellValue {
        self.fields.get(key).map(json_to_cell).unwrap_or_default()
    }
}

/// Convert a JSON value to a cell value.
///
/// Arrays and objects are carried as their compact JSON text so that they
/// remain searchable.
pub fn json_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
    }
}

/// Union of keys across records, in first-seen order.
pub fn infer_column_ids(records: &[Record]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !ids.iter().any(|id| id == key) {
                ids.push(key.to_string());
            }
        }
    }
    ids
}

/// Column declarations for the given record keys.
///
/// Every column reads its key from the record; `unsortable` and
/// `unsearchable` opt individual keys out of sorting and global search.
pub fn record_columns(
    ids: &[String],
    unsortable: &[String],
    unsearchable: &[String],
) -> Vec<ColumnDef<Record>> {
    ids.iter()
        .map(|id| {
            let key = id.clone();
            ColumnDef::new(id.clone(), move |record: &Record| record.get(&key))
                .sortable(!unsortable.contains(id))
                .searchable(!unsearchable.contains(id))
        })
        .collect()
}
