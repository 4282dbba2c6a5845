//! Domain models for the chartprep pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`FieldKind`] - Declared type of a column
//! - [`Value`] - A typed cell
//! - [`Table`] - Typed, immutable source table
//! - [`Category`] - Ordered key used for cross-tabulation
//! - [`ChartData`], [`StarPoint`], [`RadarPoint`] - JSON payloads read by the charts

use std::cmp::Ordering;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::SchemaError;

// =============================================================================
// Field Kind
// =============================================================================

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Whole numbers. Values such as `45.0` are accepted.
    Integer,
    /// Floating point numbers.
    Float,
    /// `True`/`False` (any case).
    Boolean,
    /// Anything else.
    Text,
}

impl FieldKind {
    /// Whether mean/max aggregates make sense for this kind.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Cell Value
// =============================================================================

/// A single typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the cell, `None` for anything that is not a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Text written into a CSV cell. Missing values become empty cells.
    pub fn to_csv_field(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::Int(i) => i.to_string(),
            // Debug keeps the trailing ".0" on whole floats
            Self::Float(x) => format!("{:?}", x),
            Self::Text(s) => s.clone(),
        }
    }

    /// Convert a decoded JSON value back into a cell.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map(Self::Float).unwrap_or(Self::Null),
            },
            serde_json::Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: FieldKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// An in-memory table: ordered columns and rows of typed cells.
///
/// Built once by [`crate::schema::Schema::bind`]; derived tables are new values.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table. Every row must have one cell per column.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Result<usize, SchemaError> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| SchemaError::MissingColumn {
                column: name.to_string(),
                available: self.columns.iter().map(|c| c.name.clone()).collect(),
            })
    }

    /// Column descriptor by exact name.
    pub fn column(&self, name: &str) -> Result<&Column, SchemaError> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    /// Cells of one column, top to bottom.
    pub fn values(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }

    /// New table with only the rows matching `keep`.
    pub fn filter_rows(&self, mut keep: impl FnMut(&[Value]) -> bool) -> Self {
        let rows = self.rows.iter().filter(|r| keep(r)).cloned().collect();
        Self::new(self.columns.clone(), rows)
    }

    /// Serializable view: one JSON object per row, keys in column order.
    pub fn records(&self) -> Records<'_> {
        Records(self)
    }
}

/// Row-oriented serialization of a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct Records<'a>(&'a Table);

struct Record<'a> {
    columns: &'a [Column],
    row: &'a [Value],
}

impl Serialize for Records<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for row in &self.0.rows {
            seq.serialize_element(&Record {
                columns: &self.0.columns,
                row,
            })?;
        }
        seq.end()
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.row) {
            map.serialize_entry(&column.name, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Category
// =============================================================================

/// A cross-tabulation key.
///
/// Ordering: booleans, then numbers (numerically), then text (lexicographically).
#[derive(Debug, Clone)]
pub enum Category {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Category {
    /// Key for a cell; missing values have no category.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Int(i) => Some(Self::Number(*i as f64)),
            // + 0.0 folds -0.0 into 0.0
            Value::Float(x) => Some(Self::Number(*x + 0.0)),
            Value::Text(s) => Some(Self::Text(s.clone())),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Category {}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{:?}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// Chart Payloads
// =============================================================================

/// One axis of the star plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarPoint {
    pub value: i64,
    pub category: String,
}

/// One axis of the radar plot, with the axis maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub value: i64,
    #[serde(rename = "max-value")]
    pub max_value: i64,
    pub category: String,
}

/// `{"data": [...]}` envelope the chart components read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData<T> {
    pub data: Vec<T>,
}

impl<T> ChartData<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_table() -> Table {
        Table::new(
            vec![
                Column::new("Name", FieldKind::Text),
                Column::new("HP", FieldKind::Integer),
                Column::new("Pr_Male", FieldKind::Float),
            ],
            vec![
                vec![Value::Text("Bulbasaur".into()), Value::Int(45), Value::Float(0.875)],
                vec![Value::Text("Magnemite".into()), Value::Int(25), Value::Null],
            ],
        )
    }

    #[test]
    fn test_records_keep_column_order() {
        let table = sample_table();
        let json = serde_json::to_string(&table.records()).unwrap();
        assert_eq!(
            json,
            r#"[{"Name":"Bulbasaur","HP":45,"Pr_Male":0.875},{"Name":"Magnemite","HP":25,"Pr_Male":null}]"#
        );
    }

    #[test]
    fn test_missing_column_lists_available() {
        let table = sample_table();
        let err = table.column_index("Speed").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Speed"));
        assert!(msg.contains("Name, HP, Pr_Male"));
    }

    #[test]
    fn test_csv_field_format() {
        assert_eq!(Value::Null.to_csv_field(), "");
        assert_eq!(Value::Bool(true).to_csv_field(), "True");
        assert_eq!(Value::Int(-3).to_csv_field(), "-3");
        assert_eq!(Value::Float(3.0).to_csv_field(), "3.0");
        assert_eq!(Value::Float(0.875).to_csv_field(), "0.875");
    }

    #[test]
    fn test_category_ordering() {
        let mut keys = vec![
            Category::Text("Water".into()),
            Category::Number(10.0),
            Category::Number(2.0),
            Category::Text("Bug".into()),
            Category::Bool(true),
        ];
        keys.sort();
        let labels: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(labels, vec!["True", "2", "10", "Bug", "Water"]);
    }

    #[test]
    fn test_category_int_and_float_are_equal() {
        let a = Category::from_value(&Value::Int(1)).unwrap();
        let b = Category::from_value(&Value::Float(1.0)).unwrap();
        assert_eq!(a, b);
        assert!(Category::from_value(&Value::Null).is_none());
    }

    #[test]
    fn test_radar_point_field_names() {
        let point = RadarPoint {
            value: 69,
            max_value: 255,
            category: "HP".into(),
        };
        let json = serde_json::to_value(ChartData::new(vec![point])).unwrap();
        assert_eq!(json, json!({"data": [{"value": 69, "max-value": 255, "category": "HP"}]}));
    }

    #[test]
    fn test_value_from_json() {
        assert_eq!(Value::from_json(&json!(45)), Value::Int(45));
        assert_eq!(Value::from_json(&json!(7.5)), Value::Float(7.5));
        assert_eq!(Value::from_json(&json!(null)), Value::Null);
        assert_eq!(Value::from_json(&json!("Pop")), Value::Text("Pop".into()));
    }
}
