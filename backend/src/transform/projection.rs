//! Row-wise projection: a fixed subset of columns, renamed and coerced.

use crate::error::{CoercionError, TransformResult};
use crate::export::CsvRows;
use crate::models::{FieldKind, Table, Value};

/// One output column of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectedField {
    /// Source column name.
    pub source: &'static str,
    /// Output header.
    pub header: &'static str,
    /// Output type.
    pub kind: FieldKind,
}

impl ProjectedField {
    pub const fn new(source: &'static str, header: &'static str, kind: FieldKind) -> Self {
        Self {
            source,
            header,
            kind,
        }
    }
}

/// Same row count as the source, fixed columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Projection {
    pub fn headers(&self) -> &[String] {
        &self.headers
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
}

impl CsvRows for Projection {
    fn header(&self) -> Vec<String> {
        self.headers.clone()
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_csv_field()).collect())
            .collect()
    }
}

/// Extract `fields` from every row of `table`, coercing each cell.
///
/// A missing cell, or one that cannot be read as the output kind, is an error.
pub fn project(table: &Table, fields: &[ProjectedField]) -> TransformResult<Projection> {
    let indices = fields
        .iter()
        .map(|f| table.column_index(f.source))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(table.len());
    for row in table.rows() {
        let projected = fields
            .iter()
            .zip(&indices)
            .map(|(field, &index)| {
                let value = &row[index];
                convert(value, field.kind).ok_or_else(|| {
                    let err = CoercionError::new(field.source, field.kind);
                    match value {
                        Value::Null => err,
                        other => err.with_value(other.to_csv_field()),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(projected);
    }

    Ok(Projection {
        headers: fields.iter().map(|f| f.header.to_string()).collect(),
        rows,
    })
}

/// Convert a typed cell to `kind`. Integers truncate toward zero.
fn convert(value: &Value, kind: FieldKind) -> Option<Value> {
    match (kind, value) {
        (_, Value::Null) => None,
        (FieldKind::Integer, Value::Int(i)) => Some(Value::Int(*i)),
        (FieldKind::Integer, Value::Float(x)) => Some(Value::Int(x.trunc() as i64)),
        (FieldKind::Integer, Value::Bool(b)) => Some(Value::Int(i64::from(*b))),
        (FieldKind::Integer, Value::Text(s)) => s.trim().parse().ok().map(Value::Int),
        (FieldKind::Float, v) => v
            .as_f64()
            .or_else(|| match v {
                Value::Text(s) => s.trim().parse().ok(),
                _ => None,
            })
            .map(Value::Float),
        (FieldKind::Boolean, Value::Bool(b)) => Some(Value::Bool(*b)),
        (FieldKind::Boolean, _) => None,
        (FieldKind::Text, v) => Some(Value::Text(v.to_csv_field())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::export::write_csv;
    use crate::models::Column;
    use crate::schema::catalog::RADAR_ROW_FIELDS;

    fn bulbasaur() -> Table {
        let columns = [
            ("Name", FieldKind::Text),
            ("Generation", FieldKind::Float),
            ("HP", FieldKind::Float),
            ("Attack", FieldKind::Float),
            ("Defense", FieldKind::Float),
            ("Speed", FieldKind::Float),
            ("Sp_Atk", FieldKind::Float),
            ("Sp_Def", FieldKind::Float),
        ];
        let row = vec![
            Value::Text("Bulbasaur".into()),
            Value::Float(1.0),
            Value::Float(45.0),
            Value::Float(49.0),
            Value::Float(49.0),
            Value::Float(45.0),
            Value::Float(65.0),
            Value::Float(65.0),
        ];
        Table::new(
            columns.iter().map(|(n, k)| Column::new(*n, *k)).collect(),
            vec![row],
        )
    }

    #[test]
    fn test_radar_row_projection() {
        let projection = project(&bulbasaur(), &RADAR_ROW_FIELDS).unwrap();

        assert_eq!(
            projection.headers(),
            &["Pokemon", "Generation", "HP", "Attack", "Defense", "Speed", "SpAttack", "SpDefense"]
        );
        assert_eq!(
            projection.rows()[0],
            vec![
                Value::Text("Bulbasaur".into()),
                Value::Int(1),
                Value::Int(45),
                Value::Int(49),
                Value::Int(49),
                Value::Int(45),
                Value::Int(65),
                Value::Int(65),
            ]
        );
    }

    #[test]
    fn test_projection_csv() {
        let projection = project(&bulbasaur(), &RADAR_ROW_FIELDS).unwrap();
        let mut out = Vec::new();
        write_csv(&mut out, &projection).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Pokemon,Generation,HP,Attack,Defense,Speed,SpAttack,SpDefense\n\
             Bulbasaur,1,45,49,49,45,65,65\n"
        );
    }

    #[test]
    fn test_integer_truncates() {
        assert_eq!(convert(&Value::Float(45.9), FieldKind::Integer), Some(Value::Int(45)));
        assert_eq!(convert(&Value::Float(-2.5), FieldKind::Integer), Some(Value::Int(-2)));
        assert_eq!(convert(&Value::Text("7".into()), FieldKind::Integer), Some(Value::Int(7)));
    }

    #[test]
    fn test_missing_value_is_coercion_error() {
        let table = Table::new(vec![Column::new("HP", FieldKind::Float)], vec![vec![Value::Null]]);
        let fields = [ProjectedField::new("HP", "HP", FieldKind::Integer)];
        let err = project(&table, &fields).unwrap_err();

        match err {
            TransformError::Coercion(e) => {
                assert_eq!(e.column, "HP");
                assert!(e.value.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_text_not_numeric_is_coercion_error() {
        let table = Table::new(
            vec![Column::new("HP", FieldKind::Text)],
            vec![vec![Value::Text("high".into())]],
        );
        let fields = [ProjectedField::new("HP", "HP", FieldKind::Integer)];
        assert!(matches!(
            project(&table, &fields),
            Err(TransformError::Coercion(_))
        ));
    }
}
