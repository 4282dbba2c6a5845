//! Explicit column schemas.
//!
//! A [`Schema`] is an ordered list of typed field descriptors. Binding a
//! [`ParseResult`] checks every declared column once, up front, and turns the
//! raw text cells into a typed [`Table`]. A missing column or an unreadable
//! cell fails the bind; nothing downstream looks columns up by guesswork.
//!
//! # Example
//!
//! ```rust,ignore
//! use chartprep::schema::{FieldSpec, Schema};
//!
//! let schema = Schema::new(&[FieldSpec::text("Name"), FieldSpec::integer("HP")]);
//! let table = schema.bind(&parsed)?;
//! assert_eq!(table.column_names(), vec!["Name", "HP"]);
//! ```

pub mod catalog;

use crate::error::{CoercionError, SchemaError, TransformResult};
use crate::models::{Column, FieldKind, Table, Value};
use crate::parser::ParseResult;

/// Cell contents read as a missing value.
pub const NULL_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell stands for a missing value.
pub fn is_missing(raw: &str) -> bool {
    NULL_MARKERS.contains(&raw)
}

/// A declared column: exact header name and expected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub const fn float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }
}

/// What to do with source columns the schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extras {
    /// Keep declared columns only, in declaration order.
    #[default]
    Drop,
    /// Keep every source column in source order; undeclared ones get an
    /// inferred kind.
    Infer,
}

/// Ordered list of typed field descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    extras: Extras,
}

impl Schema {
    /// Schema over exactly the given fields.
    pub fn new(fields: &[FieldSpec]) -> Self {
        Self {
            fields: fields.to_vec(),
            extras: Extras::Drop,
        }
    }

    /// Schema that declares nothing and keeps every column with an inferred kind.
    pub fn inferred() -> Self {
        Self {
            fields: Vec::new(),
            extras: Extras::Infer,
        }
    }

    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras = extras;
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn extras(&self) -> Extras {
        self.extras
    }

    /// Check the header row and type every cell.
    pub fn bind(&self, parsed: &ParseResult) -> TransformResult<Table> {
        check_duplicates(&parsed.headers)?;

        let mut declared = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let index = parsed
                .headers
                .iter()
                .position(|h| h == field.name)
                .ok_or_else(|| SchemaError::MissingColumn {
                    column: field.name.to_string(),
                    available: parsed.headers.clone(),
                })?;
            declared.push((index, field.kind));
        }

        let layout: Vec<(usize, FieldKind)> = match self.extras {
            Extras::Drop => declared,
            Extras::Infer => (0..parsed.headers.len())
                .map(|index| {
                    let kind = declared
                        .iter()
                        .find(|(i, _)| *i == index)
                        .map(|(_, kind)| *kind)
                        .unwrap_or_else(|| {
                            infer_kind(parsed.rows.iter().map(|r| r.cells[index].as_str()))
                        });
                    (index, kind)
                })
                .collect(),
        };

        let columns = layout
            .iter()
            .map(|(index, kind)| Column::new(parsed.headers[*index].clone(), *kind))
            .collect();

        let mut rows = Vec::with_capacity(parsed.rows.len());
        for raw in &parsed.rows {
            let mut row = Vec::with_capacity(layout.len());
            for (index, kind) in &layout {
                let cell = raw.cells[*index].as_str();
                let value = if is_missing(cell) {
                    Value::Null
                } else {
                    coerce(cell, *kind).ok_or_else(|| {
                        CoercionError::new(parsed.headers[*index].clone(), *kind)
                            .at_line(raw.line)
                            .with_value(cell)
                    })?
                };
                row.push(value);
            }
            rows.push(row);
        }

        Ok(Table::new(columns, rows))
    }
}

fn check_duplicates(headers: &[String]) -> Result<(), SchemaError> {
    for (i, header) in headers.iter().enumerate() {
        if headers[..i].contains(header) {
            return Err(SchemaError::DuplicateColumn(header.clone()));
        }
    }
    Ok(())
}

/// Read a non-missing raw cell as `kind`. `None` when it does not fit.
///
/// Integers accept whole-valued decimals (`"45.0"`); booleans accept
/// `true`/`false` in any case.
pub fn coerce(raw: &str, kind: FieldKind) -> Option<Value> {
    let trimmed = raw.trim();
    match kind {
        FieldKind::Integer => trimmed.parse::<i64>().ok().map(Value::Int).or_else(|| {
            parse_finite(trimmed)
                .filter(|x| x.fract() == 0.0 && x.abs() < i64::MAX as f64)
                .map(|x| Value::Int(x as i64))
        }),
        FieldKind::Float => parse_finite(trimmed).map(Value::Float),
        FieldKind::Boolean => parse_bool(trimmed).map(Value::Bool),
        FieldKind::Text => Some(Value::Text(raw.to_string())),
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|x| x.is_finite())
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Narrowest kind that reads every non-missing cell.
///
/// Integer, then float, then boolean, else text. A column with no values is text.
pub fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> FieldKind {
    let present: Vec<&str> = cells.filter(|c| !is_missing(c)).collect();
    if present.is_empty() {
        return FieldKind::Text;
    }

    if present.iter().all(|c| c.trim().parse::<i64>().is_ok()) {
        FieldKind::Integer
    } else if present.iter().all(|c| parse_finite(c.trim()).is_some()) {
        FieldKind::Float
    } else if present.iter().all(|c| parse_bool(c.trim()).is_some()) {
        FieldKind::Boolean
    } else {
        FieldKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::parser::parse_str;

    const POKEMON: &str = "\
Number,Name,Type_1,HP,Generation,isLegendary,Pr_Male
1,Bulbasaur,Grass,45,1,False,0.875
81,Magnemite,Electric,25,1,False,
";

    #[test]
    fn test_bind_declared_fields_in_declaration_order() {
        let parsed = parse_str(POKEMON, ',').unwrap();
        let schema = Schema::new(&[FieldSpec::integer("HP"), FieldSpec::text("Name")]);
        let table = schema.bind(&parsed).unwrap();

        assert_eq!(table.column_names(), vec!["HP", "Name"]);
        assert_eq!(table.rows()[0], vec![Value::Int(45), Value::Text("Bulbasaur".into())]);
    }

    #[test]
    fn test_bind_missing_column() {
        let parsed = parse_str(POKEMON, ',').unwrap();
        let schema = Schema::new(&[FieldSpec::integer("Sp_Atk")]);
        let err = schema.bind(&parsed).unwrap_err();

        match err {
            TransformError::Schema(SchemaError::MissingColumn { column, available }) => {
                assert_eq!(column, "Sp_Atk");
                assert!(available.contains(&"HP".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bind_coercion_error_reports_line() {
        let parsed = parse_str("Name,HP\nBulbasaur,45\nMissingNo,lots\n", ',').unwrap();
        let schema = Schema::new(&[FieldSpec::integer("HP")]);
        let err = schema.bind(&parsed).unwrap_err();

        match err {
            TransformError::Coercion(e) => {
                assert_eq!(e.line, Some(3));
                assert_eq!(e.column, "HP");
                assert_eq!(e.value.as_deref(), Some("lots"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bind_missing_cells_become_null() {
        let parsed = parse_str(POKEMON, ',').unwrap();
        let schema = Schema::new(&[FieldSpec::float("Pr_Male")]);
        let table = schema.bind(&parsed).unwrap();

        assert_eq!(table.rows()[0][0], Value::Float(0.875));
        assert_eq!(table.rows()[1][0], Value::Null);
    }

    #[test]
    fn test_bind_infer_keeps_source_order_and_declared_kinds() {
        let parsed = parse_str(POKEMON, ',').unwrap();
        let schema = Schema::new(&[FieldSpec::float("HP")]).with_extras(Extras::Infer);
        let table = schema.bind(&parsed).unwrap();

        assert_eq!(
            table.column_names(),
            vec!["Number", "Name", "Type_1", "HP", "Generation", "isLegendary", "Pr_Male"]
        );
        let kinds: Vec<FieldKind> = table.columns().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::Integer,
                FieldKind::Text,
                FieldKind::Text,
                FieldKind::Float,
                FieldKind::Integer,
                FieldKind::Boolean,
                FieldKind::Float,
            ]
        );
        assert_eq!(table.rows()[0][5], Value::Bool(false));
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let parsed = parse_str("HP,HP\n1,2\n", ',').unwrap();
        let err = Schema::inferred().bind(&parsed).unwrap_err();
        assert!(matches!(err, TransformError::Schema(SchemaError::DuplicateColumn(ref c)) if c == "HP"));
    }

    #[test]
    fn test_coerce_integer_accepts_whole_decimals() {
        assert_eq!(coerce("45", FieldKind::Integer), Some(Value::Int(45)));
        assert_eq!(coerce("45.0", FieldKind::Integer), Some(Value::Int(45)));
        assert_eq!(coerce("45.5", FieldKind::Integer), None);
        assert_eq!(coerce("inf", FieldKind::Float), None);
        assert_eq!(coerce("TRUE", FieldKind::Boolean), Some(Value::Bool(true)));
    }

    #[test]
    fn test_missing_markers() {
        for marker in ["", "NA", "NaN", "nan", "null", "N/A"] {
            assert!(is_missing(marker), "{marker:?} should be missing");
        }
        assert!(!is_missing("0"));
        assert!(!is_missing("None of the above"));
    }

    #[test]
    fn test_infer_kind() {
        assert_eq!(infer_kind(["1", "2", ""].into_iter()), FieldKind::Integer);
        assert_eq!(infer_kind(["1", "2.5"].into_iter()), FieldKind::Float);
        assert_eq!(infer_kind(["True", "false"].into_iter()), FieldKind::Boolean);
        assert_eq!(infer_kind(["Yes", "No"].into_iter()), FieldKind::Text);
        assert_eq!(infer_kind(["", "NaN"].into_iter()), FieldKind::Text);
    }
}
