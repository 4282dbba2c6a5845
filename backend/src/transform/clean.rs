//! Missing-value removal.

use crate::models::{Table, Value};

/// A table with incomplete rows removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    pub table: Table,
    /// Number of rows removed.
    pub dropped: usize,
}

/// Drop every row holding a missing value in any column. Rows are never repaired.
pub fn drop_missing(table: &Table) -> Cleaned {
    let cleaned = table.filter_rows(|row| !row.iter().any(Value::is_null));
    Cleaned {
        dropped: table.len() - cleaned.len(),
        table: cleaned,
    }
}

/// Whether any cell of `table` is missing.
pub fn has_missing(table: &Table) -> bool {
    table.rows().iter().flatten().any(Value::is_null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Column, FieldKind};

    #[test]
    fn test_rows_with_any_missing_value_dropped() {
        let table = Table::new(
            vec![
                Column::new("Age", FieldKind::Integer),
                Column::new("Fav genre", FieldKind::Text),
                Column::new("BPM", FieldKind::Integer),
            ],
            vec![
                vec![Value::Int(18), Value::Text("Latin".into()), Value::Int(156)],
                vec![Value::Int(63), Value::Text("Rock".into()), Value::Null],
                vec![Value::Null, Value::Text("Jazz".into()), Value::Int(132)],
                vec![Value::Int(61), Value::Text("Jazz".into()), Value::Int(84)],
            ],
        );
        assert!(has_missing(&table));

        let cleaned = drop_missing(&table);
        assert_eq!(cleaned.dropped, 2);
        assert_eq!(cleaned.table.len(), 2);
        assert!(!has_missing(&cleaned.table));
        assert_eq!(cleaned.table.rows()[1][0], Value::Int(61));
    }

    #[test]
    fn test_complete_table_unchanged() {
        let table = Table::new(
            vec![Column::new("HP", FieldKind::Integer)],
            vec![vec![Value::Int(1)], vec![Value::Int(2)]],
        );
        let cleaned = drop_missing(&table);
        assert_eq!(cleaned.dropped, 0);
        assert_eq!(cleaned.table, table);
    }
}
