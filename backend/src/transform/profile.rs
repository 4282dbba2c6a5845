//! Column profiles for a first look at an unfamiliar file.
//!
//! For every column: inferred kind, missing count, distinct count and the
//! first few distinct values in sorted order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{Category, FieldKind, Table};

/// Summary of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: FieldKind,
    pub missing: usize,
    pub distinct: usize,
    /// Up to `max_sample` distinct values, sorted.
    pub sample: Vec<String>,
}

/// Profile every column of `table`.
pub fn profile(table: &Table, max_sample: usize) -> Vec<ColumnProfile> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let mut missing = 0;
            let mut distinct = BTreeSet::new();
            for value in table.values(index) {
                match Category::from_value(value) {
                    Some(key) => {
                        distinct.insert(key);
                    }
                    None => missing += 1,
                }
            }

            ColumnProfile {
                name: column.name.clone(),
                kind: column.kind,
                missing,
                distinct: distinct.len(),
                sample: distinct.iter().take(max_sample).map(|k| k.to_string()).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use crate::schema::Schema;

    #[test]
    fn test_profile_counts() {
        let csv = "Type_1,Generation,Pr_Male\nGrass,1,0.875\nFire,1,\nGrass,2,0.5\nWater,1,\n";
        let table = Schema::inferred().bind(&parse_str(csv, ',').unwrap()).unwrap();
        let profiles = profile(&table, 2);

        assert_eq!(profiles[0].name, "Type_1");
        assert_eq!(profiles[0].kind, FieldKind::Text);
        assert_eq!(profiles[0].distinct, 3);
        assert_eq!(profiles[0].sample, vec!["Fire", "Grass"]);

        assert_eq!(profiles[1].kind, FieldKind::Integer);
        assert_eq!(profiles[1].sample, vec!["1", "2"]);

        assert_eq!(profiles[2].kind, FieldKind::Float);
        assert_eq!(profiles[2].missing, 2);
        assert_eq!(profiles[2].sample, vec!["0.5", "0.875"]);
    }
}
