//! Cross-tabulate two categorical columns into a count matrix.
//!
//! # Architecture
//!
//! ```text
//! Source rows                      →  Count matrix
//! ┌──────────────────────────┐       ┌──────────┬───┬───┐
//! │ Type_1: Fire, Gen: 1     │       │ Type_1   │ 1 │ 2 │
//! │ Type_1: Fire, Gen: 1     │  →    ├──────────┼───┼───┤
//! │ Type_1: Fire, Gen: 2     │       │ Fire     │ 2 │ 1 │
//! │ Type_1: Water, Gen: 2    │       │ Water    │ 0 │ 1 │
//! └──────────────────────────┘       └──────────┴───┴───┘
//! ```
//!
//! Rows and columns are the distinct values of each column, sorted
//! ascending (numbers numerically, text lexicographically). Rows where
//! either value is missing are not counted.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::TransformResult;
use crate::export::CsvRows;
use crate::models::{Category, Table};

/// Co-occurrence counts of two categorical columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTab {
    index_name: String,
    rows: Vec<Category>,
    columns: Vec<Category>,
    counts: Vec<Vec<u64>>,
}

impl CrossTab {
    /// Name of the column whose values label the rows.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Distinct row values, sorted.
    pub fn rows(&self) -> &[Category] {
        &self.rows
    }

    /// Distinct column values, sorted.
    pub fn columns(&self) -> &[Category] {
        &self.columns
    }

    /// Count matrix, `counts[row][column]`.
    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    /// Count for one cell; 0 for combinations never seen.
    pub fn get(&self, row: &Category, column: &Category) -> u64 {
        let (Ok(r), Ok(c)) = (self.rows.binary_search(row), self.columns.binary_search(column)) else {
            return 0;
        };
        self.counts[r][c]
    }

    /// Number of rows that were counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

impl CsvRows for CrossTab {
    fn header(&self) -> Vec<String> {
        std::iter::once(self.index_name.clone())
            .chain(self.columns.iter().map(|c| c.to_string()))
            .collect()
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .zip(&self.counts)
            .map(|(label, counts)| {
                std::iter::once(label.to_string())
                    .chain(counts.iter().map(|n| n.to_string()))
                    .collect()
            })
            .collect()
    }
}

/// Count each `(index, columns)` value pair of `table`.
pub fn crosstab(table: &Table, index: &str, columns: &str) -> TransformResult<CrossTab> {
    let row_idx = table.column_index(index)?;
    let col_idx = table.column_index(columns)?;

    let mut cells: BTreeMap<Category, BTreeMap<Category, u64>> = BTreeMap::new();
    let mut column_keys: BTreeSet<Category> = BTreeSet::new();

    for row in table.rows() {
        let (Some(r), Some(c)) = (
            Category::from_value(&row[row_idx]),
            Category::from_value(&row[col_idx]),
        ) else {
            continue;
        };
        column_keys.insert(c.clone());
        *cells.entry(r).or_default().entry(c).or_insert(0) += 1;
    }

    let columns: Vec<Category> = column_keys.into_iter().collect();
    let mut rows = Vec::with_capacity(cells.len());
    let mut counts = Vec::with_capacity(cells.len());
    for (key, seen) in cells {
        counts.push(
            columns
                .iter()
                .map(|c| seen.get(c).copied().unwrap_or(0))
                .collect(),
        );
        rows.push(key);
    }

    Ok(CrossTab {
        index_name: index.to_string(),
        rows,
        columns,
        counts,
    })
}
