//! Per-column aggregate statistics for the star and radar plots.
//!
//! ```text
//! HP   Attack  ...            value  max-value  category
//! 45   49                 →   69     255        HP
//! 60   62                     79     190        Attack
//! ```

use crate::error::{SchemaError, TransformError, TransformResult};
use crate::models::{ChartData, RadarPoint, StarPoint, Table};

/// A numeric column and the label the chart shows for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatColumn {
    pub column: &'static str,
    pub label: &'static str,
}

impl StatColumn {
    pub const fn new(column: &'static str, label: &'static str) -> Self {
        Self { column, label }
    }
}

/// Rounded mean and maximum of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub column: String,
    pub label: String,
    pub mean: i64,
    pub max: i64,
}

impl ColumnSummary {
    pub fn star_point(&self) -> StarPoint {
        StarPoint {
            value: self.mean,
            category: self.label.clone(),
        }
    }

    pub fn radar_point(&self) -> RadarPoint {
        RadarPoint {
            value: self.mean,
            max_value: self.max,
            category: self.label.clone(),
        }
    }
}

/// Round to the nearest integer, halves to the even neighbour (68.5 → 68).
pub fn round_half_even(x: f64) -> i64 {
    x.round_ties_even() as i64
}

/// Mean and maximum of a numeric column, skipping missing cells.
fn mean_and_max(table: &Table, name: &str) -> TransformResult<(f64, f64)> {
    let index = table.column_index(name)?;
    let column = &table.columns()[index];
    if !column.kind.is_numeric() {
        return Err(SchemaError::NotNumeric {
            column: name.to_string(),
            kind: column.kind,
        }
        .into());
    }

    let mut sum = 0.0;
    let mut count = 0usize;
    let mut max = f64::NEG_INFINITY;
    for x in table.values(index).filter_map(|v| v.as_f64()) {
        sum += x;
        count += 1;
        max = max.max(x);
    }

    if count == 0 {
        return Err(TransformError::EmptyColumn(name.to_string()));
    }
    Ok((sum / count as f64, max))
}

/// Arithmetic mean of a numeric column, missing cells skipped.
pub fn column_mean(table: &Table, name: &str) -> TransformResult<f64> {
    mean_and_max(table, name).map(|(mean, _)| mean)
}

/// Summaries for `columns`, in the given order.
pub fn summarize(table: &Table, columns: &[StatColumn]) -> TransformResult<Vec<ColumnSummary>> {
    columns
        .iter()
        .map(|stat| {
            let (mean, max) = mean_and_max(table, stat.column)?;
            Ok(ColumnSummary {
                column: stat.column.to_string(),
                label: stat.label.to_string(),
                mean: round_half_even(mean),
                max: round_half_even(max),
            })
        })
        .collect()
}

/// `{"data": [{"value", "category"}]}` payload.
pub fn star_data(summaries: &[ColumnSummary]) -> ChartData<StarPoint> {
    ChartData::new(summaries.iter().map(ColumnSummary::star_point).collect())
}

/// `{"data": [{"value", "max-value", "category"}]}` payload.
pub fn radar_data(summaries: &[ColumnSummary]) -> ChartData<RadarPoint> {
    ChartData::new(summaries.iter().map(ColumnSummary::radar_point).collect())
}
