//! Writing derived summaries to disk.
//!
//! CSV output always starts with a header line. JSON output is compact by
//! default; [`JsonStyle::Pretty`] indents it. Existing files are overwritten.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{ExportError, ExportResult};
use crate::models::Table;

/// Serialization target of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Layout of JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    Compact,
    Pretty,
}

/// Anything that can be written as a flat CSV table.
pub trait CsvRows {
    /// Header line.
    fn header(&self) -> Vec<String>;

    /// Data lines, one cell per header entry.
    fn csv_rows(&self) -> Vec<Vec<String>>;
}

impl CsvRows for Table {
    fn header(&self) -> Vec<String> {
        self.columns().iter().map(|c| c.name.clone()).collect()
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.rows()
            .iter()
            .map(|row| row.iter().map(|v| v.to_csv_field()).collect())
            .collect()
    }
}

/// Write `data` as CSV, header first.
pub fn write_csv<W: Write, D: CsvRows + ?Sized>(writer: W, data: &D) -> ExportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(data.header())?;
    for row in data.csv_rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `value` as JSON.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    mut writer: W,
    value: &T,
    style: JsonStyle,
) -> ExportResult<()> {
    match style {
        JsonStyle::Compact => serde_json::to_writer(&mut writer, value)?,
        JsonStyle::Pretty => serde_json::to_writer_pretty(&mut writer, value)?,
    }
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `data` as CSV.
pub fn write_csv_file<D: CsvRows + ?Sized>(path: &Path, data: &D) -> ExportResult<()> {
    let file = create(path)?;
    write_csv(BufWriter::new(file), data)
}

/// Create (or truncate) `path` and write `value` as JSON.
pub fn write_json_file<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    style: JsonStyle,
) -> ExportResult<()> {
    let file = create(path)?;
    write_json(BufWriter::new(file), value, style)
}

fn create(path: &Path) -> ExportResult<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    File::create(path).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
