//! Error types for the chartprep pipeline.
//!
//! Each stage has its own error type:
//!
//! - [`CsvError`] - loading and decoding the source file
//! - [`SchemaError`] - declared columns that are absent or unusable
//! - [`CoercionError`] - a cell that cannot be read as its declared type
//! - [`TransformError`] - binding and aggregation failures
//! - [`ExportError`] - writing the derived output
//! - [`ValidationError`] - output payloads that break the chart contract
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::FieldKind;

// =============================================================================
// CSV Loading Errors
// =============================================================================

/// Errors while reading a source CSV file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The source file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid CSV format (ragged rows, broken quoting).
    #[error("Invalid CSV format at line {line}: {message}")]
    Malformed { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,

    /// Delimiters must be single-byte ASCII characters.
    #[error("Unsupported delimiter '{0}'")]
    InvalidDelimiter(char),
}

// =============================================================================
// Schema Errors
// =============================================================================

/// A declared column that the loaded table cannot satisfy.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Referenced column is not in the header row.
    #[error("Missing column '{column}' (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// The header row names the same column twice.
    #[error("Duplicate column '{0}' in header row")]
    DuplicateColumn(String),

    /// A numeric aggregate was requested on a non-numeric column.
    #[error("Column '{column}' is {kind}, expected a numeric column")]
    NotNumeric { column: String, kind: FieldKind },
}

// =============================================================================
// Coercion Errors
// =============================================================================

/// A single cell that cannot be read as the type its column declares.
#[derive(Debug, Clone)]
pub struct CoercionError {
    /// Line in the source file (header is line 1), when known.
    pub line: Option<usize>,
    pub column: String,
    pub value: Option<String>,
    pub expected: FieldKind,
}

impl CoercionError {
    pub fn new(column: impl Into<String>, expected: FieldKind) -> Self {
        Self {
            line: None,
            column: column.into(),
            value: None,
            expected,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl std::fmt::Display for CoercionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}, column '{}'", line, self.column)?,
            None => write!(f, "Column '{}'", self.column)?,
        }
        match &self.value {
            Some(value) => write!(f, " (value '{}'): expected {}", value, self.expected),
            None => write!(f, ": missing value where {} expected", self.expected),
        }
    }
}

impl std::error::Error for CoercionError {}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors while binding a table to its schema or deriving a summary.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Schema mismatch.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Type coercion failed.
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// Aggregate over a column without a single usable value.
    #[error("Column '{0}' has no values to aggregate")]
    EmptyColumn(String),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing the derived output.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination could not be created or written.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Flushing buffered output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Output payload rejected by its chart schema.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Schema validation failed.
    #[error("{shape} payload failed validation: {}", .errors.join("; "))]
    Shape { shape: String, errors: Vec<String> },

    /// The file to validate could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file to validate is not JSON.
    #[error("Not a JSON document: {0}")]
    NotJson(#[from] serde_json::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::transform::pipeline::run_job`].
/// It wraps all lower-level errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV loading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Binding or aggregation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Export error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Output validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<SchemaError> for PipelineError {
    fn from(err: SchemaError) -> Self {
        Self::Transform(err.into())
    }
}

impl From<CoercionError> for PipelineError {
    fn from(err: CoercionError) -> Self {
        Self::Transform(err.into())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
