//! # Chartprep - chart data from tabular datasets
//!
//! Chartprep reads the Pokémon stats table and the music and mental health
//! survey, and writes the small CSV and JSON files the front-end chart
//! components load (star, radar and bar charts, per-Pokémon radar rows and
//! survey records).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│   Schema    │────▶│  Transform  │
//! │  (ISO/UTF8) │     │  (auto-enc) │     │  (bind +    │     │ (mean, cross│
//! └─────────────┘     └─────────────┘     │   coerce)   │     │  tab, ...)  │
//!                                         └─────────────┘     └──────┬──────┘
//!                                                                    │
//!                                         ┌─────────────┐     ┌──────▼──────┐
//!                                         │ CSV / JSON  │◀────│  Validate + │
//!                                         │   output    │     │   Export    │
//!                                         └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chartprep::{run_job, Job, JobConfig, Settings};
//!
//! fn main() -> Result<(), chartprep::PipelineError> {
//!     let settings = Settings::from_env();
//!     for job in Job::ALL {
//!         let report = run_job(job, &JobConfig::for_job(job, &settings))?;
//!         println!("{}: {} records", report.job, report.records_written);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Typed cells, tables and chart payloads
//! - [`parser`] - CSV parsing with auto-detection
//! - [`schema`] - Column declarations and binding
//! - [`transform`] - Aggregations and the job pipeline
//! - [`export`] - CSV and JSON writers
//! - [`validation`] - JSON Schema checks of the chart payloads
//! - [`config`] - Environment and per-job settings
//! - [`logs`] - Progress logging

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;
pub mod schema;

// Transformation
pub mod transform;

// Output
pub mod export;
pub mod validation;

// Ambient
pub mod config;
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CoercionError,
    CsvError,
    ExportError,
    PipelineError,
    PipelineResult,
    SchemaError,
    TransformError,
    ValidationError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Category,
    ChartData,
    Column,
    FieldKind,
    RadarPoint,
    StarPoint,
    Table,
    Value,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    detect_delimiter,
    detect_encoding,
    parse_bytes,
    parse_csv_file,
    parse_str,
    ParseResult,
};

// =============================================================================
// Re-exports - Schema
// =============================================================================

pub use schema::{Extras, FieldSpec, Schema};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::clean::drop_missing;
pub use transform::crosstab::{crosstab, CrossTab};
pub use transform::projection::{project, ProjectedField, Projection};
pub use transform::stats::{radar_data, star_data, summarize, ColumnSummary, StatColumn};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    convert,
    inspect,
    run_all,
    run_job,
    ConvertOptions,
    Inspection,
    Job,
    JobReport,
};

// =============================================================================
// Re-exports - Export / Validation / Config
// =============================================================================

pub use config::{JobConfig, Settings};
pub use export::{JsonStyle, OutputFormat};
pub use validation::{is_valid_shape, validate_file, validate_shape, ChartShape};
