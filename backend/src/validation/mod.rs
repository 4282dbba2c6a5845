//! JSON Schema validation for the chart payloads.
//!
//! The front-end components read fixed shapes; every JSON payload is checked
//! against its shape before it is written, and the `validate` command checks
//! files already on disk.
//!
//! # Embedded Schemas
//!
//! Schemas (JSON Schema Draft 7) are embedded at compile time from `schemas/`:
//! - `chart-star.json` - `{"data": [{"value", "category"}]}`
//! - `chart-radar.json` - `{"data": [{"value", "max-value", "category"}]}`
//! - `records.json` - list of complete records (no missing values)
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use chartprep::validation::{validate_shape, ChartShape};
//!
//! let star = json!({"data": [{"value": 69, "category": "HP"}]});
//! assert!(validate_shape(ChartShape::Star, &star).is_ok());
//! ```

use std::path::Path;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::ValidationError;

static STAR_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/chart-star.json"))
        .expect("Invalid embedded schema")
});

static RADAR_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/chart-radar.json"))
        .expect("Invalid embedded schema")
});

static RECORDS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/records.json"))
        .expect("Invalid embedded schema")
});

/// Payload shapes the chart components read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartShape {
    Star,
    Radar,
    Records,
}

impl ChartShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Star => "star",
            Self::Radar => "radar",
            Self::Records => "records",
        }
    }

    fn schema(&self) -> &'static Value {
        match self {
            Self::Star => &*STAR_SCHEMA,
            Self::Radar => &*RADAR_SCHEMA,
            Self::Records => &*RECORDS_SCHEMA,
        }
    }
}

/// Validate a JSON value against a JSON schema.
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(Vec<String>)` with one message per violation
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Simple yes/no variant of [`validate`].
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate against one of the embedded chart shapes.
pub fn validate_shape(shape: ChartShape, data: &Value) -> Result<(), ValidationError> {
    validate(shape.schema(), data).map_err(|errors| ValidationError::Shape {
        shape: shape.name().to_string(),
        errors,
    })
}

/// Quick check against one of the embedded chart shapes.
pub fn is_valid_shape(shape: ChartShape, data: &Value) -> bool {
    is_valid(shape.schema(), data)
}

/// Read a JSON file and validate it against `shape`.
pub fn validate_file(path: &Path, shape: ChartShape) -> Result<(), ValidationError> {
    let content = std::fs::read_to_string(path).map_err(|source| ValidationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let data: Value = serde_json::from_str(&content)?;
    validate_shape(shape, &data)
}
