//! Transformation module.
//!
//! This module turns bound tables into chart payloads:
//! - Stats: column means and maxima (star and radar plots)
//! - Crosstab: co-occurrence counts (bar chart)
//! - Projection: fixed per-row subsets (per-Pokémon radar rows)
//! - Clean: missing-row removal
//! - Profile: column summaries for `inspect`
//! - Pipeline: the jobs that chain load, bind, aggregate and export

pub mod clean;
pub mod crosstab;
pub mod pipeline;
pub mod profile;
pub mod projection;
pub mod stats;

pub use pipeline::*;
