//! Run configuration.
//!
//! Defaults come from the environment (a `.env` file is read first if
//! present); command-line flags override individual values.
//!
//! | Variable             | Default | Meaning                          |
//! |----------------------|---------|----------------------------------|
//! | `CHARTPREP_DATA_DIR` | `data`  | Directory holding the source CSVs |
//! | `CHARTPREP_OUT_DIR`  | `.`     | Directory receiving the outputs  |
//! | `CHARTPREP_PRETTY`   | off     | Indent JSON output (`1`/`true`)  |

use std::env;
use std::path::{Path, PathBuf};

use crate::export::JsonStyle;
use crate::transform::pipeline::Job;

/// Default directory holding the source CSVs.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default directory receiving the outputs.
pub const DEFAULT_OUT_DIR: &str = ".";

/// Directory-level settings shared by every job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub json_style: JsonStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            json_style: JsonStyle::Compact,
        }
    }
}

impl Settings {
    /// Load `.env` (if any) and read the `CHARTPREP_*` variables.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: lookup("CHARTPREP_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            out_dir: lookup("CHARTPREP_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.out_dir),
            json_style: match lookup("CHARTPREP_PRETTY").as_deref().map(str::trim) {
                Some("1") | Some("true") | Some("yes") => JsonStyle::Pretty,
                _ => defaults.json_style,
            },
        }
    }

    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.out_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_json_style(mut self, style: JsonStyle) -> Self {
        self.json_style = style;
        self
    }
}

/// Everything one job needs: where to read, where to write, how to lay out JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub json_style: JsonStyle,
}

impl JobConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            json_style: JsonStyle::default(),
        }
    }

    /// Default source and destination of `job` under `settings`.
    pub fn for_job(job: Job, settings: &Settings) -> Self {
        Self {
            input: settings.data_dir.join(job.source_file()),
            output: settings.out_dir.join(job.output_file()),
            json_style: settings.json_style,
        }
    }

    pub fn with_json_style(mut self, style: JsonStyle) -> Self {
        self.json_style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_environment() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CHARTPREP_DATA_DIR", "/srv/datasets"),
            ("CHARTPREP_OUT_DIR", "public/data"),
            ("CHARTPREP_PRETTY", "true"),
        ]
        .into_iter()
        .collect();
        let settings = Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.data_dir, PathBuf::from("/srv/datasets"));
        assert_eq!(settings.out_dir, PathBuf::from("public/data"));
        assert_eq!(settings.json_style, JsonStyle::Pretty);
    }

    #[test]
    fn test_job_paths() {
        let settings = Settings::default().with_data_dir("in").with_out_dir("out");
        let config = JobConfig::for_job(Job::Bar, &settings);

        assert_eq!(config.input, PathBuf::from("in/pokemon_alopez247.csv"));
        assert_eq!(config.output, PathBuf::from("out/bar_data.csv"));
    }
}
