//! High-level pipeline API: one function per chart job.
//!
//! Every job is the same straight line: load the source CSV, bind it to the
//! job's schema, aggregate, validate the JSON shape (JSON jobs only) and
//! write the output file. Nothing is retried and nothing is kept between
//! runs, so running a job twice against an unchanged source writes the same
//! bytes twice.
//!
//! # Example
//!
//! ```rust,ignore
//! use chartprep::config::{JobConfig, Settings};
//! use chartprep::transform::pipeline::{run_job, Job};
//!
//! let settings = Settings::from_env();
//! let report = run_job(Job::Star, &JobConfig::for_job(Job::Star, &settings))?;
//! println!("{} points written to {}", report.records_written, report.output.display());
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::clean::drop_missing;
use super::crosstab::crosstab;
use super::profile::{profile, ColumnProfile};
use super::projection::project;
use super::stats::{radar_data, star_data, summarize};
use crate::config::JobConfig;
use crate::error::{ExportError, PipelineResult};
use crate::export::{write_csv_file, write_json_file, JsonStyle, OutputFormat};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::Table;
use crate::parser::{parse_csv_file, ParseResult};
use crate::schema::catalog::{
    self, GENERATION_COLUMN, POKEMON_SOURCE, POKEMON_STATS, RADAR_ROW_FIELDS, SURVEY_SOURCE,
    TYPE_COLUMN,
};
use crate::schema::Schema;
use crate::validation::{validate_shape, ChartShape};

/// The chart-data jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    /// Mean base stats for the star plot.
    Star,
    /// Mean and maximum base stats for the radar plot.
    Radar,
    /// Pokémon count per primary type and generation.
    Bar,
    /// Per-Pokémon stat rows.
    RadarRows,
    /// Complete survey answers as JSON records.
    Survey,
}

impl Job {
    /// Every job, in the order `all` runs them.
    pub const ALL: [Job; 5] = [Job::Star, Job::Radar, Job::Bar, Job::RadarRows, Job::Survey];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Star => "star",
            Self::Radar => "radar",
            Self::Bar => "bar",
            Self::RadarRows => "radar-rows",
            Self::Survey => "survey",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Star => "column mean",
            Self::Radar => "column mean + max",
            Self::Bar => "crosstab Type_1 x Generation",
            Self::RadarRows => "row projection",
            Self::Survey => "clean + pass-through",
        }
    }

    /// Source file name, relative to the data directory.
    pub fn source_file(&self) -> &'static str {
        match self {
            Self::Survey => SURVEY_SOURCE,
            _ => POKEMON_SOURCE,
        }
    }

    /// Output file name, relative to the output directory.
    pub fn output_file(&self) -> &'static str {
        match self {
            Self::Star => "star_data.json",
            Self::Radar => "radar_data.json",
            Self::Bar => "bar_data.csv",
            Self::RadarRows => "pokemon_radar_data.csv",
            Self::Survey => "mxmh_survey_results.json",
        }
    }

    pub fn format(&self) -> OutputFormat {
        match self {
            Self::Bar | Self::RadarRows => OutputFormat::Csv,
            Self::Star | Self::Radar | Self::Survey => OutputFormat::Json,
        }
    }

    /// Columns the job reads.
    pub fn schema(&self) -> Schema {
        match self {
            Self::Star | Self::Radar => catalog::pokemon_stats(),
            Self::Bar => catalog::pokemon_type_by_generation(),
            Self::RadarRows => catalog::pokemon_radar_rows(),
            Self::Survey => catalog::survey(),
        }
    }
}

impl std::fmt::Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    pub job: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows_read: usize,
    pub rows_dropped: usize,
    /// Points, lines or records in the output, header excluded.
    pub records_written: usize,
}

impl JobReport {
    fn new(job: &str, input: &Path, output: &Path) -> Self {
        Self {
            job: job.to_string(),
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            rows_read: 0,
            rows_dropped: 0,
            records_written: 0,
        }
    }
}

/// Run `job` with the paths in `config`.
pub fn run_job(job: Job, config: &JobConfig) -> PipelineResult<JobReport> {
    log_info(format!("▶ {} ({})", job, job.description()));

    let parsed = load(&config.input, None)?;
    let table = job.schema().bind(&parsed)?;
    let mut report = JobReport::new(job.name(), &config.input, &config.output);
    report.rows_read = table.len();

    match job {
        Job::Star => {
            let summaries = summarize(&table, &POKEMON_STATS)?;
            report.records_written = summaries.len();
            write_chart(&star_data(&summaries), ChartShape::Star, config)?;
        }
        Job::Radar => {
            let summaries = summarize(&table, &POKEMON_STATS)?;
            report.records_written = summaries.len();
            write_chart(&radar_data(&summaries), ChartShape::Radar, config)?;
        }
        Job::Bar => {
            let counts = crosstab(&table, TYPE_COLUMN, GENERATION_COLUMN)?;
            log_info_indent(
                format!("{} types x {} generations", counts.rows().len(), counts.columns().len()),
                1,
            );
            report.records_written = counts.rows().len();
            write_csv_file(&config.output, &counts)?;
        }
        Job::RadarRows => {
            let projection = project(&table, &RADAR_ROW_FIELDS)?;
            report.records_written = projection.len();
            write_csv_file(&config.output, &projection)?;
        }
        Job::Survey => {
            let cleaned = drop_missing(&table);
            if cleaned.dropped > 0 {
                log_warning(format!("Dropped {} incomplete rows", cleaned.dropped));
            }
            report.rows_dropped = cleaned.dropped;
            report.records_written = cleaned.table.len();
            write_chart(&cleaned.table.records(), ChartShape::Records, config)?;
        }
    }

    log_success(format!(
        "{}: {} written to {}",
        job,
        report.records_written,
        config.output.display()
    ));
    Ok(report)
}

/// Run every job in [`Job::ALL`] order, stopping at the first failure.
pub fn run_all<F>(mut config_for: F) -> PipelineResult<Vec<JobReport>>
where
    F: FnMut(Job) -> JobConfig,
{
    Job::ALL
        .iter()
        .map(|&job| run_job(job, &config_for(job)))
        .collect()
}

/// Options of a generic [`convert`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    /// Remove rows with any missing value first.
    pub drop_missing: bool,
    /// Delimiter of the input; detected when `None`.
    pub delimiter: Option<char>,
    pub json_style: JsonStyle,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            drop_missing: false,
            delimiter: None,
            json_style: JsonStyle::Compact,
        }
    }
}

/// Re-serialize any CSV file, every column kept with an inferred kind.
pub fn convert(input: &Path, output: &Path, options: ConvertOptions) -> PipelineResult<JobReport> {
    log_info(format!("▶ convert {} → {}", input.display(), options.format));

    let parsed = load(input, options.delimiter)?;
    let table = Schema::inferred().bind(&parsed)?;
    let mut report = JobReport::new("convert", input, output);
    report.rows_read = table.len();

    let table = if options.drop_missing {
        let cleaned = drop_missing(&table);
        report.rows_dropped = cleaned.dropped;
        cleaned.table
    } else {
        table
    };
    report.records_written = table.len();

    match options.format {
        OutputFormat::Csv => write_csv_file(output, &table)?,
        OutputFormat::Json => write_json_file(output, &table.records(), options.json_style)?,
    }

    log_success(format!(
        "{} records written to {}",
        report.records_written,
        output.display()
    ));
    Ok(report)
}

/// First look at a CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub encoding: String,
    pub delimiter: char,
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
}

/// Load `input` and profile every column, keeping up to `max_sample` distinct values each.
pub fn inspect(input: &Path, max_sample: usize) -> PipelineResult<Inspection> {
    let parsed = parse_csv_file(input, None)?;
    let table: Table = Schema::inferred().bind(&parsed)?;
    Ok(Inspection {
        encoding: parsed.encoding,
        delimiter: parsed.delimiter,
        rows: table.len(),
        columns: profile(&table, max_sample),
    })
}

fn load(path: &Path, delimiter: Option<char>) -> PipelineResult<ParseResult> {
    log_info_indent(format!("📖 Reading {}", path.display()), 1);
    let parsed = parse_csv_file(path, delimiter)?;
    log_info_indent(
        format!(
            "encoding {}, separator '{}', {} columns, {} rows",
            parsed.encoding,
            format_delimiter(parsed.delimiter),
            parsed.headers.len(),
            parsed.rows.len()
        ),
        1,
    );
    Ok(parsed)
}

fn write_chart<T: Serialize + ?Sized>(
    payload: &T,
    shape: ChartShape,
    config: &JobConfig,
) -> PipelineResult<()> {
    let value = serde_json::to_value(payload).map_err(ExportError::from)?;
    validate_shape(shape, &value)?;
    // The payload itself keeps record key order; `value` would not.
    write_json_file(&config.output, payload, config.json_style)?;
    Ok(())
}

/// Format delimiter for display
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CsvError, PipelineError, SchemaError, TransformError};
    use crate::models::Value;
    use serde_json::json;
    use tempfile::TempDir;

    const POKEMON: &str = "\
Number,Name,Type_1,Total,HP,Attack,Defense,Sp_Atk,Sp_Def,Speed,Generation,isLegendary
1,Bulbasaur,Grass,318,45,49,49,65,65,45,1,False
4,Charmander,Fire,309,39,52,43,60,50,65,1,False
155,Cyndaquil,Fire,309,39,52,43,60,50,65,2,False
";

    const SURVEY: &str = "\
Timestamp,Age,Primary streaming service,Hours per day,While working,Fav genre,BPM,Anxiety,Depression,Insomnia,OCD,Music effects
8/27/2022 19:29:02,18,Spotify,3,Yes,Latin,156,3,0,1,0,
8/27/2022 19:57:31,63,Pandora,1.5,Yes,Rock,119,7,2,2,1,Improve
8/27/2022 21:28:18,18,Spotify,4,No,Video game music,132,7,7,10,2,No effect
";

    fn workspace() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(POKEMON_SOURCE), POKEMON).unwrap();
        std::fs::write(dir.path().join(SURVEY_SOURCE), SURVEY).unwrap();
        dir
    }

    fn config(dir: &TempDir, job: Job) -> JobConfig {
        JobConfig::new(
            dir.path().join(job.source_file()),
            dir.path().join("out").join(job.output_file()),
        )
    }

    fn run(dir: &TempDir, job: Job) -> (JobReport, String) {
        let config = config(dir, job);
        let report = run_job(job, &config).unwrap();
        let text = std::fs::read_to_string(&config.output).unwrap();
        (report, text)
    }

    #[test]
    fn test_star_job() {
        let dir = workspace();
        let (report, text) = run(&dir, Job::Star);

        assert_eq!(report.rows_read, 3);
        assert_eq!(report.records_written, 6);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({"data": [
                {"value": 41, "category": "HP"},
                {"value": 62, "category": "Sp. Attack"},
                {"value": 51, "category": "Attack"},
                {"value": 55, "category": "Sp. Defense"},
                {"value": 45, "category": "Defense"},
                {"value": 58, "category": "Speed"}
            ]})
        );
    }

    #[test]
    fn test_radar_job_carries_maximum() {
        let dir = workspace();
        let (_, text) = run(&dir, Job::Radar);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["data"][0], json!({"value": 41, "max-value": 45, "category": "HP"}));
        assert_eq!(value["data"][5]["max-value"], 65);
    }

    #[test]
    fn test_bar_job() {
        let dir = workspace();
        let (report, text) = run(&dir, Job::Bar);

        assert_eq!(report.records_written, 2);
        assert_eq!(text, "Type_1,1,2\nFire,1,1\nGrass,1,0\n");
    }

    #[test]
    fn test_radar_rows_job() {
        let dir = workspace();
        let (report, text) = run(&dir, Job::RadarRows);

        assert_eq!(report.records_written, 3);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Pokemon,Generation,HP,Attack,Defense,Speed,SpAttack,SpDefense")
        );
        assert_eq!(lines.next(), Some("Bulbasaur,1,45,49,49,45,65,65"));
    }

    #[test]
    fn test_survey_job_drops_incomplete_rows() {
        let dir = workspace();
        let (report, text) = run(&dir, Job::Survey);

        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_dropped, 1);
        assert_eq!(report.records_written, 2);

        let records: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Age"], 63);
        assert_eq!(records[0]["Fav genre"], "Rock");
        assert_eq!(records[1]["Music effects"], "No effect");
        assert!(text.starts_with(r#"[{"Timestamp":"#));
    }

    #[test]
    fn test_runs_are_idempotent() {
        let dir = workspace();
        for job in Job::ALL {
            let (_, first) = run(&dir, job);
            let (_, second) = run(&dir, job);
            assert_eq!(first, second, "{} output changed between runs", job);
        }
    }

    #[test]
    fn test_run_all_in_order() {
        let dir = workspace();
        let reports = run_all(|job| config(&dir, job)).unwrap();

        let names: Vec<&str> = reports.iter().map(|r| r.job.as_str()).collect();
        assert_eq!(names, vec!["star", "radar", "bar", "radar-rows", "survey"]);
    }

    #[test]
    fn test_missing_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_job(Job::Star, &config(&dir, Job::Star)).unwrap_err();
        assert!(matches!(err, PipelineError::Csv(CsvError::Read { .. })));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(POKEMON_SOURCE), "Name,HP\nBulbasaur,45\n").unwrap();
        let config = config(&dir, Job::Star);

        let err = run_job(Job::Star, &config).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transform(TransformError::Schema(SchemaError::MissingColumn { .. }))
        ));
        assert!(!config.output.exists());
    }

    fn reference_table(input: &Path) -> Table {
        let parsed = parse_csv_file(input, None).unwrap();
        drop_missing(&Schema::inferred().bind(&parsed).unwrap()).table
    }

    #[test]
    fn test_convert_json_round_trip() {
        let dir = workspace();
        let input = dir.path().join(SURVEY_SOURCE);
        let output = dir.path().join("survey.json");
        let options = ConvertOptions {
            drop_missing: true,
            ..ConvertOptions::default()
        };
        convert(&input, &output, options).unwrap();

        let original = reference_table(&input);
        let records: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();

        assert_eq!(records.len(), original.len());
        for (record, row) in records.iter().zip(original.rows()) {
            let keys: Vec<&str> = record.keys().map(String::as_str).collect();
            assert_eq!(keys.len(), original.columns().len());
            for (column, value) in original.columns().iter().zip(row) {
                assert_eq!(&Value::from_json(&record[&column.name]), value);
            }
        }
    }

    #[test]
    fn test_convert_csv_round_trip() {
        let dir = workspace();
        let input = dir.path().join(SURVEY_SOURCE);
        let output = dir.path().join("survey.csv");
        let options = ConvertOptions {
            format: OutputFormat::Csv,
            drop_missing: true,
            ..ConvertOptions::default()
        };
        let report = convert(&input, &output, options).unwrap();
        assert_eq!(report.rows_dropped, 1);

        let original = reference_table(&input);
        let reread = Schema::inferred().bind(&parse_csv_file(&output, None).unwrap()).unwrap();
        assert_eq!(reread, original);
    }

    #[test]
    fn test_convert_keeps_missing_values_unless_asked() {
        let dir = workspace();
        let input = dir.path().join(SURVEY_SOURCE);
        let output = dir.path().join("survey.json");
        let report = convert(&input, &output, ConvertOptions::default()).unwrap();

        assert_eq!(report.records_written, 3);
        let records: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert!(records[0]["Music effects"].is_null());
    }

    #[test]
    fn test_inspect() {
        let dir = workspace();
        let inspection = inspect(&dir.path().join(POKEMON_SOURCE), 3).unwrap();

        assert_eq!(inspection.delimiter, ',');
        assert_eq!(inspection.rows, 3);
        assert_eq!(inspection.columns.len(), 12);
        assert_eq!(inspection.columns[2].name, "Type_1");
        assert_eq!(inspection.columns[2].sample, vec!["Fire", "Grass"]);
    }
}
