//! Chartprep CLI - Build chart data files from CSV datasets
//!
//! # Main Commands
//!
//! ```bash
//! chartprep all                      # Run every job with the default paths
//! chartprep run star                 # Run one job
//! chartprep jobs                     # List jobs, sources and outputs
//! ```
//!
//! # Utility Commands
//!
//! ```bash
//! chartprep convert input.csv        # Any CSV to JSON records (or CSV)
//! chartprep inspect input.csv        # Column kinds, missing and distinct counts
//! chartprep validate star_data.json --shape star
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use chartprep::logs::{init_logging, log_info, log_success};
use chartprep::transform::pipeline::format_delimiter;
use chartprep::{
    convert, inspect, run_all, run_job, validate_file, ChartShape, ConvertOptions, Job,
    JobConfig, JobReport, JsonStyle, OutputFormat, Settings,
};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "chartprep")]
#[command(about = "Aggregate CSV datasets into chart-ready CSV and JSON files", long_about = None)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single job
    Run {
        job: JobArg,

        /// Source CSV (default: <data dir>/<job source>)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: <out dir>/<job output>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Run every job in order
    All {
        /// Directory holding the source CSVs
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Directory receiving the outputs
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Indent JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List the jobs
    Jobs,

    /// Convert any CSV file to JSON records or CSV
    Convert {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: input with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,

        /// Remove rows with any missing value
        #[arg(long)]
        drop_missing: bool,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Indent JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show column kinds, missing and distinct counts of a CSV file
    Inspect {
        /// Input CSV file
        input: PathBuf,

        /// Distinct values shown per column
        #[arg(long, default_value = "5")]
        distinct: usize,
    },

    /// Validate a JSON file against a chart shape
    Validate {
        /// Input JSON file
        input: PathBuf,

        /// Expected shape
        #[arg(short, long, value_enum)]
        shape: ShapeArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum JobArg {
    Star,
    Radar,
    Bar,
    RadarRows,
    Survey,
}

impl From<JobArg> for Job {
    fn from(arg: JobArg) -> Self {
        match arg {
            JobArg::Star => Job::Star,
            JobArg::Radar => Job::Radar,
            JobArg::Bar => Job::Bar,
            JobArg::RadarRows => Job::RadarRows,
            JobArg::Survey => Job::Survey,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Star,
    Radar,
    Records,
}

impl From<ShapeArg> for ChartShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Star => ChartShape::Star,
            ShapeArg::Radar => ChartShape::Radar,
            ShapeArg::Records => ChartShape::Records,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    });

    let result = match cli.command {
        Commands::Run {
            job,
            input,
            output,
            pretty,
        } => cmd_run(job.into(), input, output, pretty),

        Commands::All {
            data_dir,
            out_dir,
            pretty,
        } => cmd_all(data_dir, out_dir, pretty),

        Commands::Jobs => cmd_jobs(),

        Commands::Convert {
            input,
            output,
            format,
            drop_missing,
            delimiter,
            pretty,
        } => {
            let options = ConvertOptions {
                format: format.into(),
                drop_missing,
                delimiter,
                json_style: json_style(pretty),
            };
            cmd_convert(&input, output.as_deref(), options)
        }

        Commands::Inspect { input, distinct } => cmd_inspect(&input, distinct),

        Commands::Validate { input, shape } => cmd_validate(&input, shape.into()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// `--pretty` forces indentation; otherwise the environment decides.
fn settings(pretty: bool) -> Settings {
    let settings = Settings::from_env();
    if pretty {
        settings.with_json_style(JsonStyle::Pretty)
    } else {
        settings
    }
}

fn json_style(pretty: bool) -> JsonStyle {
    settings(pretty).json_style
}

fn cmd_run(
    job: Job,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = JobConfig::for_job(job, &settings(pretty));
    if let Some(input) = input {
        config.input = input;
    }
    if let Some(output) = output {
        config.output = output;
    }

    let report = run_job(job, &config)?;
    print_report(&report);
    Ok(())
}

fn cmd_all(
    data_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings(pretty);
    if let Some(dir) = data_dir {
        settings = settings.with_data_dir(dir);
    }
    if let Some(dir) = out_dir {
        settings = settings.with_out_dir(dir);
    }

    let reports = run_all(|job| JobConfig::for_job(job, &settings))?;
    for report in &reports {
        print_report(report);
    }
    log_success(format!("✨ {} jobs done", reports.len()));
    Ok(())
}

fn cmd_jobs() -> Result<(), Box<dyn std::error::Error>> {
    println!("{:<12} {:<26} {:<32} {}", "JOB", "SOURCE", "SHAPE", "OUTPUT");
    for job in Job::ALL {
        println!(
            "{:<12} {:<26} {:<32} {}",
            job.name(),
            job.source_file(),
            job.description(),
            job.output_file()
        );
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    options: ConvertOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension(options.format.to_string()),
    };
    if output == input {
        return Err(format!("Refusing to overwrite the input file: {}", input.display()).into());
    }

    let report = convert(input, &output, options)?;
    print_report(&report);
    Ok(())
}

fn cmd_inspect(input: &Path, distinct: usize) -> Result<(), Box<dyn std::error::Error>> {
    let inspection = inspect(input, distinct)?;

    println!("📄 {}", input.display());
    println!("   Encoding: {}", inspection.encoding);
    println!("   Delimiter: '{}'", format_delimiter(inspection.delimiter));
    println!("   Rows: {}", inspection.rows);
    println!();
    println!("{:<4} {:<28} {:<8} {:>8} {:>9}  {}", "#", "COLUMN", "KIND", "MISSING", "DISTINCT", "VALUES");
    for (i, column) in inspection.columns.iter().enumerate() {
        let more = if column.distinct > column.sample.len() { ", ..." } else { "" };
        println!(
            "{:<4} {:<28} {:<8} {:>8} {:>9}  {}{}",
            i + 1,
            column.name,
            column.kind.to_string(),
            column.missing,
            column.distinct,
            column.sample.join(", "),
            more
        );
    }
    Ok(())
}

fn cmd_validate(input: &Path, shape: ChartShape) -> Result<(), Box<dyn std::error::Error>> {
    log_info(format!("✔️  Validating {} as {}", input.display(), shape.name()));
    validate_file(input, shape)?;
    log_success(format!("{} is a valid {} payload", input.display(), shape.name()));
    Ok(())
}

fn print_report(report: &JobReport) {
    let dropped = if report.rows_dropped > 0 {
        format!(", {} dropped", report.rows_dropped)
    } else {
        String::new()
    };
    log_info(format!(
        "📊 {}: {} rows read{}, {} written → {}",
        report.job,
        report.rows_read,
        dropped,
        report.records_written,
        report.output.display()
    ));
}
