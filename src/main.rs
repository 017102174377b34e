//! CLI entry point for the grade report tool.
//!
//! Loads a spreadsheet of grades, summarizes it overall and per group, and
//! writes the summaries as CSV, JSON and a Markdown document.

use anyhow::Result;
use clap::{Parser, Subcommand};
use grade_report::{
    config::ReportConfig,
    dataset::{ColumnSelection, detect_columns},
    loader::load_source,
    output::{print_pretty, write_report},
    session::ReportSession,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grade_report")]
#[command(about = "Summarize grades overall and per group", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the columns of a dataset and the detected grade/group columns
    Columns {
        /// Path or URL of a .csv / .json file (optionally .gz)
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// Generate summary tables and a report document
    Report {
        /// Path or URL of a .csv / .json file (optionally .gz)
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Column holding the grades (auto-detected if omitted)
        #[arg(long)]
        grade_column: Option<String>,

        /// Column holding the group labels (auto-detected if omitted)
        #[arg(long)]
        group_column: Option<String>,

        /// Passing threshold, 0-100 [default: 40]
        #[arg(long)]
        passing: Option<f64>,

        /// Merit threshold, 0-100 [default: 60]
        #[arg(long)]
        merit: Option<f64>,

        /// Distinction threshold, 0-100 [default: 70]
        #[arg(long)]
        distinction: Option<f64>,

        /// JSON config file with title, columns and thresholds
        #[arg(short, long)]
        config: Option<String>,

        /// Directory to write overall.csv, groups.csv, report.json and report.md
        #[arg(short, long, default_value = "report")]
        out_dir: PathBuf,

        /// Document title
        #[arg(short, long)]
        title: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/grade_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grade_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Columns { source } => {
            let dataset = load_source(&source).await?;
            let detected = detect_columns(dataset.headers());

            for (index, header) in dataset.headers().iter().enumerate() {
                info!(index, column = %header, "Column");
            }
            info!(
                rows = dataset.len(),
                grade_column = ?detected.grade,
                group_column = ?detected.group,
                "Detected columns"
            );
        }
        Commands::Report {
            source,
            grade_column,
            group_column,
            passing,
            merit,
            distinction,
            config,
            out_dir,
            title,
        } => {
            let config = match config {
                Some(path) => ReportConfig::load(&path)?,
                None => ReportConfig::default(),
            };

            let mut session = ReportSession::new();
            session.import(load_source(&source).await?);

            let detected = session.selection().clone();
            session.select_columns(ColumnSelection {
                grade: grade_column.or(config.grade_column).or(detected.grade),
                group: group_column.or(config.group_column).or(detected.group),
            });

            let thresholds = config.thresholds.resolve(passing, merit, distinction);
            session.set_thresholds(
                thresholds.passing(),
                thresholds.merit(),
                thresholds.distinction(),
            );

            let report = session.generate()?;
            print_pretty(report);

            let title = title
                .or(config.title)
                .unwrap_or_else(|| "Grade Report".to_string());
            write_report(&out_dir, report, &title)?;

            info!(
                n = report.overall.n,
                groups = report.groups.len(),
                skipped_rows = report.skipped_rows,
                passing_rate = report.overall.pass_rate,
                mean = report.overall.mean,
                out_dir = %out_dir.display(),
                "Report generated"
            );
        }
    }

    Ok(())
}
