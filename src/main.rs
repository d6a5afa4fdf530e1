//! CLI entry point for the lab result analyzer.
//!
//! Provides subcommands for running the full analysis on a marks
//! workbook and for inspecting a workbook's structure without producing
//! artifacts.

use anyhow::Result;
use clap::{Parser, Subcommand};
use lab_result_analyzer::{
    analysis::Analysis,
    chart::render_chart,
    fetch::load_source,
    output::{append_summary, print_json, print_pretty, print_tables, write_histogram_csv},
    summary::ResultSummary,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "lab_result_analyzer")]
#[command(about = "A tool to analyze lab result workbooks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a marks workbook from a file or URL
    Analyze {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// PNG file to render the two-panel chart to
        #[arg(short, long, default_value = "result_analysis.png")]
        chart: String,

        /// CSV file to write the histogram table to
        #[arg(long, default_value = "histogram.csv")]
        histogram_csv: String,

        /// CSV file to append the run summary to
        #[arg(short, long, default_value = "summary.csv")]
        output: String,

        /// Print the full analysis bundle as JSON instead of tables
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Validate a workbook and report its contents without producing artifacts
    Inspect {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/lab_result_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("lab_result_analyzer.log"));

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
        Commands::Analyze {
            source,
            chart,
            histogram_csv,
            output,
            json,
        } => {
            let Some(source) = source else {
                println!("Please provide a lab results workbook (.xlsx) to analyze.");
                return Ok(());
            };

            let bytes = load_source(&source)?;
            let analysis = match Analysis::from_workbook(&bytes) {
                Ok(analysis) => analysis,
                Err(e) => {
                    error!(source, error = %e, "Workbook rejected");
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            };

            print_pretty(&analysis);

            if json {
                print_json(&analysis)?;
            } else {
                print_tables(&analysis);
            }

            render_chart(&analysis, &chart)?;
            write_histogram_csv(&histogram_csv, &analysis.histogram)?;

            let summary = ResultSummary::from_analysis(&analysis);
            append_summary(&output, &summary)?;

            info!(
                chart,
                histogram_csv,
                summary_csv = output,
                pass_pct = summary.pass_pct(),
                "Analysis artifacts written"
            );
        }
        Commands::Inspect { source } => {
            let Some(source) = source else {
                println!("Please provide a lab results workbook (.xlsx) to inspect.");
                return Ok(());
            };

            let bytes = load_source(&source)?;
            match Analysis::from_workbook(&bytes) {
                Ok(analysis) => {
                    info!(
                        course = %analysis.course.course,
                        academic_year = %analysis.course.academic_year,
                        program = %analysis.course.program,
                        batch = %analysis.course.batch,
                        students = analysis.students.len(),
                        with_total = analysis.histogram.total(),
                        "Workbook OK"
                    );
                }
                Err(e) => {
                    error!(source, error = %e, "Workbook rejected");
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
