//! CLI entry point for the data profiler.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use data_profiler::{
    DataSource, FlowOutcome, NamedDataset, NoticeLevel, PreviewOutcome, ProfileReport,
    ProfilerConfig, ProfilingFlow, RenderedView, ReportMode, UnavailableEngine,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// CLI-compatible dataset selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliDataset {
    /// Titanic passenger list
    Titanic,
    /// Iris flower measurements
    Iris,
    /// A CSV file given with --input
    Upload,
}

/// CLI-compatible report mode
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliReportMode {
    /// Full detailed report
    Complete,
    /// Faster, minimal report
    Minimal,
}

impl From<CliReportMode> for ReportMode {
    fn from(cli: CliReportMode) -> Self {
        match cli {
            CliReportMode::Complete => ReportMode::Complete,
            CliReportMode::Minimal => ReportMode::Minimal,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Automated CSV profiling reports",
    long_about = "Generates a profiling report for a demo dataset or an uploaded CSV file.\n\
                  When no report can be generated a basic analysis is shown instead.\n\n\
                  EXAMPLES:\n  \
                  # Profile the Titanic dataset\n  \
                  data-profiler --dataset titanic\n\n  \
                  # Profile your own file and save the report elsewhere\n  \
                  data-profiler --dataset upload --input sales.csv -o reports/\n\n  \
                  # Only show the quick preview\n  \
                  data-profiler --dataset iris --preview\n\n  \
                  # Show the basic analysis without the profiling engine\n  \
                  data-profiler --dataset iris --no-profiling"
)]
struct Args {
    /// Dataset to profile
    #[arg(short, long, value_enum, default_value = "titanic")]
    dataset: CliDataset,

    /// CSV file to profile (required with --dataset upload)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory the HTML report is saved to
    #[arg(short, long, default_value = "./outputs")]
    output: PathBuf,

    /// Report mode (recorded in the outcome; generation always runs the full report)
    #[arg(short, long, value_enum, default_value = "complete")]
    mode: CliReportMode,

    /// Only load the dataset and show the quick preview
    #[arg(long)]
    preview: bool,

    /// Run without the profiling engine (basic analysis only)
    #[arg(long)]
    no_profiling: bool,

    /// Do not save the HTML report to the output directory
    #[arg(long)]
    no_save: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the final JSON outcome.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and the final result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let source = build_source(&args)?;

    let config = ProfilerConfig::builder()
        .report_mode(args.mode.into())
        .output_dir(&args.output)
        .write_artifact(!args.no_save)
        .build()?;

    let mut builder = ProfilingFlow::builder().config(config);
    if args.no_profiling {
        builder = builder.engine(Arc::new(UnavailableEngine::new(
            "profiling disabled with --no-profiling",
        )));
    }
    if !args.json && !args.quiet {
        builder = builder.on_progress(|update| {
            debug!(
                "[{:>3.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }
    let flow = builder.build()?;
    info!("Using the {} engine", flow.engine_name());

    if args.preview {
        let outcome = flow.preview(&source)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            print_preview(&source, &outcome);
        }
        return Ok(());
    }

    let outcome = flow.run(&source)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn build_source(args: &Args) -> Result<DataSource> {
    match args.dataset {
        CliDataset::Titanic => Ok(DataSource::Named(NamedDataset::Titanic)),
        CliDataset::Iris => Ok(DataSource::Named(NamedDataset::Iris)),
        CliDataset::Upload => {
            let path = args
                .input
                .as_deref()
                .ok_or_else(|| anyhow!("--input is required with --dataset upload"))?;
            read_upload(path)
        }
    }
}

fn read_upload(path: &Path) -> Result<DataSource> {
    if !path.exists() {
        return Err(anyhow!("Input file not found: {}", path.display()));
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("Reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    info!("Read {} bytes from {}", bytes.len(), name);
    Ok(DataSource::Upload { name, bytes })
}

fn notice_marker(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "i",
        NoticeLevel::Success => "+",
        NoticeLevel::Warning => "!",
        NoticeLevel::Error => "x",
    }
}

/// Print the quick preview.
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
fn print_preview(source: &DataSource, outcome: &PreviewOutcome) {
    println!("\n{}", "=".repeat(80));
    println!("DATASET PREVIEW - {}", source.display_name());
    println!("{}\n", "=".repeat(80));

    if let DataSource::Named(dataset) = source {
        println!("ABOUT THE DATASET");
        println!("{}", "-".repeat(40));
        println!("  {}", dataset.description());
        println!("  Key features: {}", dataset.key_features().join(", "));
        println!();
    }

    for notice in &outcome.notices {
        println!("  [{}] {}", notice_marker(notice.level), notice.message);
    }
    println!();
    print!("{}", outcome.preview.render_text());
    println!("{}", "=".repeat(80));
}

fn print_outcome(outcome: &FlowOutcome) {
    println!("\n{}", "=".repeat(80));
    println!("{}", outcome.title);
    println!("{}\n", "=".repeat(80));

    println!(
        "Dataset: {} ({} rows x {} columns)",
        outcome.dataset, outcome.rows, outcome.columns
    );
    println!("Report Mode: {}", outcome.report_mode.display_name());
    println!("Engine: {}", outcome.engine);
    println!("State: {}", outcome.state);
    println!("Duration: {}ms", outcome.duration_ms);
    println!();

    if !outcome.notices.is_empty() {
        println!("Messages:");
        for notice in &outcome.notices {
            println!("  [{}] {}", notice_marker(notice.level), notice.message);
        }
        println!();
    }

    match &outcome.view {
        RenderedView::Report {
            embed, download, ..
        } => {
            if let Some(report) = &outcome.report {
                print_report_summary(report);
            }
            if let Some(embed) = embed {
                println!(
                    "Embedded view: {} bytes, height {}",
                    embed.html.len(),
                    embed.height
                );
            }
            match &outcome.artifact_path {
                Some(path) => println!(
                    "Download: {} ({}, {} bytes)",
                    path.display(),
                    download.mime,
                    download.size_bytes
                ),
                None => println!(
                    "Download: {} ({} bytes, not saved)",
                    download.file_name, download.size_bytes
                ),
            }
        }
        RenderedView::Basic(analysis) => {
            print!("{}", analysis.render_text());
        }
    }

    println!();
    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(80));
}

fn print_report_summary(report: &ProfileReport) {
    let overview = &report.overview;
    println!("OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  Variables: {}", overview.columns);
    println!("  Observations: {}", overview.rows);
    println!(
        "  Missing cells: {} ({:.1}%)",
        overview.missing_cells, overview.missing_cells_percentage
    );
    println!(
        "  Duplicate rows: {} ({:.1}%)",
        overview.duplicate_rows, overview.duplicate_rows_percentage
    );
    for (kind, count) in &overview.type_counts {
        println!("  {}: {}", kind.display_name(), count);
    }
    println!();

    println!("ALERTS ({})", report.alerts.len());
    println!("{}", "-".repeat(40));
    if report.alerts.is_empty() {
        println!("  No alerts");
    }
    for alert in &report.alerts {
        println!("  - [{}] {}", alert.kind.label(), alert.message);
    }
    println!();
}
