//! Rollout Summary CLI
//!
//! Command-line front end for the rollout-summary library. It adds:
//! - Snapshot loading (JSON exports of workflow executions)
//! - Filter flag parsing and a TOML defaults file
//! - Table and JSON rendering of the summary
//!
//! The summarization engine itself lives in the rollout-summary crate.

use anyhow::{Context, Result};
use clap::Parser;
use rollout_summary::{summarize, SummaryOptions, DEFAULT_MAX_EVENTS};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

mod config;
mod render;
mod source;

use render::OutputFormat;
use source::FileSource;

/// Rollout Summary - Summarize workflow execution events for debugging
#[derive(Parser, Debug)]
#[command(name = "rollout-cli")]
#[command(about = "Summarize deployment workflow execution events", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a workflow execution snapshot (JSON)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Workflow id the snapshot must hold (error if it holds another)
    #[arg(long, value_name = "ID")]
    workflow_id: Option<String>,

    /// Only include the resource with this exact id
    #[arg(long, value_name = "ID")]
    resource_id: Option<String>,

    /// Only include the resource with this exact key
    #[arg(long, value_name = "KEY")]
    resource_key: Option<String>,

    /// Only include steps with this name (can be repeated, case-insensitive)
    #[arg(long = "step-name", value_name = "NAME")]
    step_names: Vec<String>,

    /// Attach deduplicated event lists to each step
    #[arg(long)]
    detail: bool,

    /// Max distinct event contents per type in detail mode (0 = unlimited)
    #[arg(long, value_name = "COUNT")]
    max_events: Option<i64>,

    /// Only include events at or after this RFC3339 timestamp
    #[arg(long, value_name = "TIME")]
    since: Option<String>,

    /// Only include events before this RFC3339 timestamp
    #[arg(long, value_name = "TIME")]
    until: Option<String>,

    /// Output format
    #[arg(long, value_enum, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to a TOML file with default filter settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("Rollout Summary CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using summary library v{}", rollout_summary::VERSION);

    // File defaults first; explicit flags override them below
    let defaults = match &args.config {
        Some(path) => {
            log::info!("Loading defaults from: {:?}", path);
            config::load_config(path)?
        }
        None => config::CliConfig::default(),
    };

    // Filter-argument errors (malformed since/until) abort here, before the
    // snapshot is even loaded
    let options = build_options(&args, &defaults)?;

    let snapshot = FileSource::new(&args.input);
    let execution = source::load_execution(&snapshot, args.workflow_id.as_deref())?;

    let summary = summarize(&execution, &options);

    let format = args
        .format
        .or(defaults.output.format)
        .unwrap_or(OutputFormat::Table);
    let output_path = args.output.clone().or(defaults.output.file);

    match &output_path {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            render::render(&summary, format, &mut file)?;
            file.flush()?;
            log::info!("Summary written to {:?}", path);
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            render::render(&summary, format, &mut handle)?;
        }
    }

    Ok(())
}

/// Merge command-line flags over config-file defaults into summary options
fn build_options(args: &Args, defaults: &config::CliConfig) -> Result<SummaryOptions> {
    let resource_id = args
        .resource_id
        .clone()
        .or_else(|| defaults.filters.resource_id.clone())
        .unwrap_or_default();
    let resource_key = args
        .resource_key
        .clone()
        .or_else(|| defaults.filters.resource_key.clone())
        .unwrap_or_default();
    let step_names = if args.step_names.is_empty() {
        defaults.filters.step_names.clone()
    } else {
        args.step_names.clone()
    };
    let since = args.since.clone().or_else(|| defaults.filters.since.clone());
    let until = args.until.clone().or_else(|| defaults.filters.until.clone());

    let options = SummaryOptions::new()
        .with_resource_id(resource_id)
        .with_resource_key(resource_key)
        .with_step_names(step_names)
        .with_detail(args.detail || defaults.filters.detail)
        .with_max_events(
            args.max_events
                .or(defaults.filters.max_events)
                .unwrap_or(DEFAULT_MAX_EVENTS),
        )
        .with_time_window(since.as_deref(), until.as_deref())?;

    Ok(options)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
