use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::{Settings, init_logging, load_settings};
use looper::{Looper, RunSummary};
use std::path::{Path, PathBuf};

/// The main entry point for the hepflow analysis runner.
fn main() -> Result<()> {
    // Load environment overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Run(args) => handle_run(args),
        Commands::Check(args) => handle_check(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Runs a sequence of analyzers over collider events.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every component declared in the configuration.
    Run(RunArgs),
    /// Load the configuration and build the sequence without reading any event.
    Check(CheckArgs),
}

#[derive(Parser)]
struct RunArgs {
    /// Path to the analysis configuration.
    #[arg(long, short, default_value = "config.toml")]
    config: PathBuf,

    /// Stop after this many events (overrides `looper.max_events`).
    #[arg(long)]
    max_events: Option<u64>,

    /// Do not draw progress bars.
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the analysis configuration.
    #[arg(long, short, default_value = "config.toml")]
    config: PathBuf,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn load(path: &Path) -> Result<Settings> {
    load_settings(path).with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Applies the settings once, then runs the looper.
fn handle_run(args: RunArgs) -> Result<()> {
    let mut settings = load(&args.config)?;
    if let Some(max_events) = args.max_events {
        settings.looper.max_events = Some(max_events);
    }

    // Keep the guard alive until the end of the run so the log file is flushed.
    let _log_guard = init_logging(&settings.logging, &settings.sequence)?;
    tracing::debug!(
        path = %args.config.display(),
        analyzers = settings.sequence.len(),
        "Configuration loaded"
    );
    tracing::info!(
        beams = ?settings.collider.beams,
        sqrts = settings.collider.sqrts,
        random_seed = settings.random_seed,
        "Starting run"
    );

    let mut looper = Looper::from_settings(&settings)?.with_progress(!args.quiet);
    let summary = looper.run().context("Run aborted")?;

    print_summary(&summary);
    Ok(())
}

fn handle_check(args: CheckArgs) -> Result<()> {
    let settings = load(&args.config)?;
    Looper::from_settings(&settings)?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Analyzer", "Kind", "Log level"]);
    for (i, analyzer) in settings.sequence.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            analyzer.name.clone(),
            analyzer.kind.label().to_string(),
            analyzer.log_level.clone().unwrap_or_else(|| settings.logging.level.clone()),
        ]);
    }
    println!("{table}");

    let files: usize = settings.components.iter().map(|c| c.files.len()).sum();
    println!(
        "Configuration OK: {} components, {} files, {} analyzers.",
        settings.components.len(),
        files,
        settings.sequence.len()
    );
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let mut components = Table::new();
    components.set_header(vec!["Component", "Read", "Processed", "Failed"]);
    for c in &summary.components {
        components.add_row(vec![
            c.name.clone(),
            c.events_read.to_string(),
            c.events_processed.to_string(),
            c.events_failed.to_string(),
        ]);
    }
    println!("{components}");

    let mut analyzers = Table::new();
    analyzers.set_header(vec!["Analyzer", "Calls", "Failures", "Time (ms)", "Per call (µs)"]);
    for a in &summary.analyzers {
        let per_call = if a.calls > 0 {
            a.elapsed.as_secs_f64() * 1e6 / a.calls as f64
        } else {
            0.0
        };
        analyzers.add_row(vec![
            a.name.clone(),
            a.calls.to_string(),
            a.failures.to_string(),
            format!("{:.2}", a.elapsed.as_secs_f64() * 1e3),
            format!("{:.1}", per_call),
        ]);
    }
    println!("{analyzers}");

    println!(
        "Processed {} events ({} failed) in {:.2}s.",
        summary.events_processed(),
        summary.events_failed(),
        summary.elapsed.as_secs_f64()
    );
}
