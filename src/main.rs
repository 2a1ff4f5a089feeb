//! deliverydash - delivery operations dashboard
//!
//! A CLI tool that cleans a food-delivery dataset and computes the
//! company, couriers and restaurants views as a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (bad arguments, unreadable dataset, unconvertible value, etc.)

mod analysis;
mod cleaning;
mod cli;
mod config;
mod dashboard;
mod dataset;
mod models;
mod report;

#[cfg(test)]
mod fixtures;

use anyhow::{Context, Result};
use chrono::Utc;
use cleaning::Normalizer;
use cli::{Args, OutputFormat};
use config::{Config, DEFAULT_CONFIG_FILE};
use dashboard::DashboardOptions;
use dataset::{DatasetLoader, LoadOptions};
use models::{Report, ReportMetadata};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration first so [general] verbose reaches the subscriber
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(config.log_level(&args));

    info!("deliverydash v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    source.log();

    match run_dashboard(args, config) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .deliverydash.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to customize the dataset path, filters, and report.");
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete load, clean, aggregate and report workflow.
fn run_dashboard(args: Args, config: Config) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Load the dataset
    let dataset_path = PathBuf::from(&config.dataset.path);
    if !args.quiet {
        println!("📥 Loading dataset: {}", dataset_path.display());
    }
    let loader = DatasetLoader::new(
        dataset_path.clone(),
        LoadOptions {
            show_progress: !args.quiet,
        },
    );
    let rows = loader
        .load()
        .with_context(|| format!("Failed to load dataset {}", loader.path().display()))?;

    // Handle --dry-run: clean and report statistics only
    if args.dry_run {
        return handle_dry_run(rows, &config);
    }

    // Step 2: Clean and aggregate
    let options = DashboardOptions {
        views: args.view,
        top_n: config.report.top_n,
        policy: config.cleaning.on_coercion_failure,
    };
    let dashboard = dashboard::build(rows, &config.filters, &options)
        .with_context(|| format!("Failed to clean dataset {}", dataset_path.display()))?;

    // Step 3: Optional cleaned export
    if let Some(ref export_path) = args.export_clean {
        dataset::write_cleaned_csv(&dashboard.records, export_path)?;
        info!("Cleaned table written to {}", export_path.display());
    }

    // Step 4: Build the report
    let duration = start_time.elapsed().as_secs_f64();
    let metadata = ReportMetadata {
        dataset: dataset_path.display().to_string(),
        generated_at: Utc::now(),
        filters: config.filters.clone(),
        rows_read: dashboard.stats.rows_read,
        rows_cleaned: dashboard.stats.rows_kept,
        duration_seconds: duration,
    };

    let report = Report {
        metadata,
        cleaning: config
            .report
            .include_cleaning_stats
            .then(|| dashboard.stats.clone()),
        views: dashboard.views,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    let output_path = PathBuf::from(&config.general.output);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    // Print summary
    if !args.quiet {
        println!("\n📊 Dashboard Summary:");
        println!("   Rows read: {}", dashboard.stats.rows_read);
        println!("   Rows kept: {}", dashboard.stats.rows_kept);
        println!("   Rows dropped: {}", dashboard.stats.rows_dropped());
        println!("   Duration: {:.1}s", duration);
        println!("\n✅ Report saved to: {}", output_path.display());
    }

    Ok(())
}

/// Handle --dry-run: clean the rows, print drop statistics, exit.
fn handle_dry_run(rows: Vec<models::RawRow>, config: &Config) -> Result<()> {
    println!("\n🔍 Dry run: cleaning only, no report written...\n");

    let normalized = Normalizer::new(config.cleaning.on_coercion_failure)
        .normalize(rows)
        .context("Failed to clean dataset")?;
    let stats = &normalized.stats;

    println!("   Rows read: {}", stats.rows_read);
    println!("   Rows kept: {}", stats.rows_kept);
    if stats.dropped.is_empty() {
        println!("   No rows dropped.");
    } else {
        println!("   Rows dropped:");
        for (reason, count) in &stats.dropped {
            println!("     - {}: {}", reason, count);
        }
    }

    println!("\n✅ Dry run complete.");
    Ok(())
}

/// Where the configuration came from, logged once logging is up.
enum ConfigSource {
    Explicit(PathBuf),
    DefaultFile,
    Builtin,
    Unreadable(String),
}

impl ConfigSource {
    fn log(&self) {
        match self {
            ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
            ConfigSource::DefaultFile => {
                info!("Loaded default config from {}", DEFAULT_CONFIG_FILE)
            }
            ConfigSource::Builtin => debug!("No config file found, using defaults"),
            ConfigSource::Unreadable(e) => warn!("Failed to load config: {}", e),
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::DefaultFile)),
        Ok(None) => Ok((Config::default(), ConfigSource::Builtin)),
        Err(e) => Ok((Config::default(), ConfigSource::Unreadable(format!("{:#}", e)))),
    }
}
