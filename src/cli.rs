//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Options left unset fall back to the
//! configuration file (see [`crate::config`]).

use crate::cleaning::CoercionPolicy;
use crate::dashboard::ViewSelection;
use crate::models::dmy_date;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// deliverydash - delivery operations dashboard for food-delivery datasets
///
/// Cleans a delivery CSV and computes the company, couriers and
/// restaurants views as a Markdown or JSON report.
///
/// Examples:
///   deliverydash --dataset dataset/train.csv
///   deliverydash --view couriers --traffic Jam,High --top 5
///   deliverydash --until 01-04-2022 --format json -o report.json
///   deliverydash --export-clean clean.csv --on-coercion-failure drop
///   deliverydash --dry-run
///   deliverydash --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Dataset CSV to analyze
    ///
    /// Use - to read standard input. Defaults to the [dataset] path in the
    /// config file, or dataset/train.csv.
    #[arg(short, long, value_name = "FILE", env = "DELIVERYDASH_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to deliverydash_report.md.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Which dashboard view(s) to compute
    #[arg(long, default_value = "all", value_name = "VIEW")]
    pub view: ViewSelection,

    /// Keep only orders placed strictly before this date (DD-MM-YYYY)
    #[arg(long, value_name = "DATE")]
    pub until: Option<String>,

    /// Traffic densities to keep (comma-separated)
    ///
    /// Example: --traffic Low,Jam
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub traffic: Option<Vec<String>>,

    /// Weather conditions to keep (comma-separated)
    ///
    /// Example: --weather "conditions Sunny,conditions Fog"
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub weather: Option<Vec<String>>,

    /// What to do with a value that cannot be converted
    ///
    /// fail aborts the run; drop skips the row and counts it.
    #[arg(long, value_name = "POLICY")]
    pub on_coercion_failure: Option<CoercionPolicy>,

    /// Number of couriers in the fastest/slowest tables per city
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Also write the cleaned table to this CSV file
    #[arg(long, value_name = "FILE")]
    pub export_clean: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .deliverydash.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load and clean the dataset, print statistics, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .deliverydash.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.top == Some(0) {
            return Err("--top must be at least 1".to_string());
        }

        self.until_date()?;

        for (flag, list) in [("--traffic", &self.traffic), ("--weather", &self.weather)] {
            if let Some(values) = list {
                if values.is_empty() || values.iter().any(|v| v.trim().is_empty()) {
                    return Err(format!("{} needs at least one non-empty value", flag));
                }
            }
        }

        Ok(())
    }

    /// The `--until` cutoff, parsed.
    pub fn until_date(&self) -> Result<Option<NaiveDate>, String> {
        self.until
            .as_deref()
            .map(|value| {
                dmy_date::parse(value)
                    .map_err(|e| format!("Invalid --until date {:?} (want DD-MM-YYYY): {}", value, e))
            })
            .transpose()
    }
}
