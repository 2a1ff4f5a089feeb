//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.deliverydash.toml` files.

use crate::analysis::couriers::DEFAULT_TOP_N;
use crate::analysis::FilterSet;
use crate::cleaning::CoercionPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".deliverydash.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Dataset location.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Row filters.
    #[serde(default)]
    pub filters: FilterSet,

    /// Cleaning settings.
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "deliverydash_report.md".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path of the CSV file to analyze.
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> String {
    "dataset/train.csv".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// `fail` aborts on an unconvertible value, `drop` skips the row.
    #[serde(default)]
    pub on_coercion_failure: CoercionPolicy,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Couriers per city in the fastest/slowest tables.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Include the cleaning statistics section.
    #[serde(default = "default_true")]
    pub include_cleaning_stats: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            include_cleaning_stats: true,
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dataset) = args.dataset {
            self.dataset.path = dataset.display().to_string();
        }
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        // Filters
        if let Ok(Some(until)) = args.until_date() {
            self.filters.until = Some(until);
        }
        if let Some(ref traffic) = args.traffic {
            self.filters.traffic = trimmed(traffic);
        }
        if let Some(ref weather) = args.weather {
            self.filters.weather = trimmed(weather);
        }

        if let Some(policy) = args.on_coercion_failure {
            self.cleaning.on_coercion_failure = policy;
        }
        if let Some(top) = args.top {
            self.report.top_n = top;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Returns the log level from `--quiet`, `--verbose` and `[general] verbose`.
    ///
    /// `--quiet` wins over a verbose config file.
    pub fn log_level(&self, args: &crate::cli::Args) -> tracing::Level {
        if args.quiet {
            tracing::Level::ERROR
        } else if args.verbose || self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

fn trimmed(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.trim().to_string()).collect()
}
