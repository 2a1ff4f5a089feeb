//! CSV dataset loading.
//!
//! The header is checked against [`REQUIRED_COLUMNS`] before any row is
//! read; rows are returned with the line they started on.

use crate::cleaning::NormalizeError;
use crate::models::{RawRecord, RawRow, REQUIRED_COLUMNS};
use csv::StringRecord;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Dataset path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// How often the spinner message is refreshed, in rows.
const PROGRESS_EVERY: usize = 1000;

/// Options for loading a dataset.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to show a spinner while reading.
    pub show_progress: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            show_progress: true,
        }
    }
}

/// Reads raw rows from a CSV file on disk.
pub struct DatasetLoader {
    path: PathBuf,
    options: LoadOptions,
}

impl DatasetLoader {
    pub fn new(path: PathBuf, options: LoadOptions) -> Self {
        Self { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every row of the dataset. A path of `-` reads standard input.
    pub fn load(&self) -> Result<Vec<RawRow>, NormalizeError> {
        if self.path.as_os_str() == STDIN_PATH {
            info!("Loading dataset from standard input");
            return read_raw_rows(std::io::stdin().lock());
        }

        info!("Loading dataset: {}", self.path.display());

        let file = File::open(&self.path).map_err(|source| NormalizeError::Io {
            path: self.path.clone(),
            source,
        })?;
        let reader = csv::Reader::from_reader(file);
        let progress = self.options.show_progress.then(spinner);

        let rows = read_rows(reader, progress.as_ref())?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        info!("Read {} rows from {}", rows.len(), self.path.display());

        Ok(rows)
    }
}

/// Read raw rows from any CSV source (with a header row).
pub fn read_raw_rows<R: Read>(source: R) -> Result<Vec<RawRow>, NormalizeError> {
    read_rows(csv::Reader::from_reader(source), None)
}

/// Fail with every required column the header lacks.
pub fn check_schema(headers: &StringRecord) -> Result<(), NormalizeError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(NormalizeError::Schema { missing })
    }
}

fn read_rows<R: Read>(
    mut reader: csv::Reader<R>,
    progress: Option<&ProgressBar>,
) -> Result<Vec<RawRow>, NormalizeError> {
    let headers = reader.headers()?.clone();
    debug!("Dataset columns: {:?}", headers);
    check_schema(&headers)?;

    let mut rows = Vec::new();
    let mut record = StringRecord::new();

    while reader.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let raw: RawRecord = record.deserialize(Some(&headers))?;
        rows.push(RawRow::new(line, raw));

        if let Some(pb) = progress {
            if rows.len() % PROGRESS_EVERY == 0 {
                pb.set_message(format!("{} rows read", rows.len()));
            }
        }
    }

    Ok(rows)
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("reading dataset");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
