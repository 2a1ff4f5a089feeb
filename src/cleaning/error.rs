//! Errors raised while reading and cleaning a dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the input data.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Required columns are absent from the header.
    #[error("dataset is missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A value that is not a sentinel could not be converted.
    #[error("line {line}: cannot convert {column} value {value:?} to {target}")]
    Coercion {
        line: u64,
        column: &'static str,
        value: String,
        target: &'static str,
    },

    /// The dataset file could not be opened.
    #[error("cannot open dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be parsed as CSV.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A single field that failed conversion, before a line number is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub column: &'static str,
    pub value: String,
    pub target: &'static str,
}

impl FieldError {
    pub fn new(column: &'static str, value: &str, target: &'static str) -> Self {
        Self {
            column,
            value: value.to_string(),
            target,
        }
    }

    pub fn at_line(self, line: u64) -> NormalizeError {
        NormalizeError::Coercion {
            line,
            column: self.column,
            value: self.value,
            target: self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_columns() {
        let err = NormalizeError::Schema {
            missing: vec!["City".to_string(), "Festival".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "dataset is missing required column(s): City, Festival"
        );
    }

    #[test]
    fn test_coercion_error_names_line_and_column() {
        let err = FieldError::new("Delivery_person_Age", "abc", "integer").at_line(12);
        let message = err.to_string();
        assert!(message.contains("line 12"));
        assert!(message.contains("Delivery_person_Age"));
        assert!(message.contains("\"abc\""));
    }

    #[test]
    fn test_io_error_is_not_reported_as_malformed() {
        let err = NormalizeError::Io {
            path: PathBuf::from("data/train.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let message = err.to_string();
        assert!(message.starts_with("cannot open dataset data/train.csv"));
        assert!(!message.contains("malformed"));
    }
}
