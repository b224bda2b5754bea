use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a dataset. Fatal at startup: there is no fallback data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column '{0}' not found in header")]
    MissingColumn(&'static str),

    #[error("row {row}: '{value}' is not a recognised date")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}, column '{column}': '{value}' is not a non-negative number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: column '{column}' is empty")]
    MissingValue { row: usize, column: &'static str },
}

/// Non-fatal issues that degrade individual charts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataWarning {
    #[error("optional column '{0}' not found; related charts are not applicable")]
    MissingColumn(&'static str),
}
