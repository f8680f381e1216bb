//! Error types for the solvency-data crate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for dataset operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while reading the reference dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be opened or read.
    #[error("Failed to read dataset {path:?}: {source}")]
    Io {
        /// Dataset location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file has no header line.
    #[error("Dataset has no header line")]
    MissingHeader,

    /// The configured label column is not in the header.
    #[error("Label column {column:?} not found in dataset header")]
    MissingLabelColumn {
        /// Column that was looked for.
        column: String,
    },

    /// A row could not be parsed.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A label value is not 0 or 1.
    #[error("Invalid label {value:?} on line {line}")]
    InvalidLabel {
        /// 1-based line number.
        line: usize,
        /// Raw field text.
        value: String,
    },

    /// The header parsed but no data rows follow.
    #[error("Dataset contains no rows")]
    NoRows,
}

impl DataError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
