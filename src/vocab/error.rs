//! Error types for vocabulary loading

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a vocabulary file
#[derive(Debug, Error)]
pub enum VocabError {
    /// The file has no header row or no usable rows
    #[error("{reason}")]
    CsvFormat {
        /// What was wrong with the file
        reason: String,
    },

    /// The file could not be opened
    #[error("Failed to read {path:?}: {source}")]
    Io {
        /// File that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the content
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl VocabError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Self::CsvFormat { reason: reason.into() }
    }
}
