//! Error types for cohort ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort loading a cohort file.
///
/// Malformed cells are not errors; they are counted in `IngestStats`.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file does not exist.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file could not be opened or a record could not be read.
    #[error("failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
