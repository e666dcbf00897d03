use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    #[error("dataset not found: {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing column '{column}' in {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("invalid record at row {row} of {path}: {message}")]
    InvalidRecord {
        path: PathBuf,
        row: usize,
        message: String,
    },

    #[error("failed to serialize manifest: {message}")]
    Manifest { message: String },

    #[error("DataFrame error: {message}")]
    DataFrame { message: String },
}

impl From<PolarsError> for OutputError {
    fn from(err: PolarsError) -> Self {
        OutputError::DataFrame {
            message: err.to_string(),
        }
    }
}

impl OutputError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        OutputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
