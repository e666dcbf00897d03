//! Error types for reference table loading.

use thiserror::Error;

/// Errors that can occur when loading embedded reference tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// A table row failed to deserialize.
    #[error("failed to parse {file}: {message}")]
    CsvParse { file: &'static str, message: String },

    /// A field held a value outside its domain.
    #[error("invalid {field} value '{value}' in {file}")]
    InvalidValue {
        field: &'static str,
        value: String,
        file: &'static str,
    },

    /// The same key appeared twice in a table.
    #[error("duplicate {field} '{value}' in {file}")]
    Duplicate {
        field: &'static str,
        value: String,
        file: &'static str,
    },
}

/// Result type for reference table operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
