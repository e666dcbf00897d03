use thiserror::Error;

/// Errors raised when parsing model values from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("invalid country code '{code}': expected three ASCII letters")]
    InvalidCountryCode { code: String },

    #[error("unknown indicator type '{value}'")]
    UnknownIndicator { value: String },

    #[error("unknown source id '{value}'")]
    UnknownSource { value: String },

    #[error("unknown source precedence '{value}'")]
    UnknownPrecedence { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
