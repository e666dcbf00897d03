use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CompareError {
    #[error("{requested} countries selected, at most {max} can be compared")]
    TooManyCountries { requested: usize, max: usize },

    #[error("no {selection} selected")]
    EmptySelection { selection: &'static str },

    #[error("invalid year range: {start} is after {end}")]
    InvalidYearRange { start: i32, end: i32 },
}

pub type Result<T> = std::result::Result<T, CompareError>;
