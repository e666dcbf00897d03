//! Fatal transformation errors.
//!
//! Missing data never lands here. These variants mean the pipeline produced
//! something structurally impossible and the run must stop.

use econ_model::{IndicatorType, ObservationKey};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// Two canonical records share a unique key after deduplication.
    #[error(
        "duplicate canonical record for ({}, {}, {})",
        .key.country_code, .key.year, .key.indicator_type
    )]
    DuplicateKey { key: ObservationKey },

    /// A computed field is NaN or infinite.
    #[error(
        "non-finite {field} for ({}, {}, {})",
        .key.country_code, .key.year, .key.indicator_type
    )]
    NonFiniteValue {
        key: ObservationKey,
        field: &'static str,
    },

    /// A wage series shorter than the configured minimum survived pruning.
    #[error("sparse {indicator} series for {country} survived pruning ({count} observations)")]
    SparseSeries {
        country: String,
        indicator: IndicatorType,
        count: usize,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
