//! Domain model for the economic indicators pipeline.
//!
//! Every other crate in the workspace speaks in these types: country codes,
//! the fixed indicator enumeration, raw and canonical observations, exchange
//! rates, run options and the non-fatal diagnostics a pipeline run produces.

pub mod country;
pub mod diagnostics;
pub mod error;
pub mod indicator;
pub mod observation;
pub mod options;

pub use country::CountryCode;
pub use diagnostics::{
    DropReason, NormalizationReport, PrunedSeries, SourceOutcome, UnresolvedIdentifier,
};
pub use error::{ModelError, Result};
pub use indicator::{IndicatorType, SourceId};
pub use observation::{
    CanonicalObservation, ExchangeRate, ObservationKey, RawExchangeRate, RawObservation,
};
pub use options::{
    INDEX_PRECISION, PipelineOptions, QueryOptions, SourcePrecedence, VALUE_PRECISION,
};
