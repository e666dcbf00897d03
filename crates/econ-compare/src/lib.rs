//! Query-time comparison over the canonical dataset.
//!
//! A [`Snapshot`] is an immutable, shareable copy of the dataset with its
//! secondary indexes. The
//! [`SnapshotCache`] swaps it on a fixed TTL. [`country_view`] (one country,
//! several indicators) and [`compare_countries`] (one indicator, several
//! countries) rebase series to a base year chosen from the visible data.
//!
//! # Example
//!
//! ```ignore
//! use econ_compare::{ComparisonQuery, Snapshot, compare_countries};
//!
//! let snapshot = Snapshot::new(observations);
//! let query = ComparisonQuery::new(IndicatorType::Cpi, countries);
//! let view = compare_countries(&snapshot, &query, &QueryOptions::default())?;
//! println!("base year: {:?}", view.base_year);
//! ```

pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod snapshot;
pub mod stats;

pub use engine::{common_base_year, compare_countries, country_view};
pub use error::{CompareError, Result};
pub use index::SecondaryIndexes;
pub use query::{
    ComparisonQuery, ComparisonView, CountryQuery, CountryView, IndexPoint, IndexedSeries,
    ValueBasis, YearRange,
};
pub use snapshot::{Snapshot, SnapshotCache};
pub use stats::{DatasetStats, IndicatorStats};
