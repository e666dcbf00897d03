//! Transformation stages from raw source records to the canonical dataset.
//!
//! [`run_pipeline`] sequences the stages; each stage is also exposed for
//! callers that need one step in isolation.

pub mod dedupe;
pub mod error;
pub mod fx;
pub mod normalize;
pub mod pipeline;
pub mod prune;
pub mod rebase;
pub mod redenominate;
pub mod validate;

pub use dedupe::deduplicate;
pub use error::{Result, TransformError};
pub use fx::{RateBook, convert_observations, precorrect_rates};
pub use normalize::{Candidate, normalize_exchange_rates, normalize_observations};
pub use pipeline::{PipelineOutput, run_pipeline};
pub use prune::prune_sparse;
pub use rebase::rebase;
pub use redenominate::{correct, correct_observations};
pub use validate::validate_batch;
