//! Sink for the canonical dataset.
//!
//! A run writes `observations.csv` (full replace) and `manifest.json` into
//! the output directory. Query commands read the CSV back with
//! [`read_dataset`].

pub mod dataset;
pub mod error;
mod hash;
pub mod index;
pub mod manifest;
pub mod writer;

pub use dataset::{COLUMNS, DATASET_FILE, dataset_path, observations_to_frame, read_dataset, write_dataset};
pub use error::{OutputError, Result};
pub use index::{INDEX_DEFINITIONS, IndexDefinition, UNIQUE_KEY};
pub use manifest::{MANIFEST_FILE, Manifest, write_manifest};
pub use writer::{WrittenRun, write_run};
