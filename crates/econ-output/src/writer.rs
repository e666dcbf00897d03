//! Writes one pipeline run to disk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use econ_compare::DatasetStats;
use econ_model::{CanonicalObservation, NormalizationReport, PipelineOptions};
use tracing::{info, info_span};

use crate::dataset::write_dataset;
use crate::error::{OutputError, Result};
use crate::hash::sha256_hex;
use crate::manifest::{Manifest, write_manifest};

/// Where a run landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenRun {
    pub dataset_path: PathBuf,
    pub manifest_path: PathBuf,
    pub checksum_sha256: String,
    pub stats: DatasetStats,
}

/// Replaces the dataset in `dir` and writes its manifest.
///
/// # Errors
///
/// Returns an error if either file cannot be written.
pub fn write_run(
    dir: &Path,
    observations: &[CanonicalObservation],
    report: &NormalizationReport,
    options: &PipelineOptions,
    generated_at: DateTime<Utc>,
) -> Result<WrittenRun> {
    let span = info_span!("write", dir = %dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let dataset_path = write_dataset(dir, observations)?;
    let bytes = std::fs::read(&dataset_path).map_err(|e| OutputError::io(&dataset_path, e))?;
    let checksum_sha256 = sha256_hex(&bytes);
    let stats = DatasetStats::compute(observations);

    let manifest = Manifest::new(generated_at, checksum_sha256.clone(), options, &stats, report);
    let manifest_path = write_manifest(dir, &manifest)?;

    info!(
        records = observations.len(),
        bytes = bytes.len(),
        checksum = %checksum_sha256,
        duration_ms = start.elapsed().as_millis(),
        "dataset written"
    );

    Ok(WrittenRun {
        dataset_path,
        manifest_path,
        checksum_sha256,
        stats,
    })
}
