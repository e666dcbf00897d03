//! Loads every source extract from an input directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use econ_model::{NormalizationReport, RawExchangeRate, RawObservation, SourceId, SourceOutcome};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use crate::csv::read_extract;
use crate::error::Result;
use crate::sources::{
    SourceAdapter, WorldBankExchangeRates, observation_adapters, read_exchange_rates,
};

/// Extract file names per source, relative to the input directory.
///
/// Sources without an entry use their adapter's default file name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceFiles {
    files: BTreeMap<SourceId, PathBuf>,
}

impl SourceFiles {
    #[must_use]
    pub fn with_file(mut self, source: SourceId, file: impl Into<PathBuf>) -> Self {
        self.files.insert(source, file.into());
        self
    }

    /// Resolves the extract path for `source` under `dir`.
    pub fn path_for(&self, dir: &Path, source: SourceId, default_name: &str) -> PathBuf {
        match self.files.get(&source) {
            Some(file) if file.is_absolute() => file.clone(),
            Some(file) => dir.join(file),
            None => dir.join(default_name),
        }
    }
}

/// Everything the upstream collaborators delivered for one run.
#[derive(Debug, Clone, Default)]
pub struct RawBatch {
    pub observations: Vec<RawObservation>,
    pub exchange_rates: Vec<RawExchangeRate>,
    pub report: NormalizationReport,
}

impl RawBatch {
    pub fn observation_count(&self, source: SourceId) -> usize {
        self.observations
            .iter()
            .filter(|obs| obs.source == source)
            .count()
    }
}

struct SourceLoad<T> {
    source: SourceId,
    records: Vec<T>,
    report: NormalizationReport,
}

fn load_observations(
    adapter: &dyn SourceAdapter,
    dir: &Path,
    files: &SourceFiles,
) -> SourceLoad<RawObservation> {
    let source = adapter.source();
    let path = files.path_for(dir, source, adapter.default_file_name());
    let mut report = NormalizationReport::default();
    let result: Result<Vec<RawObservation>> =
        read_extract(&path).and_then(|df| adapter.read(&df, &path, &mut report));
    finish(source, &path, result, report)
}

fn load_rates(dir: &Path, files: &SourceFiles) -> SourceLoad<RawExchangeRate> {
    let feed = WorldBankExchangeRates;
    let source = WorldBankExchangeRates::SOURCE;
    let path = files.path_for(dir, source, feed.default_file_name());
    let mut report = NormalizationReport::default();
    let result = read_extract(&path).and_then(|df| read_exchange_rates(&df, &path, &mut report));
    finish(source, &path, result, report)
}

fn finish<T>(
    source: SourceId,
    path: &Path,
    result: Result<Vec<T>>,
    mut report: NormalizationReport,
) -> SourceLoad<T> {
    match result {
        Ok(records) => {
            info!(
                source = %source,
                records = records.len(),
                dropped = report.dropped_total(),
                "source loaded"
            );
            report.record_source(
                source,
                SourceOutcome::Loaded {
                    records: records.len(),
                },
            );
            SourceLoad {
                source,
                records,
                report,
            }
        }
        Err(error) => {
            warn!(source = %source, path = %path.display(), %error, "source unavailable");
            // A source that failed part-way contributes nothing.
            let mut report = NormalizationReport::default();
            report.record_source(
                source,
                SourceOutcome::Unavailable {
                    reason: error.to_string(),
                },
            );
            SourceLoad {
                source,
                records: Vec::new(),
                report,
            }
        }
    }
}

/// Reads every extract under `dir`.
///
/// Sources load in parallel. A missing or unreadable extract yields an
/// unavailable outcome and zero records; the other sources still load.
pub fn load_raw_batch(dir: &Path, files: &SourceFiles) -> RawBatch {
    let span = info_span!("ingest", dir = %dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let adapters = observation_adapters();
    let (loads, rates) = rayon::join(
        || {
            adapters
                .par_iter()
                .map(|adapter| load_observations(adapter.as_ref(), dir, files))
                .collect::<Vec<_>>()
        },
        || load_rates(dir, files),
    );

    let mut batch = RawBatch::default();
    for load in loads {
        tracing::debug!(source = %load.source, records = load.records.len(), "merging source");
        batch.observations.extend(load.records);
        batch.report.merge(load.report);
    }
    batch.exchange_rates = rates.records;
    batch.report.merge(rates.report);

    info!(
        observations = batch.observations.len(),
        exchange_rates = batch.exchange_rates.len(),
        unavailable = batch.report.unavailable_sources().len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    batch
}
