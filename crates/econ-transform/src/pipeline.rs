//! Normalization pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Normalize**: Resolve raw identifiers to canonical countries
//! 2. **Deduplicate**: Average everything sharing a key
//! 3. **Correct**: Restate merged wages across redenominations
//! 4. **Convert**: Pre-correct union rates, then derive USD values
//! 5. **Prune**: Drop wage series below the observation minimum
//! 6. **Rebase**: Index every series at the reference year
//! 7. **Validate**: Reject structurally impossible output
//!
//! Each stage is a pure function over the previous stage's output; the
//! pipeline only sequences them and keeps the report.

use std::time::Instant;

use chrono::{DateTime, Utc};
use econ_ingest::RawBatch;
use econ_model::{CanonicalObservation, NormalizationReport, PipelineOptions};
use econ_standards::StandardsRegistry;
use tracing::{info, info_span};

use crate::dedupe::deduplicate;
use crate::error::Result;
use crate::fx::{RateBook, convert_observations, precorrect_rates};
use crate::normalize::{normalize_exchange_rates, normalize_observations};
use crate::prune::prune_sparse;
use crate::rebase::rebase;
use crate::redenominate::correct_observations;
use crate::validate::validate_batch;

/// The canonical batch plus everything that was dropped or adjusted on the
/// way.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// Canonical observations sorted by key.
    pub observations: Vec<CanonicalObservation>,
    pub report: NormalizationReport,
}

/// Runs every transformation stage over one raw batch.
///
/// `ingested_at` is stamped on every output record so that one run carries
/// one timestamp.
///
/// # Errors
///
/// Returns an error only if validation finds a structural defect. Missing
/// or malformed input is reported, not raised.
pub fn run_pipeline(
    standards: &StandardsRegistry,
    options: &PipelineOptions,
    batch: RawBatch,
    ingested_at: DateTime<Utc>,
) -> Result<PipelineOutput> {
    let span = info_span!("transform", reference_year = options.reference_year);
    let _guard = span.enter();
    let run_start = Instant::now();

    let RawBatch {
        observations: raw_observations,
        exchange_rates: raw_rates,
        mut report,
    } = batch;

    // ========================================================================
    // Stage 1: Normalize
    // ========================================================================
    let candidates = {
        let _stage = info_span!("normalize").entered();
        let start = Instant::now();
        let candidates = normalize_observations(&raw_observations, &standards.countries, &mut report);
        info!(
            input = raw_observations.len(),
            resolved = candidates.len(),
            unresolved = report.unresolved_records,
            duration_ms = start.elapsed().as_millis(),
            "identifiers resolved"
        );
        candidates
    };
    drop(raw_observations);

    // ========================================================================
    // Stage 2: Deduplicate
    // ========================================================================
    let mut observations = {
        let _stage = info_span!("dedupe").entered();
        let start = Instant::now();
        let before = candidates.len();
        let observations = deduplicate(
            candidates,
            options.wage_source_precedence,
            ingested_at,
            &mut report,
        );
        info!(
            candidates = before,
            canonical = observations.len(),
            precedence = %options.wage_source_precedence,
            duration_ms = start.elapsed().as_millis(),
            "duplicates merged"
        );
        observations
    };

    // ========================================================================
    // Stage 3: Redenomination
    // ========================================================================
    {
        let _stage = info_span!("correct").entered();
        let start = Instant::now();
        let corrected = correct_observations(&standards.redenominations, &mut observations);
        info!(
            corrected,
            duration_ms = start.elapsed().as_millis(),
            "redenominations applied"
        );
    }

    // ========================================================================
    // Stage 4: FX conversion
    // ========================================================================
    {
        let _stage = info_span!("fx").entered();
        let start = Instant::now();
        let mut rates = normalize_exchange_rates(&raw_rates, &standards.countries, &mut report);
        let restated = precorrect_rates(&mut rates, &standards.currency_unions);
        let book = RateBook::new(&rates);
        let converted = convert_observations(&book, &mut observations);
        info!(
            rates = book.len(),
            restated,
            unresolved_rates = report.unresolved_rates,
            converted,
            duration_ms = start.elapsed().as_millis(),
            "usd values derived"
        );
    }

    // ========================================================================
    // Stage 5: Prune
    // ========================================================================
    let mut observations = {
        let _stage = info_span!("prune").entered();
        let start = Instant::now();
        let before = observations.len();
        let kept = prune_sparse(observations, options.min_wage_observations, &mut report);
        info!(
            removed = before - kept.len(),
            series = report.pruned.len(),
            min_observations = options.min_wage_observations,
            duration_ms = start.elapsed().as_millis(),
            "sparse wage series pruned"
        );
        kept
    };

    // ========================================================================
    // Stage 6: Rebase
    // ========================================================================
    {
        let _stage = info_span!("rebase").entered();
        let start = Instant::now();
        report.series_without_reference = rebase(&mut observations, options.reference_year);
        info!(
            without_reference = report.series_without_reference,
            duration_ms = start.elapsed().as_millis(),
            "series rebased"
        );
    }

    // ========================================================================
    // Stage 7: Validate
    // ========================================================================
    {
        let _stage = info_span!("validate").entered();
        let start = Instant::now();
        observations.sort_by_key(CanonicalObservation::key);
        validate_batch(&observations, options.min_wage_observations)?;
        info!(
            observations = observations.len(),
            duration_ms = start.elapsed().as_millis(),
            "batch validated"
        );
    }

    report.records_without_usd = observations
        .iter()
        .filter(|obs| obs.value_usd.is_none())
        .count();

    info!(
        observations = observations.len(),
        dropped = report.dropped_total(),
        merged = report.merged_records,
        without_usd = report.records_without_usd,
        duration_ms = run_start.elapsed().as_millis(),
        "transform complete"
    );

    Ok(PipelineOutput {
        observations,
        report,
    })
}
