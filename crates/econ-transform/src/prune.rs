//! Sparse-Series Pruner.

use std::collections::BTreeMap;

use econ_model::{CanonicalObservation, CountryCode, IndicatorType, NormalizationReport, PrunedSeries};
use tracing::debug;

/// Removes every wage series with fewer than `min_observations` points.
///
/// A short series goes entirely; no partial trimming. Other indicators are
/// never pruned.
pub fn prune_sparse(
    observations: Vec<CanonicalObservation>,
    min_observations: usize,
    report: &mut NormalizationReport,
) -> Vec<CanonicalObservation> {
    let mut counts: BTreeMap<(CountryCode, IndicatorType), usize> = BTreeMap::new();
    for obs in observations.iter().filter(|obs| obs.indicator_type.is_wage()) {
        *counts.entry((obs.country_code, obs.indicator_type)).or_insert(0) += 1;
    }

    let sparse: BTreeMap<(CountryCode, IndicatorType), usize> = counts
        .into_iter()
        .filter(|(_, count)| *count < min_observations)
        .collect();
    if sparse.is_empty() {
        return observations;
    }

    for (&(country_code, indicator_type), &count) in &sparse {
        debug!(country = %country_code, indicator = %indicator_type, count, "pruning sparse series");
        report.pruned.push(PrunedSeries {
            country_code,
            indicator_type,
            observations: count,
        });
    }

    observations
        .into_iter()
        .filter(|obs| !sparse.contains_key(&(obs.country_code, obs.indicator_type)))
        .collect()
}
