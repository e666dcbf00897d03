//! Deduplicator / Aggregator.
//!
//! Collapses every candidate sharing a (country, year, indicator) key into
//! one canonical observation by arithmetic mean. Sub-annual points (months,
//! quarters) and overlapping primary/supplementary wage series meet here.
//! Currency correction and USD conversion run on the merged value.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use econ_model::{CanonicalObservation, NormalizationReport, ObservationKey, SourcePrecedence};

use crate::normalize::Candidate;

/// Averages candidates per key.
///
/// With [`SourcePrecedence::PreferPrimary`], supplementary contributions only
/// count for keys the primary series does not report. Output is sorted by key.
pub fn deduplicate(
    candidates: Vec<Candidate>,
    precedence: SourcePrecedence,
    ingested_at: DateTime<Utc>,
    report: &mut NormalizationReport,
) -> Vec<CanonicalObservation> {
    let mut groups: BTreeMap<ObservationKey, Vec<Candidate>> = BTreeMap::new();
    for candidate in candidates {
        groups.entry(candidate.key).or_default().push(candidate);
    }

    let mut out = Vec::with_capacity(groups.len());
    for (key, mut group) in groups {
        if precedence == SourcePrecedence::PreferPrimary
            && group.iter().any(|c| !c.source.is_supplementary())
        {
            group.retain(|c| !c.source.is_supplementary());
        }
        report.merged_records += group.len().saturating_sub(1);
        if let Some(observation) = merge_group(key, &group, ingested_at) {
            out.push(observation);
        }
    }
    out
}

fn merge_group(
    key: ObservationKey,
    group: &[Candidate],
    ingested_at: DateTime<Utc>,
) -> Option<CanonicalObservation> {
    let first = group.first()?;
    let value = mean(group.iter().map(|c| c.value))?;

    let country_name = group
        .iter()
        .map(|c| c.country_name.as_str())
        .find(|name| !name.is_empty())
        .unwrap_or(first.country_name.as_str())
        .to_string();

    let sources: BTreeSet<&str> = group.iter().map(|c| c.source.canonical_name()).collect();
    let source = sources.into_iter().collect::<Vec<_>>().join("+");

    Some(CanonicalObservation {
        country_code: key.country_code,
        country_name,
        year: key.year,
        indicator_type: key.indicator_type,
        value,
        value_usd: None,
        value_rebased: None,
        source,
        ingested_at,
    })
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
