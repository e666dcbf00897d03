//! Non-fatal diagnostics collected during a pipeline run.
//!
//! Nothing in here aborts a run. Unresolved identities, malformed rows,
//! unavailable sources and incomplete series are counted so coverage gaps
//! stay auditable.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::country::CountryCode;
use crate::indicator::{IndicatorType, SourceId};

/// What happened when a source's records were loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    Loaded { records: usize },
    Unavailable { reason: String },
}

impl SourceOutcome {
    pub fn is_available(&self) -> bool {
        matches!(self, SourceOutcome::Loaded { .. })
    }
}

/// Why a raw record was dropped before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MissingCountry,
    BadPeriod,
    BadValue,
    FilteredBreakdown,
    NonFiniteValue,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::MissingCountry => "missing_country",
            DropReason::BadPeriod => "bad_period",
            DropReason::BadValue => "bad_value",
            DropReason::FilteredBreakdown => "filtered_breakdown",
            DropReason::NonFiniteValue => "non_finite_value",
        }
    }

    /// Filtered breakdowns are well-formed rows outside the wanted slice.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, DropReason::FilteredBreakdown)
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw identifier the registry could not place.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnresolvedIdentifier {
    pub source: SourceId,
    pub raw_code: String,
}

/// A wage series removed for having too few observations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrunedSeries {
    pub country_code: CountryCode,
    pub indicator_type: IndicatorType,
    pub observations: usize,
}

/// Everything a run dropped, merged or left incomplete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationReport {
    pub sources: BTreeMap<SourceId, SourceOutcome>,
    /// Rows dropped per source and reason before normalization.
    pub dropped: BTreeMap<SourceId, BTreeMap<DropReason, usize>>,
    /// Observations dropped because their identity did not resolve.
    pub unresolved_records: usize,
    /// Distinct identifiers behind `unresolved_records`.
    pub unresolved: BTreeSet<UnresolvedIdentifier>,
    /// Exchange-rate rows dropped because their identity did not resolve.
    pub unresolved_rates: usize,
    /// Raw observations folded into another by key-level averaging.
    pub merged_records: usize,
    pub pruned: Vec<PrunedSeries>,
    /// Series with no usable value at the reference year.
    pub series_without_reference: usize,
    /// Canonical records without an exchange rate.
    pub records_without_usd: usize,
}

impl NormalizationReport {
    pub fn record_source(&mut self, source: SourceId, outcome: SourceOutcome) {
        self.sources.insert(source, outcome);
    }

    pub fn record_dropped(&mut self, source: SourceId, reason: DropReason) {
        self.record_dropped_n(source, reason, 1);
    }

    pub fn record_dropped_n(&mut self, source: SourceId, reason: DropReason, count: usize) {
        if count == 0 {
            return;
        }
        *self
            .dropped
            .entry(source)
            .or_default()
            .entry(reason)
            .or_insert(0) += count;
    }

    pub fn record_unresolved(&mut self, source: SourceId, raw_code: &str) {
        self.unresolved_records += 1;
        self.unresolved.insert(UnresolvedIdentifier {
            source,
            raw_code: raw_code.to_string(),
        });
    }

    pub fn dropped_total(&self) -> usize {
        self.dropped.values().flat_map(BTreeMap::values).sum()
    }

    /// Dropped rows that were unparseable, as opposed to filtered out.
    pub fn malformed_total(&self) -> usize {
        self.dropped
            .values()
            .flat_map(|reasons| reasons.iter())
            .filter(|(reason, _)| reason.is_malformed())
            .map(|(_, count)| count)
            .sum()
    }

    pub fn unavailable_sources(&self) -> Vec<SourceId> {
        self.sources
            .iter()
            .filter(|(_, outcome)| !outcome.is_available())
            .map(|(source, _)| *source)
            .collect()
    }

    /// Folds another report into this one.
    pub fn merge(&mut self, other: NormalizationReport) {
        self.sources.extend(other.sources);
        for (source, reasons) in other.dropped {
            for (reason, count) in reasons {
                self.record_dropped_n(source, reason, count);
            }
        }
        self.unresolved_records += other.unresolved_records;
        self.unresolved.extend(other.unresolved);
        self.unresolved_rates += other.unresolved_rates;
        self.merged_records += other.merged_records;
        self.pruned.extend(other.pruned);
        self.series_without_reference += other.series_without_reference;
        self.records_without_usd += other.records_without_usd;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_counts_records_but_lists_distinct_codes() {
        let mut report = NormalizationReport::default();
        report.record_unresolved(SourceId::WorldBank, "EUU");
        report.record_unresolved(SourceId::WorldBank, "EUU");
        report.record_unresolved(SourceId::Bis, "XM");
        assert_eq!(report.unresolved_records, 3);
        assert_eq!(report.unresolved.len(), 2);
    }

    #[test]
    fn test_dropped_totals() {
        let mut report = NormalizationReport::default();
        report.record_dropped(SourceId::Faostat, DropReason::BadValue);
        report.record_dropped_n(SourceId::Faostat, DropReason::BadValue, 2);
        report.record_dropped(SourceId::Bis, DropReason::BadPeriod);
        report.record_dropped_n(SourceId::Bis, DropReason::BadValue, 0);
        report.record_dropped_n(SourceId::Ilostat, DropReason::FilteredBreakdown, 5);
        assert_eq!(report.dropped_total(), 9);
        assert_eq!(report.malformed_total(), 4);
        assert_eq!(report.dropped[&SourceId::Faostat][&DropReason::BadValue], 3);
        assert!(!report.dropped[&SourceId::Bis].contains_key(&DropReason::BadValue));
    }

    #[test]
    fn test_merge_adds_counts() {
        let mut a = NormalizationReport::default();
        a.record_source(SourceId::Bis, SourceOutcome::Loaded { records: 10 });
        a.merged_records = 2;
        let mut b = NormalizationReport::default();
        b.record_source(
            SourceId::Faostat,
            SourceOutcome::Unavailable {
                reason: "file not found".to_string(),
            },
        );
        b.merged_records = 3;
        b.record_unresolved(SourceId::Faostat, "999");
        a.merge(b);
        assert_eq!(a.merged_records, 5);
        assert_eq!(a.unresolved_records, 1);
        assert_eq!(a.unavailable_sources(), vec![SourceId::Faostat]);
    }

    #[test]
    fn test_source_outcome_serializes_tagged() {
        let json = serde_json::to_string(&SourceOutcome::Loaded { records: 4 }).unwrap();
        assert_eq!(json, r#"{"status":"loaded","records":4}"#);
    }
}
