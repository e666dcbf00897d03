//! Record Normalizer.
//!
//! Resolves raw identifiers against the country registry and turns raw
//! observations into keyed candidates. Unresolved identities are dropped and
//! counted, never raised.

use econ_model::{
    CountryCode, DropReason, ExchangeRate, IndicatorType, NormalizationReport, ObservationKey,
    RawExchangeRate, RawObservation, SourceId,
};
use econ_standards::{CountryRegistry, Resolution};
use rayon::prelude::*;
use tracing::debug;

/// A resolved observation on its way to deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub key: ObservationKey,
    pub country_name: String,
    pub value: f64,
    pub source: SourceId,
}

impl Candidate {
    pub fn country_code(&self) -> CountryCode {
        self.key.country_code
    }

    pub fn year(&self) -> i32 {
        self.key.year
    }

    pub fn indicator(&self) -> IndicatorType {
        self.key.indicator_type
    }
}

/// Normalizes raw observations, keeping input order.
pub fn normalize_observations(
    raw: &[RawObservation],
    countries: &CountryRegistry,
    report: &mut NormalizationReport,
) -> Vec<Candidate> {
    let resolved: Vec<Resolution> = raw
        .par_iter()
        .map(|obs| countries.resolve(&obs.raw_code, obs.raw_name.as_deref()))
        .collect();

    let mut out = Vec::with_capacity(raw.len());
    for (obs, resolution) in raw.iter().zip(resolved) {
        if !obs.value.is_finite() {
            report.record_dropped(obs.source, DropReason::NonFiniteValue);
            continue;
        }
        match resolution {
            Resolution::Resolved { code, name } => out.push(Candidate {
                key: ObservationKey {
                    country_code: code,
                    year: obs.year,
                    indicator_type: obs.indicator,
                },
                country_name: name,
                value: obs.value,
                source: obs.source,
            }),
            Resolution::Unresolved => {
                debug!(source = %obs.source, raw_code = %obs.raw_code, "unresolved country identifier");
                report.record_unresolved(obs.source, &obs.raw_code);
            }
        }
    }
    out
}

/// Resolves raw exchange rates. Rows that do not resolve are counted and dropped.
pub fn normalize_exchange_rates(
    raw: &[RawExchangeRate],
    countries: &CountryRegistry,
    report: &mut NormalizationReport,
) -> Vec<ExchangeRate> {
    let mut out = Vec::with_capacity(raw.len());
    for rate in raw {
        if !rate.rate.is_finite() {
            report.record_dropped(SourceId::WorldBankFx, DropReason::NonFiniteValue);
            continue;
        }
        match countries.lookup(&rate.raw_code) {
            Some(country_code) => out.push(ExchangeRate {
                country_code,
                year: rate.year,
                rate: rate.rate,
            }),
            None => report.unresolved_rates += 1,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Alpha3,Alpha2,Numeric,Name\n\
        DEU,DE,276,Germany\n\
        FRA,FR,250,France\n";

    fn registry() -> CountryRegistry {
        CountryRegistry::from_csv(SAMPLE).unwrap()
    }

    fn raw(source: SourceId, code: &str, year: i32, value: f64) -> RawObservation {
        RawObservation::for_source(source, code, year, value).unwrap()
    }

    #[test]
    fn test_each_code_space_resolves() {
        let mut report = NormalizationReport::default();
        let input = vec![
            raw(SourceId::Faostat, "'276'", 2016, 99.0),
            raw(SourceId::Bis, "FR", 2016, 101.0),
            raw(SourceId::WorldBank, "DEU", 2016, 100.0),
        ];
        let out = normalize_observations(&input, &registry(), &mut report);
        let codes: Vec<&str> = out.iter().map(|c| c.key.country_code.as_str()).collect();
        assert_eq!(codes, vec!["DEU", "FRA", "DEU"]);
        assert_eq!(out[0].country_name, "Germany");
        assert_eq!(report.unresolved_records, 0);
    }

    #[test]
    fn test_unresolved_dropped_and_listed() {
        let mut report = NormalizationReport::default();
        let input = vec![
            raw(SourceId::WorldBank, "EUU", 2016, 100.0),
            raw(SourceId::WorldBank, "EUU", 2017, 101.0),
            raw(SourceId::Faostat, "5100", 2016, 99.0),
        ];
        let out = normalize_observations(&input, &registry(), &mut report);
        assert!(out.is_empty());
        assert_eq!(report.unresolved_records, 3);
        assert_eq!(report.unresolved.len(), 2);
    }

    #[test]
    fn test_source_name_wins_over_registry() {
        let mut report = NormalizationReport::default();
        let input = vec![raw(SourceId::WorldBank, "DEU", 2016, 100.0).with_name("Germany, Fed. Rep.")];
        let out = normalize_observations(&input, &registry(), &mut report);
        assert_eq!(out[0].country_name, "Germany, Fed. Rep.");
    }

    #[test]
    fn test_non_finite_values_dropped() {
        let mut report = NormalizationReport::default();
        let input = vec![raw(SourceId::Bis, "DE", 2016, f64::NAN)];
        let out = normalize_observations(&input, &registry(), &mut report);
        assert!(out.is_empty());
        assert_eq!(report.dropped[&SourceId::Bis][&DropReason::NonFiniteValue], 1);
    }

    #[test]
    fn test_exchange_rates_resolve() {
        let mut report = NormalizationReport::default();
        let input = vec![
            RawExchangeRate {
                raw_code: "DEU".to_string(),
                year: 1998,
                rate: 1.76,
            },
            RawExchangeRate {
                raw_code: "EMU".to_string(),
                year: 1998,
                rate: 1.0,
            },
        ];
        let out = normalize_exchange_rates(&input, &registry(), &mut report);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country_code.as_str(), "DEU");
        assert_eq!(report.unresolved_rates, 1);
    }
}
