//! Dataset statistics.

use std::collections::{BTreeMap, BTreeSet};

use econ_model::{CanonicalObservation, CountryCode, IndicatorType};
use serde::Serialize;

/// Record and coverage counts for one indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorStats {
    pub indicator: IndicatorType,
    pub records: usize,
    pub countries: usize,
}

/// Summary of a canonical dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub records: usize,
    pub countries: usize,
    pub year_range: Option<(i32, i32)>,
    pub indicators: Vec<IndicatorStats>,
}

impl DatasetStats {
    pub fn compute(observations: &[CanonicalObservation]) -> Self {
        let mut countries = BTreeSet::new();
        let mut per_indicator: BTreeMap<IndicatorType, (usize, BTreeSet<CountryCode>)> =
            BTreeMap::new();
        let mut year_range: Option<(i32, i32)> = None;

        for obs in observations {
            countries.insert(obs.country_code);
            let entry = per_indicator.entry(obs.indicator_type).or_default();
            entry.0 += 1;
            entry.1.insert(obs.country_code);
            year_range = Some(match year_range {
                Some((min, max)) => (min.min(obs.year), max.max(obs.year)),
                None => (obs.year, obs.year),
            });
        }

        Self {
            records: observations.len(),
            countries: countries.len(),
            year_range,
            indicators: per_indicator
                .into_iter()
                .map(|(indicator, (records, countries))| IndicatorStats {
                    indicator,
                    records,
                    countries: countries.len(),
                })
                .collect(),
        }
    }

    pub fn indicator(&self, indicator: IndicatorType) -> Option<&IndicatorStats> {
        self.indicators.iter().find(|s| s.indicator == indicator)
    }
}
