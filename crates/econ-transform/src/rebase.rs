//! Batch Rebasing Engine.
//!
//! Anchors each (country, indicator) series at the configured reference
//! year. Series that never report that year keep `value_rebased = None`.

use std::collections::HashMap;

use econ_common::rebase_index;
use econ_model::{CanonicalObservation, CountryCode, IndicatorType};

/// Fills `value_rebased` on every observation and returns how many series
/// had no reference-year observation.
pub fn rebase(observations: &mut [CanonicalObservation], reference_year: i32) -> usize {
    let mut bases: HashMap<(CountryCode, IndicatorType), Option<f64>> = HashMap::new();
    for obs in observations.iter() {
        let entry = bases.entry((obs.country_code, obs.indicator_type)).or_insert(None);
        if obs.year == reference_year {
            *entry = Some(obs.value);
        }
    }

    for obs in observations.iter_mut() {
        obs.value_rebased = bases
            .get(&(obs.country_code, obs.indicator_type))
            .copied()
            .flatten()
            .and_then(|base| rebase_index(obs.value, base));
    }

    bases.values().filter(|base| base.is_none()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn obs(code: &str, year: i32, value: f64) -> CanonicalObservation {
        CanonicalObservation {
            country_code: CountryCode::new(code).unwrap(),
            country_name: String::new(),
            year,
            indicator_type: IndicatorType::Cpi,
            value,
            value_usd: None,
            value_rebased: None,
            source: "worldbank".to_string(),
            ingested_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_rebase_against_reference_year() {
        let mut data = vec![obs("FRA", 2015, 94.0), obs("FRA", 2016, 100.0), obs("FRA", 2017, 104.0)];
        let missing = rebase(&mut data, 2016);
        assert_eq!(missing, 0);
        assert_eq!(data[0].value_rebased, Some(94.0));
        assert_eq!(data[1].value_rebased, Some(100.0));
        assert_eq!(data[2].value_rebased, Some(104.0));
    }

    #[test]
    fn test_rebase_rounds_to_two_places() {
        let mut data = vec![obs("USA", 2016, 90.0), obs("USA", 2020, 94.0)];
        rebase(&mut data, 2016);
        assert_eq!(data[1].value_rebased, Some(104.44));
    }

    #[test]
    fn test_series_without_reference_stays_empty() {
        let mut data = vec![obs("ARG", 2010, 50.0), obs("ARG", 2011, 60.0), obs("CHL", 2016, 80.0)];
        let missing = rebase(&mut data, 2016);
        assert_eq!(missing, 1);
        assert_eq!(data[0].value_rebased, None);
        assert_eq!(data[1].value_rebased, None);
        assert_eq!(data[2].value_rebased, Some(100.0));
    }

    #[test]
    fn test_zero_base_gives_no_index() {
        let mut data = vec![obs("XYZ", 2016, 0.0), obs("XYZ", 2017, 5.0)];
        rebase(&mut data, 2016);
        assert!(data.iter().all(|o| o.value_rebased.is_none()));
    }

    #[test]
    fn test_rerun_replaces_previous_index() {
        let mut data = vec![obs("FRA", 2016, 100.0), obs("FRA", 2020, 120.0)];
        rebase(&mut data, 2016);
        rebase(&mut data, 2020);
        assert_eq!(data[0].value_rebased, Some(83.33));
        assert_eq!(data[1].value_rebased, Some(100.0));
    }
}
