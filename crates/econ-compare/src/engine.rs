//! Dynamic Comparability Engine.
//!
//! Both modes are pure functions over a snapshot. Mode A reads the country
//! index and Mode B the (indicator, year) index. Rows are filtered by
//! selection, year range and value basis first; base years and `missing`
//! lists are derived from what survives.

use std::collections::{BTreeMap, BTreeSet};

use econ_common::rebase_index;
use econ_model::{CanonicalObservation, CountryCode, IndicatorType, QueryOptions};
use tracing::debug;

use crate::error::{CompareError, Result};
use crate::query::{
    ComparisonQuery, ComparisonView, CountryQuery, CountryView, IndexPoint, IndexedSeries,
    ValueBasis, YearRange,
};
use crate::snapshot::Snapshot;

type YearValues = BTreeMap<i32, f64>;

/// Mode A: one country, several indicators, each rebased at a shared year.
///
/// The base year is the latest of the indicators' first visible years, so
/// every indicator has started reporting by then.
///
/// # Errors
///
/// Returns an error for an empty indicator set or an inverted year range.
pub fn country_view(snapshot: &Snapshot, query: &CountryQuery) -> Result<CountryView> {
    query.years.validate()?;
    let requested = distinct(&query.indicators);
    if requested.is_empty() {
        return Err(CompareError::EmptySelection {
            selection: "indicators",
        });
    }
    let wanted: BTreeSet<IndicatorType> = requested.iter().copied().collect();

    let mut by_indicator: BTreeMap<IndicatorType, YearValues> = BTreeMap::new();
    let rows = snapshot.indexes().country(query.country).iter().copied();
    for (obs, value) in visible(snapshot.observations(), rows, query.years, query.basis) {
        if wanted.contains(&obs.indicator_type) {
            by_indicator.entry(obs.indicator_type).or_default().insert(obs.year, value);
        }
    }

    let base_year = by_indicator
        .values()
        .filter_map(|years| years.keys().next().copied())
        .max();
    let missing = requested
        .iter()
        .copied()
        .filter(|indicator| !by_indicator.contains_key(indicator))
        .collect();
    let series = requested
        .iter()
        .filter_map(|indicator| {
            by_indicator.get(indicator).map(|years| IndexedSeries {
                key: *indicator,
                points: index_points(years, base_year),
            })
        })
        .collect();

    debug!(country = %query.country, ?base_year, "country view");
    Ok(CountryView {
        country: query.country,
        basis: query.basis,
        base_year,
        series,
        missing,
    })
}

/// Mode B: one indicator across several countries, rebased at the earliest
/// year every reporting country covers.
///
/// Countries with no visible rows go to `missing` and do not constrain the
/// base year. Without such a year every index is `None`.
///
/// # Errors
///
/// Returns an error for an empty or oversized country set or an inverted
/// year range.
pub fn compare_countries(
    snapshot: &Snapshot,
    query: &ComparisonQuery,
    options: &QueryOptions,
) -> Result<ComparisonView> {
    query.years.validate()?;
    let requested = distinct(&query.countries);
    if requested.is_empty() {
        return Err(CompareError::EmptySelection {
            selection: "countries",
        });
    }
    if requested.len() > options.max_comparison_countries {
        return Err(CompareError::TooManyCountries {
            requested: requested.len(),
            max: options.max_comparison_countries,
        });
    }
    let wanted: BTreeSet<CountryCode> = requested.iter().copied().collect();

    let mut by_country: BTreeMap<CountryCode, YearValues> = BTreeMap::new();
    let rows = snapshot.indexes().indicator_rows(query.indicator, query.years);
    for (obs, value) in visible(snapshot.observations(), rows, query.years, query.basis) {
        if wanted.contains(&obs.country_code) {
            by_country.entry(obs.country_code).or_default().insert(obs.year, value);
        }
    }

    let base_year = common_base_year(&by_country);
    let missing = requested
        .iter()
        .copied()
        .filter(|country| !by_country.contains_key(country))
        .collect();
    let series = requested
        .iter()
        .filter_map(|country| {
            by_country.get(country).map(|years| IndexedSeries {
                key: *country,
                points: index_points(years, base_year),
            })
        })
        .collect();

    debug!(indicator = %query.indicator, countries = requested.len(), ?base_year, "comparison view");
    Ok(ComparisonView {
        indicator: query.indicator,
        basis: query.basis,
        base_year,
        series,
        missing,
    })
}

/// Earliest year at which every series has an observation.
pub fn common_base_year<K>(series: &BTreeMap<K, YearValues>) -> Option<i32> {
    if series.is_empty() {
        return None;
    }
    let mut coverage: BTreeMap<i32, usize> = BTreeMap::new();
    for years in series.values() {
        for year in years.keys() {
            *coverage.entry(*year).or_insert(0) += 1;
        }
    }
    coverage
        .into_iter()
        .find(|(_, count)| *count == series.len())
        .map(|(year, _)| year)
}

/// Indexed rows inside the year range that have a value on `basis`.
fn visible<'a>(
    observations: &'a [CanonicalObservation],
    rows: impl Iterator<Item = usize> + 'a,
    years: YearRange,
    basis: ValueBasis,
) -> impl Iterator<Item = (&'a CanonicalObservation, f64)> + 'a {
    rows.filter_map(move |row| observations.get(row))
        .filter(move |obs| years.contains(obs.year))
        .filter_map(move |obs| basis.value_of(obs).map(|value| (obs, value)))
}

fn index_points(years: &YearValues, base_year: Option<i32>) -> Vec<IndexPoint> {
    let base = base_year.and_then(|year| years.get(&year).copied());
    years
        .iter()
        .map(|(&year, &value)| IndexPoint {
            year,
            value,
            index: base.and_then(|base| rebase_index(value, base)),
        })
        .collect()
}

fn distinct<T: Copy + Ord>(items: &[T]) -> Vec<T> {
    let mut seen = BTreeSet::new();
    items.iter().copied().filter(|item| seen.insert(*item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn code(s: &str) -> CountryCode {
        CountryCode::new(s).unwrap()
    }

    fn obs(country: &str, year: i32, indicator: IndicatorType, value: f64) -> CanonicalObservation {
        CanonicalObservation {
            country_code: code(country),
            country_name: String::new(),
            year,
            indicator_type: indicator,
            value,
            value_usd: None,
            value_rebased: None,
            source: "test".to_string(),
            ingested_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn index_at<K>(series: &IndexedSeries<K>, year: i32) -> Option<f64> {
        series.points.iter().find(|p| p.year == year).and_then(|p| p.index)
    }

    #[test]
    fn test_country_base_year_is_latest_first_year() {
        let snapshot = Snapshot::new(vec![
            obs("MEX", 1990, IndicatorType::Cpi, 10.0),
            obs("MEX", 2005, IndicatorType::Cpi, 50.0),
            obs("MEX", 2010, IndicatorType::Cpi, 75.0),
            obs("MEX", 2005, IndicatorType::MonthlyWage, 4000.0),
            obs("MEX", 2010, IndicatorType::MonthlyWage, 5000.0),
        ]);
        let query = CountryQuery::new(code("MEX"))
            .with_indicators([IndicatorType::Cpi, IndicatorType::MonthlyWage]);
        let view = country_view(&snapshot, &query).unwrap();
        assert_eq!(view.base_year, Some(2005));
        assert_eq!(index_at(&view.series[0], 2005), Some(100.0));
        assert_eq!(index_at(&view.series[0], 2010), Some(150.0));
        assert_eq!(index_at(&view.series[0], 1990), Some(20.0));
        assert_eq!(index_at(&view.series[1], 2010), Some(125.0));
        assert!(view.missing.is_empty());
    }

    #[test]
    fn test_country_reports_missing_indicators() {
        let snapshot = Snapshot::new(vec![obs("MEX", 2000, IndicatorType::Cpi, 10.0)]);
        let view = country_view(&snapshot, &CountryQuery::new(code("MEX"))).unwrap();
        assert_eq!(view.series.len(), 1);
        assert_eq!(
            view.missing,
            vec![
                IndicatorType::FoodCpi,
                IndicatorType::HousingPriceIndex,
                IndicatorType::MonthlyWage
            ]
        );
    }

    #[test]
    fn test_country_year_range_moves_base() {
        let snapshot = Snapshot::new(vec![
            obs("MEX", 1990, IndicatorType::Cpi, 10.0),
            obs("MEX", 2000, IndicatorType::Cpi, 20.0),
            obs("MEX", 2010, IndicatorType::Cpi, 40.0),
        ]);
        let query = CountryQuery::new(code("MEX"))
            .with_indicators([IndicatorType::Cpi])
            .with_years(YearRange::between(1995, 2020));
        let view = country_view(&snapshot, &query).unwrap();
        assert_eq!(view.base_year, Some(2000));
        assert_eq!(view.series[0].points.len(), 2);
        assert_eq!(index_at(&view.series[0], 2010), Some(200.0));
    }

    #[test]
    fn test_country_gap_at_base_is_incomparable() {
        let snapshot = Snapshot::new(vec![
            obs("MEX", 2000, IndicatorType::Cpi, 10.0),
            obs("MEX", 2010, IndicatorType::Cpi, 20.0),
            obs("MEX", 2005, IndicatorType::FoodCpi, 30.0),
        ]);
        let query = CountryQuery::new(code("MEX"))
            .with_indicators([IndicatorType::Cpi, IndicatorType::FoodCpi]);
        let view = country_view(&snapshot, &query).unwrap();
        assert_eq!(view.base_year, Some(2005));
        assert!(view.series[0].points.iter().all(|p| p.index.is_none()));
        assert_eq!(index_at(&view.series[1], 2005), Some(100.0));
    }

    #[test]
    fn test_country_empty_indicator_set_rejected() {
        let snapshot = Snapshot::new(Vec::new());
        let query = CountryQuery::new(code("MEX")).with_indicators(Vec::new());
        assert_eq!(
            country_view(&snapshot, &query),
            Err(CompareError::EmptySelection {
                selection: "indicators"
            })
        );
    }

    #[test]
    fn test_comparison_base_is_first_fully_covered_year() {
        let mut data = Vec::new();
        for (country, first) in [("AAA", 2000), ("BBB", 2005), ("CCC", 2010)] {
            for year in first..=2015 {
                data.push(obs(country, year, IndicatorType::Cpi, f64::from(year - 1900)));
            }
        }
        let snapshot = Snapshot::new(data);
        let query = ComparisonQuery::new(IndicatorType::Cpi, [code("AAA"), code("BBB"), code("CCC")]);
        let view = compare_countries(&snapshot, &query, &QueryOptions::default()).unwrap();
        assert_eq!(view.base_year, Some(2010));
        for series in &view.series {
            assert_eq!(index_at(series, 2010), Some(100.0));
        }
    }

    #[test]
    fn test_comparison_without_shared_year() {
        let snapshot = Snapshot::new(vec![
            obs("AAA", 2000, IndicatorType::Cpi, 1.0),
            obs("BBB", 2001, IndicatorType::Cpi, 1.0),
        ]);
        let query = ComparisonQuery::new(IndicatorType::Cpi, [code("AAA"), code("BBB")]);
        let view = compare_countries(&snapshot, &query, &QueryOptions::default()).unwrap();
        assert_eq!(view.base_year, None);
        assert_eq!(view.series.len(), 2);
        assert!(
            view.series
                .iter()
                .flat_map(|s| &s.points)
                .all(|p| p.index.is_none())
        );
    }

    #[test]
    fn test_comparison_missing_country_does_not_block_base() {
        let snapshot = Snapshot::new(vec![
            obs("AAA", 2000, IndicatorType::Cpi, 1.0),
            obs("BBB", 2000, IndicatorType::Cpi, 2.0),
        ]);
        let query = ComparisonQuery::new(IndicatorType::Cpi, [code("AAA"), code("ZZZ"), code("BBB")]);
        let view = compare_countries(&snapshot, &query, &QueryOptions::default()).unwrap();
        assert_eq!(view.base_year, Some(2000));
        assert_eq!(view.missing, vec![code("ZZZ")]);
        let keys: Vec<_> = view.series.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec![code("AAA"), code("BBB")]);
    }

    #[test]
    fn test_usd_excludes_rows_without_rate() {
        let mut with_rate = obs("AAA", 2001, IndicatorType::MonthlyWage, 1000.0);
        with_rate.value_usd = Some(50.0);
        let mut later = obs("AAA", 2002, IndicatorType::MonthlyWage, 1100.0);
        later.value_usd = Some(60.0);
        let snapshot = Snapshot::new(vec![
            obs("AAA", 2000, IndicatorType::MonthlyWage, 900.0),
            with_rate,
            later,
            obs("BBB", 2001, IndicatorType::MonthlyWage, 10.0),
        ]);
        let query = ComparisonQuery::new(IndicatorType::MonthlyWage, [code("AAA"), code("BBB")])
            .with_basis(ValueBasis::Usd);
        let view = compare_countries(&snapshot, &query, &QueryOptions::default()).unwrap();
        assert_eq!(view.missing, vec![code("BBB")]);
        assert_eq!(view.base_year, Some(2001));
        let years: Vec<i32> = view.series[0].points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2001, 2002]);
        assert_eq!(view.series[0].points[1].value, 60.0);
        assert_eq!(index_at(&view.series[0], 2002), Some(120.0));
    }

    #[test]
    fn test_country_cap_enforced() {
        let snapshot = Snapshot::new(Vec::new());
        let codes = ["AAA", "BBB", "CCC"].map(code);
        let options = QueryOptions {
            max_comparison_countries: 2,
            ..QueryOptions::default()
        };
        let query = ComparisonQuery::new(IndicatorType::Cpi, codes);
        assert_eq!(
            compare_countries(&snapshot, &query, &options),
            Err(CompareError::TooManyCountries {
                requested: 3,
                max: 2
            })
        );
    }

    #[test]
    fn test_repeated_countries_count_once() {
        let snapshot = Snapshot::new(vec![obs("AAA", 2000, IndicatorType::Cpi, 1.0)]);
        let options = QueryOptions {
            max_comparison_countries: 1,
            ..QueryOptions::default()
        };
        let query = ComparisonQuery::new(IndicatorType::Cpi, [code("AAA"), code("AAA")]);
        let view = compare_countries(&snapshot, &query, &options).unwrap();
        assert_eq!(view.series.len(), 1);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let snapshot = Snapshot::new(Vec::new());
        let query = ComparisonQuery::new(IndicatorType::Cpi, [code("AAA")])
            .with_years(YearRange::between(2020, 2000));
        assert!(matches!(
            compare_countries(&snapshot, &query, &QueryOptions::default()),
            Err(CompareError::InvalidYearRange { .. })
        ));
    }
}
