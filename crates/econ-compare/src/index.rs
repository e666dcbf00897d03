//! Secondary indexes over a snapshot.
//!
//! Rows are referenced by position in the slice the index was built from.

use std::collections::BTreeMap;

use econ_model::{CanonicalObservation, CountryCode, IndicatorType};

use crate::query::YearRange;

#[derive(Debug, Clone, Default)]
pub struct SecondaryIndexes {
    by_indicator_year: BTreeMap<(IndicatorType, i32), Vec<usize>>,
    by_country: BTreeMap<CountryCode, Vec<usize>>,
}

impl SecondaryIndexes {
    pub fn build(observations: &[CanonicalObservation]) -> Self {
        let mut indexes = Self::default();
        for (row, obs) in observations.iter().enumerate() {
            indexes
                .by_indicator_year
                .entry((obs.indicator_type, obs.year))
                .or_default()
                .push(row);
            indexes.by_country.entry(obs.country_code).or_default().push(row);
        }
        indexes
    }

    /// Rows reporting `indicator` in `year`.
    pub fn indicator_year(&self, indicator: IndicatorType, year: i32) -> &[usize] {
        self.by_indicator_year
            .get(&(indicator, year))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Rows reporting `indicator` within `years`, by ascending year.
    ///
    /// `years` must already be validated; an inverted range yields nothing.
    pub fn indicator_rows(
        &self,
        indicator: IndicatorType,
        years: YearRange,
    ) -> impl Iterator<Item = usize> + '_ {
        let start = years.start.unwrap_or(i32::MIN);
        let end = years.end.unwrap_or(i32::MAX).max(start);
        self.by_indicator_year
            .range((indicator, start)..=(indicator, end))
            .filter(move |((_, year), _)| years.contains(*year))
            .flat_map(|(_, rows)| rows.iter().copied())
    }

    /// Rows for `country`, in slice order.
    pub fn country(&self, country: CountryCode) -> &[usize] {
        self.by_country
            .get(&country)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Years in which `indicator` has any row, ascending.
    pub fn indicator_years(&self, indicator: IndicatorType) -> impl Iterator<Item = i32> + '_ {
        self.by_indicator_year
            .range((indicator, i32::MIN)..=(indicator, i32::MAX))
            .map(|((_, year), _)| *year)
    }

    pub fn countries(&self) -> impl Iterator<Item = CountryCode> + '_ {
        self.by_country.keys().copied()
    }
}
