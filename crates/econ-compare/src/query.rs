//! Query inputs and results.

use econ_model::{CanonicalObservation, CountryCode, IndicatorType};
use serde::Serialize;

use crate::error::{CompareError, Result};

/// Inclusive visible year window. Open ends are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl YearRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(start: Option<i32>, end: Option<i32>) -> Self {
        Self { start, end }
    }

    pub fn between(start: i32, end: i32) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start.is_none_or(|start| year >= start) && self.end.is_none_or(|end| year <= end)
    }

    /// # Errors
    ///
    /// Returns [`CompareError::InvalidYearRange`] when start is after end.
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end)
            && start > end
        {
            return Err(CompareError::InvalidYearRange { start, end });
        }
        Ok(())
    }
}

/// Which value column a query reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueBasis {
    /// Current local-currency units, or the index level.
    #[default]
    Local,
    /// USD equivalents. Rows without a rate are excluded entirely.
    Usd,
}

impl ValueBasis {
    pub fn from_usd_flag(usd: bool) -> Self {
        if usd { Self::Usd } else { Self::Local }
    }

    pub fn value_of(self, observation: &CanonicalObservation) -> Option<f64> {
        observation.value_on(self == Self::Usd)
    }
}

/// Mode A input: one country, several indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryQuery {
    pub country: CountryCode,
    pub indicators: Vec<IndicatorType>,
    pub years: YearRange,
    pub basis: ValueBasis,
}

impl CountryQuery {
    /// Queries every indicator over all years in local units.
    pub fn new(country: CountryCode) -> Self {
        Self {
            country,
            indicators: IndicatorType::ALL.to_vec(),
            years: YearRange::all(),
            basis: ValueBasis::Local,
        }
    }

    pub fn with_indicators(mut self, indicators: impl Into<Vec<IndicatorType>>) -> Self {
        self.indicators = indicators.into();
        self
    }

    pub fn with_years(mut self, years: YearRange) -> Self {
        self.years = years;
        self
    }

    pub fn with_basis(mut self, basis: ValueBasis) -> Self {
        self.basis = basis;
        self
    }
}

/// Mode B input: one indicator across a bounded set of countries.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonQuery {
    pub indicator: IndicatorType,
    pub countries: Vec<CountryCode>,
    pub years: YearRange,
    pub basis: ValueBasis,
}

impl ComparisonQuery {
    pub fn new(indicator: IndicatorType, countries: impl Into<Vec<CountryCode>>) -> Self {
        Self {
            indicator,
            countries: countries.into(),
            years: YearRange::all(),
            basis: ValueBasis::Local,
        }
    }

    pub fn with_years(mut self, years: YearRange) -> Self {
        self.years = years;
        self
    }

    pub fn with_basis(mut self, basis: ValueBasis) -> Self {
        self.basis = basis;
        self
    }
}

/// One year of an indexed series.
///
/// `index` is `None` when the series has no usable base value: the data is
/// present but not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexPoint {
    pub year: i32,
    pub value: f64,
    pub index: Option<f64>,
}

/// A series keyed by indicator (Mode A) or country (Mode B), ascending by year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedSeries<K> {
    pub key: K,
    pub points: Vec<IndexPoint>,
}

impl<K> IndexedSeries<K> {
    pub fn first_year(&self) -> Option<i32> {
        self.points.first().map(|p| p.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.points.last().map(|p| p.year)
    }
}

/// Mode A result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryView {
    pub country: CountryCode,
    pub basis: ValueBasis,
    pub base_year: Option<i32>,
    pub series: Vec<IndexedSeries<IndicatorType>>,
    /// Requested indicators with no matching rows.
    pub missing: Vec<IndicatorType>,
}

impl CountryView {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Mode B result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub indicator: IndicatorType,
    pub basis: ValueBasis,
    pub base_year: Option<i32>,
    pub series: Vec<IndexedSeries<CountryCode>>,
    /// Requested countries with no matching rows.
    pub missing: Vec<CountryCode>,
}

impl ComparisonView {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
