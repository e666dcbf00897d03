//! FX/USD Converter.
//!
//! Stage A restates legacy-currency exchange rates of currency-union
//! members in union units. Stage B divides corrected values by the rate for
//! the exact (country, year) key; there is no interpolation.

use std::collections::HashMap;

use econ_common::round_to;
use econ_model::{CanonicalObservation, CountryCode, ExchangeRate, VALUE_PRECISION};
use econ_standards::CurrencyUnionTable;
use rayon::prelude::*;

// =============================================================================
// Stage A: legacy-regime pre-correction
// =============================================================================

/// Restates pre-adoption rates of union members.
///
/// A rate reported in old national units per USD is divided by the fixed
/// old-per-union conversion rate, matching how post-adoption years are
/// reported.
pub fn precorrect_rates(rates: &mut [ExchangeRate], unions: &CurrencyUnionTable) -> usize {
    let mut restated = 0;
    for rate in rates.iter_mut() {
        if let Some(divisor) = unions.legacy_divisor(rate.country_code, rate.year) {
            rate.rate /= divisor;
            restated += 1;
        }
    }
    restated
}

// =============================================================================
// Stage B: USD conversion
// =============================================================================

/// Exact-key exchange-rate lookup.
#[derive(Debug, Clone, Default)]
pub struct RateBook {
    rates: HashMap<(CountryCode, i32), f64>,
}

impl RateBook {
    /// Builds the lookup. Repeated keys keep their mean rate.
    pub fn new(rates: &[ExchangeRate]) -> Self {
        let mut sums: HashMap<(CountryCode, i32), (f64, usize)> = HashMap::new();
        for rate in rates {
            let entry = sums.entry((rate.country_code, rate.year)).or_insert((0.0, 0));
            entry.0 += rate.rate;
            entry.1 += 1;
        }
        let rates = sums
            .into_iter()
            .map(|(key, (sum, count))| (key, sum / count as f64))
            .collect();
        Self { rates }
    }

    pub fn rate(&self, country_code: CountryCode, year: i32) -> Option<f64> {
        self.rates.get(&(country_code, year)).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// USD equivalent of `value`, `None` without a usable rate.
    pub fn to_usd(&self, country_code: CountryCode, year: i32, value: f64) -> Option<f64> {
        let rate = self.rate(country_code, year)?;
        if rate == 0.0 || !rate.is_finite() {
            return None;
        }
        Some(round_to(value / rate, VALUE_PRECISION))
    }
}

/// Fills `value_usd` from the merged, corrected value. Returns how many got
/// a value.
pub fn convert_observations(book: &RateBook, observations: &mut [CanonicalObservation]) -> usize {
    observations
        .par_iter_mut()
        .map(|obs| {
            obs.value_usd = book.to_usd(obs.country_code, obs.year, obs.value);
            usize::from(obs.value_usd.is_some())
        })
        .sum()
}
