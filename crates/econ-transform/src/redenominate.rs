//! Redenomination Corrector.
//!
//! Restates wage values in the country's current currency unit. Indices are
//! unitless and pass through untouched.

use econ_common::round_to;
use econ_model::{CanonicalObservation, CountryCode, IndicatorType, VALUE_PRECISION};
use econ_standards::RedenominationTable;

/// Corrects one value.
///
/// Every redenomination after `year` divides the value, compounding. Years
/// at or after the latest switch, non-wage indicators and countries without
/// history come back unchanged.
pub fn correct(
    table: &RedenominationTable,
    country_code: CountryCode,
    year: i32,
    value: f64,
    indicator: IndicatorType,
) -> f64 {
    if !indicator.is_wage() {
        return value;
    }
    let factor = table.cumulative_factor(country_code, year);
    if factor == 1.0 {
        return value;
    }
    round_to(value / factor, VALUE_PRECISION)
}

/// Corrects merged observations in place. Returns how many values changed.
pub fn correct_observations(
    table: &RedenominationTable,
    observations: &mut [CanonicalObservation],
) -> usize {
    let mut corrected = 0;
    for obs in observations.iter_mut() {
        let value = correct(table, obs.country_code, obs.year, obs.value, obs.indicator_type);
        if value != obs.value {
            corrected += 1;
            obs.value = value;
        }
    }
    corrected
}
