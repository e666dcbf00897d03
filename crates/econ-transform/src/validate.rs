//! Final structural checks on the canonical batch.

use std::collections::{BTreeMap, HashSet};

use econ_model::{CanonicalObservation, CountryCode, IndicatorType};

use crate::error::{Result, TransformError};

/// Verifies key uniqueness, finite numeric fields and the wage minimum.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_batch(observations: &[CanonicalObservation], min_wage_observations: usize) -> Result<()> {
    let mut seen = HashSet::with_capacity(observations.len());
    let mut wage_counts: BTreeMap<(CountryCode, IndicatorType), usize> = BTreeMap::new();

    for obs in observations {
        let key = obs.key();
        if !seen.insert(key) {
            return Err(TransformError::DuplicateKey { key });
        }
        let fields = [
            ("value", Some(obs.value)),
            ("value_usd", obs.value_usd),
            ("value_rebased", obs.value_rebased),
        ];
        for (field, value) in fields {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(TransformError::NonFiniteValue { key, field });
            }
        }
        if obs.indicator_type.is_wage() {
            *wage_counts.entry((obs.country_code, obs.indicator_type)).or_insert(0) += 1;
        }
    }

    if let Some(((country, indicator), count)) = wage_counts
        .into_iter()
        .find(|(_, count)| *count < min_wage_observations)
    {
        return Err(TransformError::SparseSeries {
            country: country.to_string(),
            indicator,
            count,
        });
    }
    Ok(())
}
