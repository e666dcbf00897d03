//! Raw and canonical observation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::country::CountryCode;
use crate::indicator::{IndicatorType, SourceId};

/// One record as delivered by a source adapter, before identity resolution.
///
/// Only lives for the duration of a single normalization pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub source: SourceId,
    /// Numeric, alpha-2, alpha-3 or free text, exactly as the source sent it.
    pub raw_code: String,
    pub raw_name: Option<String>,
    pub year: i32,
    pub value: f64,
    pub indicator: IndicatorType,
    /// Currency annotation, when the source provides one.
    pub currency: Option<String>,
}

impl RawObservation {
    /// Builds an observation for the indicator the source carries.
    ///
    /// Returns `None` for the exchange-rate feed, which carries no indicator.
    pub fn for_source(
        source: SourceId,
        raw_code: impl Into<String>,
        year: i32,
        value: f64,
    ) -> Option<Self> {
        Some(Self {
            source,
            raw_code: raw_code.into(),
            raw_name: None,
            year,
            value,
            indicator: source.indicator()?,
            currency: None,
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.raw_name = if name.trim().is_empty() { None } else { Some(name) };
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// The unique key of the canonical dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObservationKey {
    pub country_code: CountryCode,
    pub year: i32,
    pub indicator_type: IndicatorType,
}

/// One normalized data point of the unified dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalObservation {
    pub country_code: CountryCode,
    pub country_name: String,
    pub year: i32,
    pub indicator_type: IndicatorType,
    /// Current-currency units after redenomination correction; unitless for indices.
    pub value: f64,
    pub value_usd: Option<f64>,
    pub value_rebased: Option<f64>,
    pub source: String,
    pub ingested_at: DateTime<Utc>,
}

impl CanonicalObservation {
    pub fn key(&self) -> ObservationKey {
        ObservationKey {
            country_code: self.country_code,
            year: self.year,
            indicator_type: self.indicator_type,
        }
    }

    /// The value on the requested basis: USD when `usd` is set, local otherwise.
    pub fn value_on(&self, usd: bool) -> Option<f64> {
        if usd { self.value_usd } else { Some(self.value) }
    }
}

/// An exchange-rate row before identity resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExchangeRate {
    pub raw_code: String,
    pub year: i32,
    pub rate: f64,
}

/// Local-currency units per one US dollar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub country_code: CountryCode,
    pub year: i32,
    pub rate: f64,
}
