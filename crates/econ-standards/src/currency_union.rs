//! Shared-currency adoption table.
//!
//! Exchange-rate series for countries that joined a currency union report
//! pre-adoption years in the retired national unit. The conversion rate
//! here (old units per one union unit) restates them in union terms.

use std::collections::HashMap;
use std::io::Cursor;

use econ_model::CountryCode;
use serde::Deserialize;

use crate::embedded;
use crate::error::{Result, StandardsError};

const FILE: &str = "currency_unions.csv";

/// A country's entry into a currency union.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionMembership {
    pub currency: String,
    pub adoption_year: i32,
    /// Old national units per one union unit, fixed at adoption.
    pub conversion_rate: f64,
}

#[derive(Debug, Deserialize)]
struct UnionCsvRow {
    #[serde(rename = "Alpha3")]
    alpha3: String,
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "AdoptionYear")]
    adoption_year: i32,
    #[serde(rename = "ConversionRate")]
    conversion_rate: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CurrencyUnionTable {
    members: HashMap<CountryCode, UnionMembership>,
}

impl CurrencyUnionTable {
    /// Loads the embedded currency-union table.
    pub fn load() -> Result<Self> {
        Self::from_csv(embedded::CURRENCY_UNIONS)
    }

    pub fn from_csv(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(Cursor::new(content.as_bytes()));

        let mut members = HashMap::new();
        for result in reader.deserialize::<UnionCsvRow>() {
            let row = result.map_err(|e| StandardsError::CsvParse {
                file: FILE,
                message: e.to_string(),
            })?;
            let code = CountryCode::new(&row.alpha3).map_err(|_| StandardsError::InvalidValue {
                field: "Alpha3",
                value: row.alpha3.clone(),
                file: FILE,
            })?;
            if !row.conversion_rate.is_finite() || row.conversion_rate <= 0.0 {
                return Err(StandardsError::InvalidValue {
                    field: "ConversionRate",
                    value: row.conversion_rate.to_string(),
                    file: FILE,
                });
            }
            let membership = UnionMembership {
                currency: row.currency.trim().to_string(),
                adoption_year: row.adoption_year,
                conversion_rate: row.conversion_rate,
            };
            if members.insert(code, membership).is_some() {
                return Err(StandardsError::Duplicate {
                    field: "Alpha3",
                    value: code.to_string(),
                    file: FILE,
                });
            }
        }
        Ok(Self { members })
    }

    pub fn membership(&self, code: CountryCode) -> Option<&UnionMembership> {
        self.members.get(&code)
    }

    /// Divisor restating a `year` rate in union units, `None` when no restatement applies.
    pub fn legacy_divisor(&self, code: CountryCode, year: i32) -> Option<f64> {
        self.membership(code)
            .filter(|m| year < m.adoption_year)
            .map(|m| m.conversion_rate)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
