//! Redenomination Table.
//!
//! Per-country history of currency-unit changes. Each step retires the old
//! unit at a fixed ratio: `factor` old units buy one new unit from
//! `switch_year` onwards.

use std::collections::HashMap;
use std::io::Cursor;

use econ_model::CountryCode;
use serde::Deserialize;

use crate::embedded;
use crate::error::{Result, StandardsError};

const FILE: &str = "redenominations.csv";

/// One currency-unit change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedenominationStep {
    pub switch_year: i32,
    /// Old units per one new unit.
    pub factor: f64,
}

/// A country's full redenomination history, ascending by switch year.
#[derive(Debug, Clone, PartialEq)]
pub struct RedenominationEntry {
    pub country_code: CountryCode,
    pub steps: Vec<RedenominationStep>,
}

impl RedenominationEntry {
    /// Product of the factors of every step after `year`.
    ///
    /// Dividing a value observed in `year` by this expresses it in the
    /// current unit. Returns 1.0 for years at or after the latest switch.
    pub fn cumulative_factor(&self, year: i32) -> f64 {
        self.steps
            .iter()
            .filter(|step| year < step.switch_year)
            .map(|step| step.factor)
            .product()
    }

    pub fn latest_switch(&self) -> Option<i32> {
        self.steps.last().map(|step| step.switch_year)
    }
}

#[derive(Debug, Deserialize)]
struct RedenominationCsvRow {
    #[serde(rename = "Alpha3")]
    alpha3: String,
    #[serde(rename = "SwitchYear")]
    switch_year: i32,
    #[serde(rename = "Factor")]
    factor: f64,
}

/// Read-only redenomination lookup by country.
#[derive(Debug, Clone, Default)]
pub struct RedenominationTable {
    entries: HashMap<CountryCode, RedenominationEntry>,
}

impl RedenominationTable {
    /// Loads the embedded redenomination history.
    pub fn load() -> Result<Self> {
        Self::from_csv(embedded::REDENOMINATIONS)
    }

    /// Parses a table with `Alpha3,SwitchYear,Factor` columns.
    ///
    /// Rows may come in any order; steps are sorted per country.
    pub fn from_csv(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(Cursor::new(content.as_bytes()));

        let mut entries: HashMap<CountryCode, RedenominationEntry> = HashMap::new();
        for result in reader.deserialize::<RedenominationCsvRow>() {
            let row = result.map_err(|e| StandardsError::CsvParse {
                file: FILE,
                message: e.to_string(),
            })?;
            let code = CountryCode::new(&row.alpha3).map_err(|_| StandardsError::InvalidValue {
                field: "Alpha3",
                value: row.alpha3.clone(),
                file: FILE,
            })?;
            if !row.factor.is_finite() || row.factor <= 0.0 {
                return Err(StandardsError::InvalidValue {
                    field: "Factor",
                    value: row.factor.to_string(),
                    file: FILE,
                });
            }
            entries
                .entry(code)
                .or_insert_with(|| RedenominationEntry {
                    country_code: code,
                    steps: Vec::new(),
                })
                .steps
                .push(RedenominationStep {
                    switch_year: row.switch_year,
                    factor: row.factor,
                });
        }

        for entry in entries.values_mut() {
            entry.steps.sort_by_key(|step| step.switch_year);
            if let Some(pair) = entry
                .steps
                .windows(2)
                .find(|pair| pair[0].switch_year == pair[1].switch_year)
            {
                return Err(StandardsError::Duplicate {
                    field: "SwitchYear",
                    value: format!("{} {}", entry.country_code, pair[0].switch_year),
                    file: FILE,
                });
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, code: CountryCode) -> Option<&RedenominationEntry> {
        self.entries.get(&code)
    }

    /// Combined divisor for a value observed in `year`, 1.0 when none applies.
    pub fn cumulative_factor(&self, code: CountryCode, year: i32) -> f64 {
        self.get(code)
            .map_or(1.0, |entry| entry.cumulative_factor(year))
    }

    /// Countries with at least one redenomination, in code order.
    pub fn countries(&self) -> Vec<CountryCode> {
        let mut codes: Vec<CountryCode> = self.entries.keys().copied().collect();
        codes.sort();
        codes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Alpha3,SwitchYear,Factor\n\
        ARG,1985,1000\n\
        ARG,1970,100\n\
        ARG,1992,10000\n\
        ARG,1983,10000\n";

    fn arg() -> CountryCode {
        CountryCode::new("ARG").unwrap()
    }

    #[test]
    fn test_steps_sorted_ascending() {
        let table = RedenominationTable::from_csv(SAMPLE).unwrap();
        let years: Vec<i32> = table
            .get(arg())
            .unwrap()
            .steps
            .iter()
            .map(|s| s.switch_year)
            .collect();
        assert_eq!(years, vec![1970, 1983, 1985, 1992]);
    }

    #[test]
    fn test_cumulative_factor_compounds() {
        let table = RedenominationTable::from_csv(SAMPLE).unwrap();
        assert_eq!(table.cumulative_factor(arg(), 1965), 1e13);
        assert_eq!(table.cumulative_factor(arg(), 1984), 1e7);
        assert_eq!(table.cumulative_factor(arg(), 1992), 1.0);
        assert_eq!(table.cumulative_factor(arg(), 2020), 1.0);
    }

    #[test]
    fn test_switch_year_itself_is_new_unit() {
        let table = RedenominationTable::from_csv(SAMPLE).unwrap();
        assert_eq!(table.cumulative_factor(arg(), 1970), 1e11);
        assert_eq!(table.cumulative_factor(arg(), 1969), 1e13);
    }

    #[test]
    fn test_unknown_country_is_identity() {
        let table = RedenominationTable::from_csv(SAMPLE).unwrap();
        let usa = CountryCode::new("USA").unwrap();
        assert_eq!(table.cumulative_factor(usa, 1900), 1.0);
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        let content = "Alpha3,SwitchYear,Factor\nARG,1970,0\n";
        assert!(RedenominationTable::from_csv(content).is_err());
    }

    #[test]
    fn test_rejects_repeated_switch_year() {
        let content = "Alpha3,SwitchYear,Factor\nARG,1970,100\nARG,1970,10\n";
        let err = RedenominationTable::from_csv(content).unwrap_err();
        assert!(matches!(err, StandardsError::Duplicate { .. }));
    }
}
