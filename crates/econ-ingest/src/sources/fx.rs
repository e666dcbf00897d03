//! World Bank official exchange rate (PA.NUS.FCRF), local currency per USD.

use std::path::Path;

use econ_common::column_texts;
use econ_model::{NormalizationReport, RawExchangeRate, SourceId};
use polars::prelude::DataFrame;

use super::parse_row;
use crate::csv::require_columns;
use crate::error::Result;

const CODE: &str = "countryiso3code";
const PERIOD: &str = "date";
const VALUE: &str = "value";

/// Exchange-rate feed description.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldBankExchangeRates;

impl WorldBankExchangeRates {
    pub const SOURCE: SourceId = SourceId::WorldBankFx;
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[CODE, PERIOD, VALUE];

    pub fn default_file_name(&self) -> &'static str {
        "worldbank_fx.csv"
    }
}

/// Reads annual rates as reported. Legacy-currency restatement happens later.
pub fn read_exchange_rates(
    df: &DataFrame,
    path: &Path,
    report: &mut NormalizationReport,
) -> Result<Vec<RawExchangeRate>> {
    require_columns(df, WorldBankExchangeRates::REQUIRED_COLUMNS, path)?;
    let codes = column_texts(df, CODE)?;
    let periods = column_texts(df, PERIOD)?;
    let values = column_texts(df, VALUE)?;

    let rates = (0..df.height())
        .filter_map(|idx| {
            parse_row(
                WorldBankExchangeRates::SOURCE,
                codes[idx].as_ref(),
                periods[idx].as_ref(),
                values[idx].as_ref(),
                report,
            )
        })
        .map(|row| RawExchangeRate {
            raw_code: row.code,
            year: row.year,
            rate: row.value,
        })
        .collect();
    Ok(rates)
}
