//! World Bank consumer price index (FP.CPI.TOTL).

use std::path::Path;

use econ_common::column_texts;
use econ_model::{NormalizationReport, RawObservation, SourceId};
use polars::prelude::DataFrame;

use super::{SourceAdapter, parse_row};
use crate::csv::require_columns;
use crate::error::Result;

const CODE: &str = "countryiso3code";
const NAME: &str = "country";
const PERIOD: &str = "date";
const VALUE: &str = "value";

/// Annual CPI keyed by alpha-3 codes. Aggregates such as `EUU` or `WLD`
/// appear in the feed and fall out at identity resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldBankCpi;

impl SourceAdapter for WorldBankCpi {
    fn source(&self) -> SourceId {
        SourceId::WorldBank
    }

    fn default_file_name(&self) -> &'static str {
        "worldbank_cpi.csv"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[CODE, PERIOD, VALUE]
    }

    fn read(
        &self,
        df: &DataFrame,
        path: &Path,
        report: &mut NormalizationReport,
    ) -> Result<Vec<RawObservation>> {
        require_columns(df, self.required_columns(), path)?;
        let codes = column_texts(df, CODE)?;
        let names = column_texts(df, NAME)?;
        let periods = column_texts(df, PERIOD)?;
        let values = column_texts(df, VALUE)?;

        let mut out = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let Some(row) = parse_row(
                self.source(),
                codes[idx].as_ref(),
                periods[idx].as_ref(),
                values[idx].as_ref(),
                report,
            ) else {
                continue;
            };
            if let Some(mut obs) = RawObservation::for_source(self.source(), row.code, row.year, row.value) {
                if let Some(name) = &names[idx] {
                    obs = obs.with_name(name.as_str());
                }
                out.push(obs);
            }
        }
        Ok(out)
    }
}
