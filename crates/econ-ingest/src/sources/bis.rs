//! BIS residential property prices.

use std::path::Path;

use econ_common::column_texts;
use econ_model::{NormalizationReport, RawObservation, SourceId};
use polars::prelude::DataFrame;

use super::{SourceAdapter, parse_row};
use crate::csv::require_columns;
use crate::error::Result;

const CODE: &str = "REF_AREA";
const PERIOD: &str = "TIME_PERIOD";
const VALUE: &str = "OBS_VALUE";

/// Quarterly price index keyed by alpha-2 codes (`2020-Q1`).
///
/// Every quarter is emitted; the deduplicator folds them into an annual mean.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisHousingPrices;

impl SourceAdapter for BisHousingPrices {
    fn source(&self) -> SourceId {
        SourceId::Bis
    }

    fn default_file_name(&self) -> &'static str {
        "bis_housing_prices.csv"
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
        let periods = column_texts(df, PERIOD)?;
        let values = column_texts(df, VALUE)?;

        let out = (0..df.height())
            .filter_map(|idx| {
                parse_row(
                    self.source(),
                    codes[idx].as_ref(),
                    periods[idx].as_ref(),
                    values[idx].as_ref(),
                    report,
                )
            })
            .filter_map(|row| RawObservation::for_source(self.source(), row.code, row.year, row.value))
            .collect();
        Ok(out)
    }
}
