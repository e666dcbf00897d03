//! FAOSTAT consumer price indices, food.

use std::path::Path;

use econ_common::column_texts;
use econ_model::{DropReason, NormalizationReport, RawObservation, SourceId};
use polars::prelude::DataFrame;

use super::{SourceAdapter, parse_row};
use crate::csv::require_columns;
use crate::error::Result;

const CODE: &str = "Area Code (M49)";
const NAME: &str = "Area";
const ITEM: &str = "Item Code";
const PERIOD: &str = "Year";
const VALUE: &str = "Value";

/// FAOSTAT item code for "Consumer Prices, Food Indices (2015 = 100)".
pub const FOOD_CPI_ITEM: &str = "23013";

/// Monthly food CPI keyed by UN M49 numeric codes.
///
/// Codes often arrive quoted (`'004'`). Other items in a bulk download are
/// filtered out. Months are emitted individually and averaged per year by
/// the deduplicator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaostatFoodPrices;

impl SourceAdapter for FaostatFoodPrices {
    fn source(&self) -> SourceId {
        SourceId::Faostat
    }

    fn default_file_name(&self) -> &'static str {
        "faostat_food_cpi.csv"
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
        let items = column_texts(df, ITEM)?;
        let periods = column_texts(df, PERIOD)?;
        let values = column_texts(df, VALUE)?;

        let mut out = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            if let Some(item) = &items[idx]
                && item.trim_matches(|c| c == '\'' || c == '"') != FOOD_CPI_ITEM
            {
                report.record_dropped(self.source(), DropReason::FilteredBreakdown);
                continue;
            }
            let Some(row) = parse_row(
                self.source(),
                codes[idx].as_ref(),
                periods[idx].as_ref(),
                values[idx].as_ref(),
                report,
            ) else {
                continue;
            };
            let Some(mut obs) =
                RawObservation::for_source(self.source(), row.code, row.year, row.value)
            else {
                continue;
            };
            if let Some(name) = &names[idx] {
                obs = obs.with_name(name.as_str());
            }
            out.push(obs);
        }
        Ok(out)
    }
}
