//! Per-source adapters.
//!
//! Each adapter knows one agency's extract layout: which columns carry the
//! area code, period and value, and which breakdown rows to keep. Adapters
//! never resolve identities; they hand raw codes to the normalizer.

mod bis;
mod faostat;
mod fx;
mod ilostat;
mod worldbank;

use std::path::Path;

use econ_common::parse_f64;
use econ_model::{DropReason, NormalizationReport, RawObservation, SourceId};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::period::parse_year;

pub use bis::BisHousingPrices;
pub use faostat::FaostatFoodPrices;
pub use fx::{WorldBankExchangeRates, read_exchange_rates};
pub use ilostat::{IlostatSectorWages, IlostatWages, SexBreakdown};
pub use worldbank::WorldBankCpi;

/// Converts one agency extract into raw observations.
pub trait SourceAdapter: Send + Sync {
    fn source(&self) -> SourceId;

    /// File name of the extract inside the input directory.
    fn default_file_name(&self) -> &'static str;

    /// Columns that must be present for the extract to be usable.
    fn required_columns(&self) -> &'static [&'static str];

    /// Reads every usable row, recording dropped rows on `report`.
    fn read(
        &self,
        df: &DataFrame,
        path: &Path,
        report: &mut NormalizationReport,
    ) -> Result<Vec<RawObservation>>;
}

/// Every observation adapter, in processing order.
pub fn observation_adapters() -> Vec<Box<dyn SourceAdapter>> {
    vec![
        Box::new(WorldBankCpi),
        Box::new(FaostatFoodPrices),
        Box::new(IlostatWages),
        Box::new(IlostatSectorWages),
        Box::new(BisHousingPrices),
    ]
}

/// A row's code, year and value after basic parsing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedRow {
    pub code: String,
    pub year: i32,
    pub value: f64,
}

/// Parses the three fields every source shares, recording why a row fails.
pub(crate) fn parse_row(
    source: SourceId,
    code: Option<&String>,
    period: Option<&String>,
    value: Option<&String>,
    report: &mut NormalizationReport,
) -> Option<ParsedRow> {
    let Some(code) = code else {
        report.record_dropped(source, DropReason::MissingCountry);
        return None;
    };
    let Some(year) = period.and_then(|p| parse_year(p)) else {
        report.record_dropped(source, DropReason::BadPeriod);
        return None;
    };
    let Some(value) = value.and_then(|v| parse_f64(v)) else {
        report.record_dropped(source, DropReason::BadValue);
        return None;
    };
    Some(ParsedRow {
        code: code.clone(),
        year,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_parse_row_ok() {
        let mut report = NormalizationReport::default();
        let row = parse_row(
            SourceId::Bis,
            s("DE").as_ref(),
            s("2020-Q2").as_ref(),
            s("104.2").as_ref(),
            &mut report,
        );
        assert_eq!(
            row,
            Some(ParsedRow {
                code: "DE".to_string(),
                year: 2020,
                value: 104.2
            })
        );
        assert_eq!(report.dropped_total(), 0);
    }

    #[test]
    fn test_parse_row_records_reason() {
        let mut report = NormalizationReport::default();
        assert!(parse_row(SourceId::Bis, None, s("2020").as_ref(), s("1").as_ref(), &mut report).is_none());
        assert!(parse_row(SourceId::Bis, s("DE").as_ref(), s("soon").as_ref(), s("1").as_ref(), &mut report).is_none());
        assert!(parse_row(SourceId::Bis, s("DE").as_ref(), s("2020").as_ref(), None, &mut report).is_none());
        assert!(parse_row(SourceId::Bis, s("DE").as_ref(), s("2020").as_ref(), s("NaN").as_ref(), &mut report).is_none());
        let reasons = &report.dropped[&SourceId::Bis];
        assert_eq!(reasons[&DropReason::MissingCountry], 1);
        assert_eq!(reasons[&DropReason::BadPeriod], 1);
        assert_eq!(reasons[&DropReason::BadValue], 2);
    }

    #[test]
    fn test_adapters_cover_every_observation_source() {
        let sources: Vec<SourceId> = observation_adapters().iter().map(|a| a.source()).collect();
        assert_eq!(
            sources,
            vec![
                SourceId::WorldBank,
                SourceId::Faostat,
                SourceId::Ilostat,
                SourceId::IlostatSector,
                SourceId::Bis,
            ]
        );
    }
}
