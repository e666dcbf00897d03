//! ILOSTAT average monthly earnings of employees.
//!
//! Two extracts feed the wage indicator. The headline series is split by sex
//! and currency type; the sector series adds an economic-activity split and
//! widens country coverage. Both are read in local currency units only.

use std::collections::BTreeMap;
use std::path::Path;

use econ_common::column_texts;
use econ_model::{DropReason, NormalizationReport, RawObservation, SourceId};
use polars::prelude::DataFrame;

use super::{SourceAdapter, parse_row};
use crate::csv::require_columns;
use crate::error::Result;

const CODE: &str = "ref_area";
const SEX: &str = "sex";
const CLASSIF1: &str = "classif1";
const CLASSIF2: &str = "classif2";
const PERIOD: &str = "time";
const VALUE: &str = "obs_value";

const SEX_TOTAL: &str = "SEX_T";
const SEX_MALE: &str = "SEX_M";
const SEX_FEMALE: &str = "SEX_F";
const LOCAL_CURRENCY: &str = "CUR_TYPE_LCU";
const ALL_SECTORS: &str = "ECO_SECTOR_TOTAL";

/// Currency annotation attached to every wage observation.
const LCU: &str = "LCU";

/// Headline earnings series: all sexes, local currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct IlostatWages;

impl SourceAdapter for IlostatWages {
    fn source(&self) -> SourceId {
        SourceId::Ilostat
    }

    fn default_file_name(&self) -> &'static str {
        "ilostat_wages.csv"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[CODE, SEX, CLASSIF1, PERIOD, VALUE]
    }

    fn read(
        &self,
        df: &DataFrame,
        path: &Path,
        report: &mut NormalizationReport,
    ) -> Result<Vec<RawObservation>> {
        require_columns(df, self.required_columns(), path)?;
        let codes = column_texts(df, CODE)?;
        let sexes = column_texts(df, SEX)?;
        let currencies = column_texts(df, CLASSIF1)?;
        let periods = column_texts(df, PERIOD)?;
        let values = column_texts(df, VALUE)?;

        let mut out = Vec::new();
        for idx in 0..df.height() {
            if sexes[idx].as_deref() != Some(SEX_TOTAL)
                || currencies[idx].as_deref() != Some(LOCAL_CURRENCY)
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
            if let Some(obs) = RawObservation::for_source(self.source(), row.code, row.year, row.value) {
                out.push(obs.with_currency(LCU));
            }
        }
        Ok(out)
    }
}

/// Sector-split earnings series, reduced to the all-sectors total.
///
/// Emits one observation per (area, year) after breakdown selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct IlostatSectorWages;

/// Values reported for one (area, year), split by sex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SexBreakdown {
    pub total: Vec<f64>,
    pub male: Vec<f64>,
    pub female: Vec<f64>,
}

impl SexBreakdown {
    fn rows(&self) -> usize {
        self.total.len() + self.male.len() + self.female.len()
    }

    /// Picks the value for this key.
    ///
    /// The all-sex total wins when reported. Otherwise the unweighted mean
    /// of the male and female means stands in, provided both exist.
    pub fn select(&self) -> Option<f64> {
        if let Some(total) = mean(&self.total) {
            return Some(total);
        }
        match (mean(&self.male), mean(&self.female)) {
            (Some(male), Some(female)) => Some((male + female) / 2.0),
            _ => None,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl SourceAdapter for IlostatSectorWages {
    fn source(&self) -> SourceId {
        SourceId::IlostatSector
    }

    fn default_file_name(&self) -> &'static str {
        "ilostat_sector_wages.csv"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[CODE, SEX, CLASSIF1, CLASSIF2, PERIOD, VALUE]
    }

    fn read(
        &self,
        df: &DataFrame,
        path: &Path,
        report: &mut NormalizationReport,
    ) -> Result<Vec<RawObservation>> {
        require_columns(df, self.required_columns(), path)?;
        let codes = column_texts(df, CODE)?;
        let sexes = column_texts(df, SEX)?;
        let sectors = column_texts(df, CLASSIF1)?;
        let currencies = column_texts(df, CLASSIF2)?;
        let periods = column_texts(df, PERIOD)?;
        let values = column_texts(df, VALUE)?;

        let mut grouped: BTreeMap<(String, i32), SexBreakdown> = BTreeMap::new();
        for idx in 0..df.height() {
            if sectors[idx].as_deref() != Some(ALL_SECTORS)
                || currencies[idx].as_deref() != Some(LOCAL_CURRENCY)
            {
                report.record_dropped(self.source(), DropReason::FilteredBreakdown);
                continue;
            }
            let sex = sexes[idx].as_deref();
            if !matches!(sex, Some(SEX_TOTAL | SEX_MALE | SEX_FEMALE)) {
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
            let breakdown = grouped.entry((row.code, row.year)).or_default();
            match sex {
                Some(SEX_TOTAL) => breakdown.total.push(row.value),
                Some(SEX_MALE) => breakdown.male.push(row.value),
                _ => breakdown.female.push(row.value),
            }
        }

        let mut out = Vec::with_capacity(grouped.len());
        for ((code, year), breakdown) in grouped {
            match breakdown.select() {
                Some(value) => {
                    if let Some(obs) = RawObservation::for_source(self.source(), code, year, value) {
                        out.push(obs.with_currency(LCU));
                    }
                }
                None => {
                    // One sex only: no comparable total exists for this key.
                    report.record_dropped_n(
                        self.source(),
                        DropReason::FilteredBreakdown,
                        breakdown.rows(),
                    );
                }
            }
        }
        Ok(out)
    }
}
