//! The canonical dataset file.
//!
//! One CSV per run, fully replaced on every write. The temporary file lives
//! in the destination directory so the final rename never crosses a
//! filesystem boundary.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use econ_common::{column_texts, parse_f64, parse_i32};
use econ_model::{CanonicalObservation, CountryCode, IndicatorType};
use polars::prelude::{Column, CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};
use tracing::debug;

use crate::error::{OutputError, Result};

/// File name of the dataset inside the output directory.
pub const DATASET_FILE: &str = "observations.csv";

/// Column order of the dataset file.
pub const COLUMNS: [&str; 9] = [
    "country_code",
    "country_name",
    "year",
    "indicator_type",
    "value",
    "value_usd",
    "value_rebased",
    "source",
    "ingested_at",
];

pub fn dataset_path(dir: &Path) -> PathBuf {
    dir.join(DATASET_FILE)
}

/// Builds the output frame, rows ordered by the unique key.
pub fn observations_to_frame(observations: &[CanonicalObservation]) -> Result<DataFrame> {
    let mut rows: Vec<&CanonicalObservation> = observations.iter().collect();
    rows.sort_by_key(|obs| obs.key());

    let codes: Vec<&str> = rows.iter().map(|o| o.country_code.as_str()).collect();
    let names: Vec<&str> = rows.iter().map(|o| o.country_name.as_str()).collect();
    let years: Vec<i32> = rows.iter().map(|o| o.year).collect();
    let indicators: Vec<&str> = rows.iter().map(|o| o.indicator_type.as_str()).collect();
    let values: Vec<f64> = rows.iter().map(|o| o.value).collect();
    let usd: Vec<Option<f64>> = rows.iter().map(|o| o.value_usd).collect();
    let rebased: Vec<Option<f64>> = rows.iter().map(|o| o.value_rebased).collect();
    let sources: Vec<&str> = rows.iter().map(|o| o.source.as_str()).collect();
    let ingested: Vec<String> = rows
        .iter()
        .map(|o| o.ingested_at.to_rfc3339_opts(SecondsFormat::Secs, true))
        .collect();

    let df = DataFrame::new(vec![
        Column::new(COLUMNS[0].into(), codes),
        Column::new(COLUMNS[1].into(), names),
        Column::new(COLUMNS[2].into(), years),
        Column::new(COLUMNS[3].into(), indicators),
        Column::new(COLUMNS[4].into(), values),
        Column::new(COLUMNS[5].into(), usd),
        Column::new(COLUMNS[6].into(), rebased),
        Column::new(COLUMNS[7].into(), sources),
        Column::new(COLUMNS[8].into(), ingested),
    ])?;
    Ok(df)
}

/// Replaces the dataset in `dir` with `observations`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written. A failed write leaves any previous dataset in place.
pub fn write_dataset(dir: &Path, observations: &[CanonicalObservation]) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| OutputError::io(dir, e))?;
    let mut df = observations_to_frame(observations)?;

    let final_path = dataset_path(dir);
    let tmp_path = dir.join(format!(".{DATASET_FILE}.tmp"));
    {
        let mut file = File::create(&tmp_path).map_err(|e| OutputError::io(&tmp_path, e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)?;
        file.sync_all().map_err(|e| OutputError::io(&tmp_path, e))?;
    }
    fs::rename(&tmp_path, &final_path).map_err(|e| OutputError::io(&final_path, e))?;

    debug!(path = %final_path.display(), rows = df.height(), "dataset written");
    Ok(final_path)
}

/// Loads the dataset written by [`write_dataset`].
///
/// # Errors
///
/// Returns an error if the file is missing, lacks a column, or holds a row
/// that does not parse.
pub fn read_dataset(dir: &Path) -> Result<Vec<CanonicalObservation>> {
    let path = dataset_path(dir);
    if !path.is_file() {
        return Err(OutputError::DatasetNotFound { path });
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.clone()))?
        .finish()?;

    for column in COLUMNS {
        if df.column(column).is_err() {
            return Err(OutputError::MissingColumn {
                column: column.to_string(),
                path,
            });
        }
    }

    let mut columns = Vec::with_capacity(COLUMNS.len());
    for column in COLUMNS {
        columns.push(column_texts(&df, column)?);
    }

    let mut out = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let cell = |idx: usize| columns[idx][row].as_deref();
        let record = parse_record(&cell).map_err(|message| OutputError::InvalidRecord {
            path: path.clone(),
            row: row + 1,
            message,
        })?;
        out.push(record);
    }

    debug!(path = %path.display(), rows = out.len(), "dataset read");
    Ok(out)
}

fn parse_record<'a>(
    cell: &impl Fn(usize) -> Option<&'a str>,
) -> std::result::Result<CanonicalObservation, String> {
    let required = |idx: usize| cell(idx).ok_or_else(|| format!("{} is empty", COLUMNS[idx]));
    let optional_f64 = |idx: usize| match cell(idx) {
        None => Ok(None),
        Some(text) => parse_f64(text)
            .map(Some)
            .ok_or_else(|| format!("{} is not a number: {text}", COLUMNS[idx])),
    };

    let country_code = CountryCode::new(required(0)?).map_err(|e| e.to_string())?;
    let year_text = required(2)?;
    let year = parse_i32(year_text).ok_or_else(|| format!("year is not an integer: {year_text}"))?;
    let indicator_type: IndicatorType = required(3)?.parse().map_err(|e: econ_model::ModelError| e.to_string())?;
    let value = optional_f64(4)?.ok_or_else(|| "value is empty".to_string())?;
    let ingested_text = required(8)?;
    let ingested_at = DateTime::parse_from_rfc3339(ingested_text)
        .map_err(|e| format!("ingested_at is not a timestamp: {e}"))?
        .with_timezone(&Utc);

    Ok(CanonicalObservation {
        country_code,
        country_name: cell(1).unwrap_or_default().to_string(),
        year,
        indicator_type,
        value,
        value_usd: optional_f64(5)?,
        value_rebased: optional_f64(6)?,
        source: required(7)?.to_string(),
        ingested_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::tempdir;

    fn obs(code: &str, year: i32, value: f64) -> CanonicalObservation {
        CanonicalObservation {
            country_code: CountryCode::new(code).unwrap(),
            country_name: "Korea, Rep.".to_string(),
            year,
            indicator_type: IndicatorType::MonthlyWage,
            value,
            value_usd: None,
            value_rebased: Some(100.0),
            source: "ilostat".to_string(),
            ingested_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_frame_sorted_by_key() {
        let df = observations_to_frame(&[obs("KOR", 2001, 2.0), obs("KOR", 2000, 1.0)]).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), COLUMNS.len());
        let years = column_texts(&df, "year").unwrap();
        assert_eq!(years, vec![Some("2000".to_string()), Some("2001".to_string())]);
    }

    #[test]
    fn test_write_replaces_previous_dataset() {
        let dir = tempdir().unwrap();
        write_dataset(dir.path(), &[obs("KOR", 2000, 1.0), obs("KOR", 2001, 2.0)]).unwrap();
        write_dataset(dir.path(), &[obs("KOR", 2002, 3.0)]).unwrap();

        let loaded = read_dataset(dir.path()).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].year, 2002);
        assert_eq!(loaded[0].country_name, "Korea, Rep.");
        assert!(!dir.path().join(".observations.csv.tmp").exists());
    }

    #[test]
    fn test_missing_dataset() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_dataset(dir.path()),
            Err(OutputError::DatasetNotFound { .. })
        ));
    }

    #[test]
    fn test_bad_row_reports_position() {
        let dir = tempdir().unwrap();
        let mut file = File::create(dataset_path(dir.path())).unwrap();
        writeln!(file, "{}", COLUMNS.join(",")).unwrap();
        writeln!(file, "KOR,Korea,2000,cpi,1.5,,,worldbank,1970-01-01T00:00:00Z").unwrap();
        writeln!(file, "KOR,Korea,2001,cpi,abc,,,worldbank,1970-01-01T00:00:00Z").unwrap();
        drop(file);

        match read_dataset(dir.path()) {
            Err(OutputError::InvalidRecord { row, message, .. }) => {
                assert_eq!(row, 2);
                assert!(message.contains("value"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_column_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dataset_path(dir.path()), "country_code,year\nKOR,2000\n").unwrap();
        assert!(matches!(
            read_dataset(dir.path()),
            Err(OutputError::MissingColumn { .. })
        ));
    }
}
