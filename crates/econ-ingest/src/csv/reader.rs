//! Reads source extracts into string-typed frames.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Rejects UTF-16 files; UTF-8 with or without BOM passes.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open(path)?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        match buffer {
            [0xFF, 0xFE] => {
                return Err(IngestError::UnsupportedEncoding {
                    path: path.to_path_buf(),
                    encoding: "UTF-16 LE",
                });
            }
            [0xFE, 0xFF] => {
                return Err(IngestError::UnsupportedEncoding {
                    path: path.to_path_buf(),
                    encoding: "UTF-16 BE",
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Reads an extract with every column typed as text.
///
/// Schema inference is disabled so numeric area codes keep their leading
/// zeros and mixed numeric/blank value columns parse row by row.
pub fn read_extract(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "extract read"
    );
    Ok(df)
}

/// Fails with the first of `columns` missing from `df`.
pub fn require_columns(df: &DataFrame, columns: &[&str], path: &Path) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.trim_start_matches('\u{feff}').to_string())
        .collect();
    for column in columns {
        if !present.iter().any(|name| name == column) {
            return Err(IngestError::MissingColumn {
                column: (*column).to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}
