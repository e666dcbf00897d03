//! Text access into Polars frames.
//!
//! Source extracts are read with every column as text so that codes such as
//! `"060"` keep their leading zeros. These helpers pull trimmed cell text back
//! out and parse numbers from it.

use polars::prelude::{AnyValue, DataFrame, PolarsResult};

use crate::numeric::format_numeric;

/// Converts a Polars `AnyValue` to trimmed text, `None` for null or blank cells.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use econ_common::any_to_text;
///
/// assert_eq!(any_to_text(AnyValue::Null), None);
/// assert_eq!(any_to_text(AnyValue::String("  DEU ")), Some("DEU".to_string()));
/// assert_eq!(any_to_text(AnyValue::Float64(2.5)), Some("2.5".to_string()));
/// ```
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::Null => return None,
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        other => other.to_string().trim_matches('"').trim().to_string(),
    };
    if text.is_empty() { None } else { Some(text) }
}

/// Reads one cell as text. Missing columns read as `None`.
pub fn cell_text(df: &DataFrame, column: &str, idx: usize) -> PolarsResult<Option<String>> {
    match df.column(column) {
        Ok(col) => Ok(any_to_text(col.get(idx)?)),
        Err(_) => Ok(None),
    }
}

/// Reads a whole column as text cells, one entry per row.
///
/// A column absent from the frame yields `None` in every row.
pub fn column_texts(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<String>>> {
    let height = df.height();
    let Ok(col) = df.column(column) else {
        return Ok(vec![None; height]);
    };
    let mut out = Vec::with_capacity(height);
    for idx in 0..height {
        out.push(any_to_text(col.get(idx)?));
    }
    Ok(out)
}

/// Parses a finite `f64`, `None` for blanks, garbage, `NaN` or infinities.
///
/// Thousands separators (`1,234.5`) are accepted.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = if trimmed.contains(',') {
        trimmed.replace(',', "").parse::<f64>().ok()?
    } else {
        trimmed.parse::<f64>().ok()?
    };
    parsed.is_finite().then_some(parsed)
}

/// Parses an `i32`, tolerating a `.0` suffix left by float-typed exports.
pub fn parse_i32(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let digits = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    digits.parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("code".into(), &["060", " DEU", ""]).into_column(),
            Series::new("value".into(), &["1.5", "n/a", "3"]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_any_to_text_blank_is_none() {
        assert_eq!(any_to_text(AnyValue::String("   ")), None);
        assert_eq!(any_to_text(AnyValue::Int32(4)), Some("4".to_string()));
    }

    #[test]
    fn test_cell_text_keeps_leading_zeros() {
        let df = frame();
        assert_eq!(cell_text(&df, "code", 0).unwrap(), Some("060".to_string()));
        assert_eq!(cell_text(&df, "code", 1).unwrap(), Some("DEU".to_string()));
        assert_eq!(cell_text(&df, "code", 2).unwrap(), None);
        assert_eq!(cell_text(&df, "missing", 0).unwrap(), None);
    }

    #[test]
    fn test_column_texts() {
        let df = frame();
        let values = column_texts(&df, "value").unwrap();
        assert_eq!(
            values,
            vec![Some("1.5".to_string()), Some("n/a".to_string()), Some("3".to_string())]
        );
        assert_eq!(column_texts(&df, "absent").unwrap(), vec![None, None, None]);
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64(" 3.25 "), Some(3.25));
        assert_eq!(parse_f64("1,234.5"), Some(1234.5));
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("inf"), None);
        assert_eq!(parse_f64(".."), None);
    }

    #[test]
    fn test_parse_i32() {
        assert_eq!(parse_i32("2016"), Some(2016));
        assert_eq!(parse_i32("2016.0"), Some(2016));
        assert_eq!(parse_i32("2016-Q1"), None);
        assert_eq!(parse_i32(""), None);
    }
}
