//! Reporting-period parsing.
//!
//! Agencies label observations as plain years, quarters or months. Only the
//! calendar year survives into the canonical dataset; sub-annual values are
//! averaged per year further down the pipeline.

/// Sub-annual position of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubPeriod {
    Annual,
    Quarter(u8),
    Month(u8),
}

/// A parsed reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub sub: SubPeriod,
}

/// Parses `YYYY`, `YYYY-Qn`, `YYYYQn`, `YYYY-MM`, `YYYYMmm` and `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use econ_ingest::period::{parse_period, SubPeriod};
///
/// assert_eq!(parse_period("2020-Q3").unwrap().sub, SubPeriod::Quarter(3));
/// assert_eq!(parse_period("1999M12").unwrap().year, 1999);
/// assert!(parse_period("2020-Q5").is_none());
/// ```
pub fn parse_period(raw: &str) -> Option<Period> {
    let text = raw.trim();
    let text = text.strip_suffix(".0").unwrap_or(text);
    if text.len() < 4 || !text.is_char_boundary(4) {
        return None;
    }
    let (year_part, rest) = text.split_at(4);
    if !year_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year_part.parse().ok()?;

    let sub = if rest.is_empty() {
        SubPeriod::Annual
    } else {
        let rest = rest.strip_prefix('-').unwrap_or(rest);
        parse_sub_period(rest)?
    };
    Some(Period { year, sub })
}

fn parse_sub_period(rest: &str) -> Option<SubPeriod> {
    if let Some(quarter) = rest.strip_prefix(['Q', 'q']) {
        let quarter: u8 = quarter.parse().ok()?;
        return (1..=4).contains(&quarter).then_some(SubPeriod::Quarter(quarter));
    }
    let month_text = rest.strip_prefix(['M', 'm']).unwrap_or(rest);
    // Full dates keep only the month.
    let month_text = month_text.split('-').next()?;
    if month_text.is_empty() || month_text.len() > 2 {
        return None;
    }
    let month: u8 = month_text.parse().ok()?;
    (1..=12).contains(&month).then_some(SubPeriod::Month(month))
}

/// Shortcut for callers that only need the calendar year.
pub fn parse_year(raw: &str) -> Option<i32> {
    parse_period(raw).map(|period| period.year)
}
