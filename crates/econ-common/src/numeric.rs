//! Fixed-precision rounding and float formatting.

/// Rounds `value` to `places` decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use econ_common::round_to;
///
/// assert_eq!(round_to(1.23456, 4), 1.2346);
/// assert_eq!(round_to(104.4444, 2), 104.44);
/// assert_eq!(round_to(-2.5, 0), -3.0);
/// ```
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10_f64.powi(places as i32);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Expresses `value` relative to `base`, with `base` itself at 100.
///
/// `None` when the base is zero or not finite: such a series has no
/// defined index.
///
/// # Examples
///
/// ```
/// use econ_common::rebase_index;
///
/// assert_eq!(rebase_index(120.0, 80.0), Some(150.0));
/// assert_eq!(rebase_index(80.0, 80.0), Some(100.0));
/// assert_eq!(rebase_index(5.0, 0.0), None);
/// ```
pub fn rebase_index(value: f64, base: f64) -> Option<f64> {
    if base == 0.0 || !base.is_finite() || !value.is_finite() {
        return None;
    }
    Some(round_to(value / base * 100.0, 2))
}

/// Formats a float without trailing zeros after the decimal point.
///
/// # Examples
///
/// ```
/// use econ_common::format_numeric;
///
/// assert_eq!(format_numeric(100.0), "100");
/// assert_eq!(format_numeric(12.50), "12.5");
/// ```
pub fn format_numeric(value: f64) -> String {
    let s = format!("{value}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() || trimmed == "-" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}
