//! Shared helpers used across the econ crates.
//!
//! - [`polars`]: reading text cells out of string-typed frames
//! - [`numeric`]: fixed-precision rounding, index rebasing and compact float
//!   formatting

pub mod numeric;
pub mod polars;

pub use numeric::{format_numeric, rebase_index, round_to};
pub use polars::{any_to_text, cell_text, column_texts, parse_f64, parse_i32};
