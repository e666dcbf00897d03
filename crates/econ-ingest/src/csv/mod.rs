//! CSV extract reading.

mod reader;

pub use reader::{read_extract, require_columns, validate_encoding};
