//! Key and index definitions recorded in the manifest.
//!
//! Query-time indexes with the same fields live on `econ_compare::Snapshot`.

use serde::Serialize;

/// Fields of the unique key, in sort order.
pub const UNIQUE_KEY: [&str; 3] = ["country_code", "year", "indicator_type"];

/// Describes one index for the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexDefinition {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    pub unique: bool,
}

pub const INDEX_DEFINITIONS: [IndexDefinition; 3] = [
    IndexDefinition {
        name: "primary",
        fields: &UNIQUE_KEY,
        unique: true,
    },
    IndexDefinition {
        name: "by_indicator_year",
        fields: &["indicator_type", "year"],
        unique: false,
    },
    IndexDefinition {
        name: "by_country",
        fields: &["country_code"],
        unique: false,
    },
];
