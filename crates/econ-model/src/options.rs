//! Options controlling a pipeline run and query-time behavior.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Decimal places kept on `value` and `value_usd`.
pub const VALUE_PRECISION: u32 = 4;
/// Decimal places kept on rebased and dynamic index values.
pub const INDEX_PRECISION: u32 = 2;

/// How a primary and a supplementary series meeting at the same key combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePrecedence {
    /// Unweighted mean over every contribution from both series.
    #[default]
    Average,
    /// Use the primary series where it reports; supplementary fills gaps only.
    PreferPrimary,
}

impl SourcePrecedence {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourcePrecedence::Average => "average",
            SourcePrecedence::PreferPrimary => "prefer_primary",
        }
    }
}

impl fmt::Display for SourcePrecedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourcePrecedence {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "average" => Ok(SourcePrecedence::Average),
            "prefer_primary" => Ok(SourcePrecedence::PreferPrimary),
            _ => Err(ModelError::UnknownPrecedence {
                value: s.to_string(),
            }),
        }
    }
}

/// Options controlling the batch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Year whose value becomes 100 in `value_rebased`.
    pub reference_year: i32,

    /// Wage series with fewer observations than this are removed whole.
    pub min_wage_observations: usize,

    pub wage_source_precedence: SourcePrecedence,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            reference_year: 2016,
            min_wage_observations: 3,
            wage_source_precedence: SourcePrecedence::Average,
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    #[must_use]
    pub fn with_min_wage_observations(mut self, min: usize) -> Self {
        self.min_wage_observations = min;
        self
    }

    #[must_use]
    pub fn with_wage_source_precedence(mut self, precedence: SourcePrecedence) -> Self {
        self.wage_source_precedence = precedence;
        self
    }
}

/// Options for query-time comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Upper bound on countries in one cross-country comparison.
    pub max_comparison_countries: usize,

    /// Seconds a loaded snapshot stays fresh.
    pub snapshot_ttl_secs: u64,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_comparison_countries: 8,
            snapshot_ttl_secs: 300,
        }
    }
}
