//! TOML configuration file.
//!
//! ```toml
//! [pipeline]
//! reference_year = 2016
//! min_wage_observations = 3
//! wage_source_precedence = "average"
//!
//! [query]
//! max_comparison_countries = 8
//! snapshot_ttl_secs = 300
//!
//! [sources]
//! bis = "bis_2025q4.csv"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use econ_ingest::SourceFiles;
use econ_model::{PipelineOptions, QueryOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconConfig {
    pub pipeline: PipelineOptions,
    pub query: QueryOptions,
    /// Extract file names per source, relative to the input directory.
    pub sources: SourceFiles,
}

impl EconConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("load {}", path.display()))
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use econ_model::{SourceId, SourcePrecedence};
    use std::path::PathBuf;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(EconConfig::from_toml_str("").unwrap(), EconConfig::default());
    }

    #[test]
    fn test_partial_tables_keep_other_defaults() {
        let config = EconConfig::from_toml_str(
            "[pipeline]\n\
             reference_year = 2010\n\
             wage_source_precedence = \"prefer_primary\"\n\
             [sources]\n\
             bis = \"bis_2025.csv\"\n",
        )
        .unwrap();
        assert_eq!(config.pipeline.reference_year, 2010);
        assert_eq!(config.pipeline.min_wage_observations, 3);
        assert_eq!(
            config.pipeline.wage_source_precedence,
            SourcePrecedence::PreferPrimary
        );
        assert_eq!(config.query, QueryOptions::default());
        assert_eq!(
            config.sources,
            SourceFiles::default().with_file(SourceId::Bis, PathBuf::from("bis_2025.csv"))
        );
    }

    #[test]
    fn test_unknown_table_rejected() {
        assert!(EconConfig::from_toml_str("[pipelines]\nreference_year = 2010\n").is_err());
    }
}
