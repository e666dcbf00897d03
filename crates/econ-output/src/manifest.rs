//! Run manifest written next to the dataset.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use econ_compare::DatasetStats;
use econ_model::{NormalizationReport, PipelineOptions};
use serde::Serialize;

use crate::dataset::DATASET_FILE;
use crate::error::{OutputError, Result};
use crate::index::{INDEX_DEFINITIONS, IndexDefinition, UNIQUE_KEY};

pub const MANIFEST_FILE: &str = "manifest.json";
const MANIFEST_SCHEMA: &str = "econ.dataset.manifest";
const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct Manifest<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub dataset_file: &'static str,
    pub checksum_sha256: String,
    pub options: &'a PipelineOptions,
    pub unique_key: [&'static str; 3],
    pub indexes: [IndexDefinition; 3],
    pub stats: &'a DatasetStats,
    pub diagnostics: &'a NormalizationReport,
}

impl<'a> Manifest<'a> {
    pub fn new(
        generated_at: DateTime<Utc>,
        checksum_sha256: String,
        options: &'a PipelineOptions,
        stats: &'a DatasetStats,
        diagnostics: &'a NormalizationReport,
    ) -> Self {
        Self {
            schema: MANIFEST_SCHEMA,
            schema_version: MANIFEST_SCHEMA_VERSION,
            generated_at,
            dataset_file: DATASET_FILE,
            checksum_sha256,
            options,
            unique_key: UNIQUE_KEY,
            indexes: INDEX_DEFINITIONS,
            stats,
            diagnostics,
        }
    }
}

pub fn write_manifest(dir: &Path, manifest: &Manifest<'_>) -> Result<PathBuf> {
    let path = dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(manifest).map_err(|e| OutputError::Manifest {
        message: e.to_string(),
    })?;
    fs::write(&path, format!("{json}\n")).map_err(|e| OutputError::io(&path, e))?;
    Ok(path)
}
