//! Source extract ingestion.
//!
//! Upstream fetch collaborators save one CSV extract per statistical agency.
//! This crate reads those extracts into [`RawObservation`]s and raw exchange
//! rates, ready for normalization.
//!
//! # Features
//!
//! - **Extract reading**: Polars CSV reads with every column kept as text
//! - **Source adapters**: World Bank CPI, FAOSTAT food CPI, ILOSTAT wages
//!   (headline and sector series), BIS housing prices, World Bank FX
//! - **Period parsing**: annual, quarterly and monthly period labels
//! - **Failure isolation**: an unreadable extract marks its source
//!   unavailable instead of failing the batch
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use econ_ingest::{SourceFiles, load_raw_batch};
//!
//! let batch = load_raw_batch(Path::new("extracts/2025-06"), &SourceFiles::default());
//! println!("{} observations", batch.observations.len());
//! ```
//!
//! [`RawObservation`]: econ_model::RawObservation

mod csv;
mod error;
mod loader;
pub mod period;
mod sources;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{read_extract, require_columns};

// === Loading ===
pub use loader::{RawBatch, SourceFiles, load_raw_batch};

// === Source Adapters ===
pub use sources::{
    BisHousingPrices, FaostatFoodPrices, IlostatSectorWages, IlostatWages, SexBreakdown,
    SourceAdapter, WorldBankCpi, WorldBankExchangeRates, observation_adapters,
    read_exchange_rates,
};
