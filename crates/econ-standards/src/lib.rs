//! Static reference tables for the economic indicators pipeline.
//!
//! This crate provides:
//!
//! - **Country Identity Registry**: UN M49 numeric, alpha-2 and alpha-3
//!   codes resolved to one alpha-3 space with display names
//! - **Redenomination Table**: historical currency-unit changes per country
//! - **Currency unions**: adoption years and fixed conversion rates used to
//!   restate legacy exchange rates
//!
//! All tables are embedded at compile time and loaded once per process.
//!
//! # Example
//!
//! ```rust,ignore
//! use econ_standards::StandardsRegistry;
//!
//! let registry = StandardsRegistry::shared()?;
//! let code = registry.countries.lookup("276").unwrap();
//! assert_eq!(code.as_str(), "DEU");
//! ```

pub mod countries;
pub mod currency_union;
pub mod embedded;
pub mod error;
pub mod redenomination;
pub mod registry;

pub use countries::{CountryRecord, CountryRegistry, Resolution, clean_identifier};
pub use currency_union::{CurrencyUnionTable, UnionMembership};
pub use error::{Result, StandardsError};
pub use redenomination::{RedenominationEntry, RedenominationStep, RedenominationTable};
pub use registry::StandardsRegistry;
