//! Embedded reference data.
//!
//! The tables are compiled into the binary with `include_str!()` so lookups
//! never touch the filesystem.

// =============================================================================
// Country identities
// =============================================================================

/// Alpha-3, alpha-2, UN M49 numeric code and display name per country.
pub const COUNTRIES: &str = include_str!("../data/countries.csv");

// =============================================================================
// Currency history
// =============================================================================

/// Currency redenominations: old units per one new unit, by switch year.
pub const REDENOMINATIONS: &str = include_str!("../data/redenominations.csv");

/// Shared-currency adoptions: adoption year and old units per one new unit.
pub const CURRENCY_UNIONS: &str = include_str!("../data/currency_unions.csv");
