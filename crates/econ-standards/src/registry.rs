//! Process-wide reference tables.

use std::sync::OnceLock;

use tracing::debug;

use crate::countries::CountryRegistry;
use crate::currency_union::CurrencyUnionTable;
use crate::error::Result;
use crate::redenomination::RedenominationTable;

/// All static reference tables the pipeline reads.
#[derive(Debug, Clone, Default)]
pub struct StandardsRegistry {
    pub countries: CountryRegistry,
    pub redenominations: RedenominationTable,
    pub currency_unions: CurrencyUnionTable,
}

static SHARED: OnceLock<StandardsRegistry> = OnceLock::new();

impl StandardsRegistry {
    /// Loads every embedded table.
    ///
    /// # Errors
    ///
    /// Returns an error if any table fails to parse.
    pub fn load() -> Result<Self> {
        let countries = CountryRegistry::load()?;
        let redenominations = RedenominationTable::load()?;
        let currency_unions = CurrencyUnionTable::load()?;
        debug!(
            countries = countries.len(),
            redenominated = redenominations.len(),
            union_members = currency_unions.len(),
            "reference tables loaded"
        );
        Ok(Self {
            countries,
            redenominations,
            currency_unions,
        })
    }

    /// Returns the process-wide registry, loading it on first use.
    ///
    /// The tables never change after load, so every caller shares one copy.
    pub fn shared() -> Result<&'static StandardsRegistry> {
        if let Some(registry) = SHARED.get() {
            return Ok(registry);
        }
        let loaded = Self::load()?;
        Ok(SHARED.get_or_init(|| loaded))
    }
}
