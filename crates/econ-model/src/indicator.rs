//! Indicator and source enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The fixed set of indicators carried by the canonical dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    /// Consumer price index, all items.
    Cpi,
    /// Consumer price index, food.
    FoodCpi,
    /// Residential property price index.
    HousingPriceIndex,
    /// Average monthly earnings in local currency.
    MonthlyWage,
}

impl IndicatorType {
    pub const ALL: [IndicatorType; 4] = [
        IndicatorType::Cpi,
        IndicatorType::FoodCpi,
        IndicatorType::HousingPriceIndex,
        IndicatorType::MonthlyWage,
    ];

    /// Returns the identifier used in stored data.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorType::Cpi => "cpi",
            IndicatorType::FoodCpi => "food_cpi",
            IndicatorType::HousingPriceIndex => "housing_price_index",
            IndicatorType::MonthlyWage => "monthly_wage",
        }
    }

    /// Returns the human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IndicatorType::Cpi => "CPI",
            IndicatorType::FoodCpi => "Food CPI",
            IndicatorType::HousingPriceIndex => "Housing Price Index",
            IndicatorType::MonthlyWage => "Monthly Wage",
        }
    }

    /// Wages are the only indicator expressed in currency units.
    pub fn is_wage(&self) -> bool {
        matches!(self, IndicatorType::MonthlyWage)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorType {
    type Err = ModelError;

    /// Accepts the stored identifier or the label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "cpi" => Ok(IndicatorType::Cpi),
            "food_cpi" => Ok(IndicatorType::FoodCpi),
            "housing_price_index" | "hpi" => Ok(IndicatorType::HousingPriceIndex),
            "monthly_wage" | "wage" => Ok(IndicatorType::MonthlyWage),
            _ => Err(ModelError::UnknownIndicator {
                value: s.to_string(),
            }),
        }
    }
}

/// Upstream feeds consumed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    /// World Bank consumer price index.
    #[serde(rename = "worldbank")]
    WorldBank,
    /// FAOSTAT food price index (monthly).
    Faostat,
    /// ILOSTAT monthly earnings, headline series.
    Ilostat,
    /// ILOSTAT monthly earnings by economic sector.
    IlostatSector,
    /// BIS residential property prices (quarterly).
    Bis,
    /// World Bank official exchange rate.
    #[serde(rename = "worldbank_fx")]
    WorldBankFx,
}

impl SourceId {
    pub const ALL: [SourceId; 6] = [
        SourceId::WorldBank,
        SourceId::Faostat,
        SourceId::Ilostat,
        SourceId::IlostatSector,
        SourceId::Bis,
        SourceId::WorldBankFx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::WorldBank => "worldbank",
            SourceId::Faostat => "faostat",
            SourceId::Ilostat => "ilostat",
            SourceId::IlostatSector => "ilostat_sector",
            SourceId::Bis => "bis",
            SourceId::WorldBankFx => "worldbank_fx",
        }
    }

    /// The source name written on canonical records.
    ///
    /// Both ILOSTAT series publish under one agency name.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            SourceId::IlostatSector => "ilostat",
            other => other.as_str(),
        }
    }

    /// The indicator this feed carries, `None` for the exchange-rate feed.
    pub fn indicator(&self) -> Option<IndicatorType> {
        match self {
            SourceId::WorldBank => Some(IndicatorType::Cpi),
            SourceId::Faostat => Some(IndicatorType::FoodCpi),
            SourceId::Ilostat | SourceId::IlostatSector => Some(IndicatorType::MonthlyWage),
            SourceId::Bis => Some(IndicatorType::HousingPriceIndex),
            SourceId::WorldBankFx => None,
        }
    }

    /// Supplementary feeds only widen coverage of a primary feed.
    pub fn is_supplementary(&self) -> bool {
        matches!(self, SourceId::IlostatSector)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        SourceId::ALL
            .into_iter()
            .find(|source| source.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownSource {
                value: s.to_string(),
            })
    }
}
