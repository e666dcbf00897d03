//! Country Identity Registry.
//!
//! Maps the identifiers statistical agencies use (UN M49 numeric codes,
//! alpha-2 codes, alpha-3 codes) onto one alpha-3 code space with a display
//! name. Regional aggregates and territories without a full entry stay
//! unresolved; callers drop those observations and count them.

use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;

use econ_model::CountryCode;
use serde::Deserialize;

use crate::embedded;
use crate::error::{Result, StandardsError};

const FILE: &str = "countries.csv";

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    pub code: CountryCode,
    pub alpha2: Option<String>,
    pub numeric: Option<u16>,
    pub name: String,
}

/// Outcome of resolving a raw identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved { code: CountryCode, name: String },
    Unresolved,
}

impl Resolution {
    pub fn code(&self) -> Option<CountryCode> {
        match self {
            Resolution::Resolved { code, .. } => Some(*code),
            Resolution::Unresolved => None,
        }
    }
}

/// Which code space a raw identifier belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RawIdentifier<'a> {
    Numeric(u16),
    Alpha2(String),
    Alpha3(&'a str),
    Other,
}

#[derive(Debug, Deserialize)]
struct CountryCsvRow {
    #[serde(rename = "Alpha3")]
    alpha3: String,
    #[serde(rename = "Alpha2")]
    alpha2: String,
    #[serde(rename = "Numeric")]
    numeric: String,
    #[serde(rename = "Name")]
    name: String,
}

/// Read-only lookup across the three code spaces.
#[derive(Debug, Clone, Default)]
pub struct CountryRegistry {
    records: BTreeMap<CountryCode, CountryRecord>,
    by_alpha2: HashMap<String, CountryCode>,
    by_numeric: HashMap<u16, CountryCode>,
}

impl CountryRegistry {
    /// Loads the embedded country table.
    pub fn load() -> Result<Self> {
        Self::from_csv(embedded::COUNTRIES)
    }

    /// Parses a country table with `Alpha3,Alpha2,Numeric,Name` columns.
    pub fn from_csv(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(Cursor::new(content.as_bytes()));

        let mut registry = Self::default();
        for result in reader.deserialize::<CountryCsvRow>() {
            let row = result.map_err(|e| StandardsError::CsvParse {
                file: FILE,
                message: e.to_string(),
            })?;
            registry.insert(parse_row(row)?)?;
        }
        Ok(registry)
    }

    fn insert(&mut self, record: CountryRecord) -> Result<()> {
        if self.records.contains_key(&record.code) {
            return Err(StandardsError::Duplicate {
                field: "Alpha3",
                value: record.code.to_string(),
                file: FILE,
            });
        }
        if let Some(alpha2) = &record.alpha2
            && self.by_alpha2.insert(alpha2.clone(), record.code).is_some()
        {
            return Err(StandardsError::Duplicate {
                field: "Alpha2",
                value: alpha2.clone(),
                file: FILE,
            });
        }
        if let Some(numeric) = record.numeric
            && self.by_numeric.insert(numeric, record.code).is_some()
        {
            return Err(StandardsError::Duplicate {
                field: "Numeric",
                value: numeric.to_string(),
                file: FILE,
            });
        }
        self.records.insert(record.code, record);
        Ok(())
    }

    /// Resolves a raw identifier and settles the display name.
    ///
    /// Bare integers are UN M49 numeric codes (leading zeros ignored), two
    /// characters are alpha-2, three letters are accepted when the registry
    /// knows them. A non-blank `raw_name` is kept as given; otherwise the
    /// registry name fills in.
    pub fn resolve(&self, raw_code: &str, raw_name: Option<&str>) -> Resolution {
        let Some(code) = self.lookup(raw_code) else {
            return Resolution::Unresolved;
        };
        let name = match raw_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.name(code).unwrap_or_default().to_string(),
        };
        Resolution::Resolved { code, name }
    }

    /// Maps a raw identifier to its alpha-3 code.
    pub fn lookup(&self, raw_code: &str) -> Option<CountryCode> {
        match classify(raw_code) {
            RawIdentifier::Numeric(numeric) => self.by_numeric.get(&numeric).copied(),
            RawIdentifier::Alpha2(alpha2) => self.by_alpha2.get(&alpha2).copied(),
            RawIdentifier::Alpha3(alpha3) => {
                let code = CountryCode::new(alpha3).ok()?;
                self.records.contains_key(&code).then_some(code)
            }
            RawIdentifier::Other => None,
        }
    }

    pub fn name(&self, code: CountryCode) -> Option<&str> {
        self.records.get(&code).map(|r| r.name.as_str())
    }

    pub fn get(&self, code: CountryCode) -> Option<&CountryRecord> {
        self.records.get(&code)
    }

    pub fn contains(&self, code: CountryCode) -> bool {
        self.records.contains_key(&code)
    }

    /// Iterates records in alpha-3 order.
    pub fn iter(&self) -> impl Iterator<Item = &CountryRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Strips surrounding whitespace and quote characters.
///
/// Feeds sometimes export numeric codes as quoted text (`'276'`, `"060"`).
pub fn clean_identifier(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '\'' || c == '"').trim()
}

fn classify(raw: &str) -> RawIdentifier<'_> {
    let clean = clean_identifier(raw);
    if clean.is_empty() {
        return RawIdentifier::Other;
    }
    if clean.bytes().all(|b| b.is_ascii_digit()) {
        return clean
            .parse::<u16>()
            .map_or(RawIdentifier::Other, RawIdentifier::Numeric);
    }
    match clean.len() {
        2 => RawIdentifier::Alpha2(clean.to_ascii_uppercase()),
        3 => RawIdentifier::Alpha3(clean),
        _ => RawIdentifier::Other,
    }
}

fn parse_row(row: CountryCsvRow) -> Result<CountryRecord> {
    let code = CountryCode::new(&row.alpha3).map_err(|_| StandardsError::InvalidValue {
        field: "Alpha3",
        value: row.alpha3.clone(),
        file: FILE,
    })?;

    let alpha2 = match row.alpha2.trim() {
        "" => None,
        value if value.len() == 2 && value.bytes().all(|b| b.is_ascii_uppercase()) => {
            Some(value.to_string())
        }
        value => {
            return Err(StandardsError::InvalidValue {
                field: "Alpha2",
                value: value.to_string(),
                file: FILE,
            });
        }
    };

    let numeric = match row.numeric.trim() {
        "" => None,
        value => Some(value.parse::<u16>().map_err(|_| StandardsError::InvalidValue {
            field: "Numeric",
            value: value.to_string(),
            file: FILE,
        })?),
    };

    let name = row.name.trim();
    if name.is_empty() {
        return Err(StandardsError::InvalidValue {
            field: "Name",
            value: String::new(),
            file: FILE,
        });
    }

    Ok(CountryRecord {
        code,
        alpha2,
        numeric,
        name: name.to_string(),
    })
}
