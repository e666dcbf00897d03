//! Canonical three-letter country codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// An uppercase three-letter country code.
///
/// Construction validates the shape only. Whether the code is known is a
/// question for the country registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode([u8; 3]);

impl CountryCode {
    /// Parses a code, uppercasing ASCII letters.
    ///
    /// # Examples
    ///
    /// ```
    /// use econ_model::CountryCode;
    ///
    /// let code = CountryCode::new("deu").unwrap();
    /// assert_eq!(code.as_str(), "DEU");
    /// assert!(CountryCode::new("DE").is_err());
    /// assert!(CountryCode::new("D3U").is_err());
    /// ```
    pub fn new(code: &str) -> Result<Self, ModelError> {
        let trimmed = code.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(ModelError::InvalidCountryCode {
                code: code.to_string(),
            });
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.as_str())
    }
}

impl FromStr for CountryCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_code_normalizes_case_and_whitespace() {
        let code: CountryCode = " fra ".parse().unwrap();
        assert_eq!(code.to_string(), "FRA");
    }

    #[test]
    fn test_country_code_rejects_bad_shapes() {
        for bad in ["", "FR", "FRAN", "12A", "F-A"] {
            assert!(CountryCode::new(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_country_code_orders_alphabetically() {
        let mut codes = vec![
            CountryCode::new("USA").unwrap(),
            CountryCode::new("ARG").unwrap(),
            CountryCode::new("DEU").unwrap(),
        ];
        codes.sort();
        let names: Vec<&str> = codes.iter().map(CountryCode::as_str).collect();
        assert_eq!(names, vec!["ARG", "DEU", "USA"]);
    }

    #[test]
    fn test_country_code_serde_as_string() {
        let code = CountryCode::new("JPN").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"JPN\"");
        let back: CountryCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<CountryCode>("\"JP\"").is_err());
    }
}
