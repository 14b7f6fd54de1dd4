//! Alphabetic currency codes (ISO 4217 style).

use std::fmt;
use std::str::FromStr;

use crate::error::ConverterError;

/// The numeraire every upstream rate is quoted against.
pub const BASE_CURRENCY: &str = "BYN";

/// Returns true iff `code` is exactly three alphabetic characters.
pub fn is_valid_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// A validated, upper-cased three-letter currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Validates and canonicalizes a code. Case-insensitive.
    pub fn parse(code: &str) -> Result<Self, ConverterError> {
        if !is_valid_currency_code(code) {
            return Err(ConverterError::InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn is_base(&self) -> bool {
        self.0 == BASE_CURRENCY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ConverterError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
