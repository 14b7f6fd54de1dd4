//! # Converter Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Pure domain types (CurrencyCode, Rate, CurrencyRegime, RateDynamics)
//! - `ports/` - Trait definitions that transport adapters must implement
//! - `dto/` - Wire shapes of the upstream exchange-rate API
//! - `error/` - Gateway and converter error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod outcome;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    BASE_CURRENCY, CurrencyCode, CurrencyRegime, DATE_LONG, DATE_SHORT, Rate, RateDynamics,
    RateSeries, is_valid_currency_code, parse_date,
};
pub use dto::{CurrencyDto, RateDto, RatePointDto};
pub use error::{ConverterError, ErrorKind, GatewayError};
pub use outcome::Outcome;
pub use ports::{QueryParams, RateTransport};
