//! Domain models for the currency converter.

pub mod currency;
pub mod date;
pub mod rate;
pub mod regime;

pub use currency::{BASE_CURRENCY, CurrencyCode, is_valid_currency_code};
pub use date::{DATE_LONG, DATE_SHORT, parse_date};
pub use rate::Rate;
pub use regime::{CurrencyRegime, RateDynamics, RateSeries};
