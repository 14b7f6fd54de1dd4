//! Exchange Rates Library over the National Bank exchange-rate API
//!
//! All rates are quoted against the base currency (BYN). Cross rates are
//! derived through it: an amount is converted into BYN with the source
//! currency's rate, then out of BYN with the target currency's rate.
//!
//! Rate dynamics are assembled across every currency *regime* that overlaps
//! the requested window, since the upstream source may change a currency's
//! internal identifier and scale mid-history. Each regime is queried
//! separately and its points are rescaled before merging.
//!
//! # Example
//! ```ignore
//! use exchange_rates::CurrencyConverter;
//!
//! let converter = CurrencyConverter::new(transport);
//! let outcome = converter.convert(100.0, "usd", "eur", Some("2022-02-14")).await;
//! match outcome.error {
//!     None => println!("{:.4}", outcome.value),
//!     Some(err) => eprintln!("{err}"),
//! }
//! ```

mod converter;


pub use converter::{CurrencyConverter, MAX_PERIOD_DAYS};
