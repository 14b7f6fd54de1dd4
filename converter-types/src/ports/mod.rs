//! Port traits (interfaces for adapters).
//!
//! The converter depends on these traits, not on a concrete HTTP client.

mod transport;

pub use transport::{QueryParams, RateTransport};
