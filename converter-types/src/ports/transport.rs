//! Exchange-rate transport port.
//!
//! This trait defines how the converter reaches the upstream API.
//! Implementations can be HTTP clients, in-memory mocks, etc.

use crate::error::GatewayError;

/// Query string pairs appended to a request.
pub type QueryParams = Vec<(&'static str, String)>;

/// Port trait for the upstream exchange-rate API.
#[async_trait::async_trait]
pub trait RateTransport: Send + Sync {
    /// Issues a GET for `path` (relative to the API root, e.g. `/currencies`)
    /// and returns the decoded JSON body.
    ///
    /// Every failure mode (network, non-2xx status, non-JSON body) must be
    /// reported as a [`GatewayError`]; implementations never panic.
    async fn get_json(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<serde_json::Value, GatewayError>;
}
