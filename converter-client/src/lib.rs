//! # Converter Client
//!
//! HTTP gateway to the National Bank exchange-rate API.
//!
//! [`HttpGateway`] implements the [`RateTransport`] port: it issues GET
//! requests with bounded connect/read timeouts and funnels every failure
//! (network, non-2xx status, non-JSON body) into a [`GatewayError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use converter_types::{GatewayError, QueryParams, RateTransport};

/// Public endpoint of the National Bank of the Republic of Belarus.
pub const DEFAULT_BASE_URL: &str = "https://api.nbrb.by/exrates";

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for [`HttpGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Exchange-rate API gateway.
pub struct HttpGateway {
    base_url: String,
    http: Client,
}

impl HttpGateway {
    /// Creates a gateway with the default endpoint and timeouts.
    pub fn new() -> Result<Self, GatewayError> {
        Self::with_config(GatewayConfig::default())
    }

    pub fn with_config(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()
            .map_err(GatewayError::from_reqwest)?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<serde_json::Value, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?params, "GET");
        self.http
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl RateTransport for HttpGateway {
    async fn get_json(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<serde_json::Value, GatewayError> {
        self.request(path, params)
            .await
            .map_err(GatewayError::from_reqwest)
    }
}

/// Maps a `reqwest` failure onto the gateway error taxonomy.
trait FromReqwest {
    fn from_reqwest(err: reqwest::Error) -> Self;
}

impl FromReqwest for GatewayError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            GatewayError::Timeout(message)
        } else if err.is_connect() {
            GatewayError::Connect(message)
        } else if let Some(status) = err.status() {
            GatewayError::Status {
                status: status.as_u16(),
                message,
            }
        } else if err.is_decode() {
            GatewayError::Decode(message)
        } else {
            GatewayError::Request(message)
        }
    }
}
