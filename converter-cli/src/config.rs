//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use converter_client::{DEFAULT_BASE_URL, GatewayConfig};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("NBRB_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let connect_timeout = secs(&lookup, "NBRB_CONNECT_TIMEOUT_SECS", 2)?;
        let read_timeout = secs(&lookup, "NBRB_READ_TIMEOUT_SECS", 5)?;

        Ok(Self {
            api_url,
            connect_timeout,
            read_timeout,
        })
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            base_url: self.api_url.clone(),
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
        }
    }
}

fn secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> anyhow::Result<Duration> {
    let secs = match lookup(key) {
        Some(value) => value
            .parse()
            .map_err(|_| anyhow::anyhow!("{key} must be a whole number of seconds, got {value:?}"))?,
        None => default,
    };
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_BASE_URL);
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.gateway_config(), GatewayConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("NBRB_API_URL", "http://localhost:8080"),
            ("NBRB_READ_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.read_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_timeout() {
        let result = Config::from_lookup(lookup(&[("NBRB_CONNECT_TIMEOUT_SECS", "soon")]));
        assert!(result.is_err());
    }
}
