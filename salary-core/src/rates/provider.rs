use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ExchangeRate;

/// Default upstream endpoint for the live backend.
pub const DEFAULT_ENDPOINT: &str = "https://open.er-api.com/v6/latest/USD";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Client error: {0}")]
    Client(String),
}

/// Source of the USD to COP rate shown to users.
///
/// Implementations resolve upstream failures themselves (cached or fallback
/// values), so a call always produces a rate.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn usd_to_cop(&self) -> ExchangeRate;
}

/// Backend-agnostic provider configuration.
///
/// `backend` must match the [`RateProviderFactory::backend_name`] of a
/// registered factory. The remaining fields are read by the backends that
/// need them.
///
/// | backend       | uses |
/// |---------------|------|
/// | `open-er-api` | every field |
/// | `fixed`       | `fallback_rate` |
///
/// [`RateProviderFactory::backend_name`]: super::RateProviderFactory::backend_name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Lowercase identifier matching a registered factory.
    pub backend: String,
    /// URL returning `{"result": "success", "rates": {"COP": ...}}`.
    pub endpoint: String,
    /// Rate served when neither the upstream nor the cache has a value.
    pub fallback_rate: Decimal,
    /// How long a fetched rate is served without refetching.
    pub cache_ttl_secs: u64,
    /// Upstream request timeout.
    pub timeout_secs: u64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            backend: "open-er-api".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            fallback_rate: Decimal::from(4_000),
            cache_ttl_secs: 60 * 60,
            timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_config_targets_open_er_api() {
        let config = RateConfig::default();

        assert_eq!(config.backend, "open-er-api");
        assert_eq!(config.endpoint, "https://open.er-api.com/v6/latest/USD");
        assert_eq!(config.fallback_rate, dec!(4000));
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: RateConfig =
            serde_json::from_str(r#"{"backend": "fixed", "fallback_rate": 3900}"#).unwrap();

        assert_eq!(config.backend, "fixed");
        assert_eq!(config.fallback_rate, dec!(3900));
        assert_eq!(config.cache_ttl_secs, 3600);
    }
}
