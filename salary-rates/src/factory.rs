use async_trait::async_trait;
use rust_decimal::Decimal;
use salary_core::{RateConfig, RateError, RateProvider, RateProviderFactory};
use tracing::info;

use crate::{FixedRateProvider, OpenErApiProvider};

/// [`RateProviderFactory`] for the live `"open-er-api"` backend.
pub struct OpenErApiFactory;

#[async_trait]
impl RateProviderFactory for OpenErApiFactory {
    fn backend_name(&self) -> &'static str {
        "open-er-api"
    }

    async fn create(
        &self,
        config: &RateConfig,
    ) -> Result<Box<dyn RateProvider>, RateError> {
        if config.endpoint.trim().is_empty() {
            return Err(RateError::Configuration(
                "open-er-api backend requires an endpoint".to_string(),
            ));
        }
        info!(
            endpoint = %config.endpoint,
            ttl_secs = config.cache_ttl_secs,
            "Using live exchange-rate backend"
        );
        Ok(Box::new(OpenErApiProvider::new(config)?))
    }
}

/// [`RateProviderFactory`] for the offline `"fixed"` backend.
pub struct FixedRateFactory;

#[async_trait]
impl RateProviderFactory for FixedRateFactory {
    fn backend_name(&self) -> &'static str {
        "fixed"
    }

    async fn create(
        &self,
        config: &RateConfig,
    ) -> Result<Box<dyn RateProvider>, RateError> {
        if config.fallback_rate <= Decimal::ZERO {
            return Err(RateError::Configuration(format!(
                "fixed backend requires a positive rate, got {}",
                config.fallback_rate
            )));
        }
        info!(rate = %config.fallback_rate, "Using fixed exchange rate");
        Ok(Box::new(FixedRateProvider::new(config.fallback_rate)))
    }
}
