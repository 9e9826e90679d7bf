use std::sync::Arc;

use anyhow::{Context, Result};
use salary_core::RateProviderRegistry;
use salary_rates::{FixedRateFactory, OpenErApiFactory};
use tracing::info;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Registry with every exchange-rate backend this server ships.
pub fn build_registry() -> RateProviderRegistry {
    let mut registry = RateProviderRegistry::new();
    registry.register(Box::new(OpenErApiFactory));
    registry.register(Box::new(FixedRateFactory));
    registry
}

/// Validates the tax constants and creates the configured rate provider.
pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let constants = config
        .tax_constants()
        .context("Failed to load tax constants")?;
    info!(
        year = constants.year,
        uvt = %constants.uvt,
        smlmv = %constants.smlmv,
        "Loaded tax constants"
    );

    let provider = build_registry()
        .create(&config.rates)
        .await
        .with_context(|| format!("Failed to create '{}' rate provider", config.rates.backend))?;

    Ok(AppState::new(constants, Arc::from(provider)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use salary_core::RateSource;

    use super::*;

    #[test]
    fn registry_offers_both_backends() {
        assert_eq!(build_registry().available_backends(), vec!["fixed", "open-er-api"]);
    }

    #[tokio::test]
    async fn builds_state_with_fixed_backend() {
        let config = ServerConfig::from_toml("[rates]\nbackend = \"fixed\"\nfallback_rate = 4100").unwrap();

        let state = build_state(&config).await.unwrap();
        let rate = state.rates.usd_to_cop().await;

        assert_eq!(rate.rate, dec!(4100));
        assert_eq!(rate.source, RateSource::Fallback);
        assert_eq!(state.constants.year, 2026);
    }

    #[tokio::test]
    async fn unknown_backend_fails_startup() {
        let config = ServerConfig::from_toml("[rates]\nbackend = \"banrep\"").unwrap();

        let err = build_state(&config).await.err().unwrap();

        assert!(format!("{err:#}").contains("unknown backend 'banrep'"));
    }

    #[tokio::test]
    async fn invalid_tax_constants_fail_startup() {
        let config = ServerConfig::from_toml("[tax]\nsmlmv = -1").unwrap();

        let err = build_state(&config).await.err().unwrap();

        assert!(format!("{err:#}").contains("SMLMV must be positive"));
    }
}
