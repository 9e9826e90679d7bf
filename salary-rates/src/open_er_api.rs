use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use salary_core::{ExchangeRate, RateConfig, RateError, RateProvider, RateSource};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Reasons a fetch produced no usable rate. Never leaves this module.
#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream reported result '{0}'")]
    Unsuccessful(String),

    #[error("response has no COP rate")]
    MissingCop,

    #[error("COP rate must be positive, got {0}")]
    NonPositive(Decimal),
}

/// The subset of the `/v6/latest/USD` payload that is read.
#[derive(Debug, Deserialize)]
struct LatestRates {
    result: String,
    #[serde(default)]
    rates: HashMap<String, Decimal>,
}

impl LatestRates {
    fn cop_rate(&self) -> Result<Decimal, FetchError> {
        if self.result != "success" {
            return Err(FetchError::Unsuccessful(self.result.clone()));
        }
        let rate = *self.rates.get("COP").ok_or(FetchError::MissingCop)?;
        if rate <= Decimal::ZERO {
            return Err(FetchError::NonPositive(rate));
        }
        Ok(rate)
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedRate {
    rate: Decimal,
    fetched_at: DateTime<Utc>,
}

/// Live USD to COP rate from open.er-api.com.
///
/// Resolution order on every call:
/// 1. A cached rate younger than the TTL is served as [`RateSource::Cache`].
/// 2. Otherwise the endpoint is fetched; a valid rate replaces the cache and
///    is served as [`RateSource::Api`].
/// 3. If the fetch fails, a stale cached rate is served as [`RateSource::Cache`].
/// 4. With nothing cached, the configured fallback is served as
///    [`RateSource::Fallback`].
///
/// The cache lock is held while fetching, so concurrent callers with an
/// expired cache wait for one upstream request.
pub struct OpenErApiProvider {
    client: reqwest::Client,
    endpoint: String,
    fallback_rate: Decimal,
    ttl: TimeDelta,
    cache: Mutex<Option<CachedRate>>,
}

impl OpenErApiProvider {
    /// Builds the provider and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &RateConfig) -> Result<Self, RateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RateError::Client(e.to_string()))?;

        let ttl = i64::try_from(config.cache_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            fallback_rate: config.fallback_rate,
            ttl,
            cache: Mutex::new(None),
        })
    }

    async fn fetch(&self) -> Result<Decimal, FetchError> {
        let payload: LatestRates = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        payload.cop_rate()
    }
}

#[async_trait]
impl RateProvider for OpenErApiProvider {
    async fn usd_to_cop(&self) -> ExchangeRate {
        let mut cache = self.cache.lock().await;
        let now = Utc::now();

        if let Some(fresh) = (*cache).filter(|cached| now - cached.fetched_at < self.ttl) {
            return ExchangeRate {
                rate: fresh.rate,
                last_updated: fresh.fetched_at,
                source: RateSource::Cache,
            };
        }

        match self.fetch().await {
            Ok(rate) => {
                debug!(%rate, endpoint = %self.endpoint, "Fetched USD/COP rate");
                *cache = Some(CachedRate {
                    rate,
                    fetched_at: now,
                });
                ExchangeRate {
                    rate,
                    last_updated: now,
                    source: RateSource::Api,
                }
            }
            Err(error) => match *cache {
                Some(stale) => {
                    warn!(
                        %error,
                        rate = %stale.rate,
                        fetched_at = %stale.fetched_at,
                        "Exchange rate fetch failed; serving stale cached rate"
                    );
                    ExchangeRate {
                        rate: stale.rate,
                        last_updated: stale.fetched_at,
                        source: RateSource::Cache,
                    }
                }
                None => {
                    warn!(
                        %error,
                        rate = %self.fallback_rate,
                        "Exchange rate fetch failed; serving fallback rate"
                    );
                    ExchangeRate {
                        rate: self.fallback_rate,
                        last_updated: now,
                        source: RateSource::Fallback,
                    }
                }
            },
        }
    }
}
