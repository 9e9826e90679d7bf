use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a USD/COP rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// Fetched from the upstream API during this call.
    Api,
    /// Served from the in-memory cache, fresh or stale.
    Cache,
    /// Neither the API nor the cache had a value; the configured default was used.
    Fallback,
}

/// A resolved USD to COP exchange rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub rate: Decimal,
    pub last_updated: DateTime<Utc>,
    pub source: RateSource,
}
