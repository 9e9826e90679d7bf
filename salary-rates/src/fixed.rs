use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use salary_core::{ExchangeRate, RateProvider, RateSource};

/// Serves one configured rate, reported as a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRateProvider {
    rate: Decimal,
}

impl FixedRateProvider {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }
}

#[async_trait]
impl RateProvider for FixedRateProvider {
    async fn usd_to_cop(&self) -> ExchangeRate {
        ExchangeRate {
            rate: self.rate,
            last_updated: Utc::now(),
            source: RateSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[tokio::test]
    async fn always_returns_configured_rate_as_fallback() {
        let provider = FixedRateProvider::new(dec!(3950.5));

        let first = provider.usd_to_cop().await;
        let second = provider.usd_to_cop().await;

        assert_eq!(first.rate, dec!(3950.5));
        assert_eq!(first.source, RateSource::Fallback);
        assert_eq!(second.rate, first.rate);
    }
}
