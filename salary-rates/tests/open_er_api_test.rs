//! Live-backend behavior against a mocked upstream.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use salary_core::{RateConfig, RateProvider, RateSource};
use salary_rates::OpenErApiProvider;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RATES_PATH: &str = "/v6/latest/USD";

fn config_for(
    server: &MockServer,
    cache_ttl_secs: u64,
) -> RateConfig {
    RateConfig {
        backend: "open-er-api".to_string(),
        endpoint: format!("{}{}", server.uri(), RATES_PATH),
        fallback_rate: dec!(4000),
        cache_ttl_secs,
        timeout_secs: 5,
    }
}

fn success_body(cop: f64) -> serde_json::Value {
    json!({
        "result": "success",
        "base_code": "USD",
        "rates": { "USD": 1, "COP": cop }
    })
}

#[tokio::test]
async fn first_call_fetches_and_second_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RATES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(4123.5)))
        .expect(1)
        .mount(&server)
        .await;
    let provider = OpenErApiProvider::new(&config_for(&server, 3600)).unwrap();

    let first = provider.usd_to_cop().await;
    let second = provider.usd_to_cop().await;

    assert_eq!(first.rate, dec!(4123.5));
    assert_eq!(first.source, RateSource::Api);
    assert_eq!(second.rate, dec!(4123.5));
    assert_eq!(second.source, RateSource::Cache);
    assert_eq!(second.last_updated, first.last_updated);
}

#[tokio::test]
async fn expired_cache_is_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RATES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(4100.0)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(RATES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(4200.0)))
        .mount(&server)
        .await;
    let provider = OpenErApiProvider::new(&config_for(&server, 0)).unwrap();

    let first = provider.usd_to_cop().await;
    let second = provider.usd_to_cop().await;

    assert_eq!(first.rate, dec!(4100));
    assert_eq!(second.rate, dec!(4200));
    assert_eq!(second.source, RateSource::Api);
}

#[tokio::test]
async fn failure_without_cache_serves_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RATES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let provider = OpenErApiProvider::new(&config_for(&server, 3600)).unwrap();

    let rate = provider.usd_to_cop().await;

    assert_eq!(rate.rate, dec!(4000));
    assert_eq!(rate.source, RateSource::Fallback);
}

#[tokio::test]
async fn failure_with_stale_cache_serves_stale_rate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RATES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(3987.25)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(RATES_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let provider = OpenErApiProvider::new(&config_for(&server, 0)).unwrap();

    let fresh = provider.usd_to_cop().await;
    let stale = provider.usd_to_cop().await;

    assert_eq!(fresh.source, RateSource::Api);
    assert_eq!(stale.rate, dec!(3987.25));
    assert_eq!(stale.source, RateSource::Cache);
    assert_eq!(stale.last_updated, fresh.last_updated);
}

#[tokio::test]
async fn unsuccessful_result_is_treated_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RATES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": "error", "error-type": "unsupported-code" })),
        )
        .mount(&server)
        .await;
    let provider = OpenErApiProvider::new(&config_for(&server, 3600)).unwrap();

    let rate = provider.usd_to_cop().await;

    assert_eq!(rate.source, RateSource::Fallback);
}

#[tokio::test]
async fn missing_cop_rate_is_treated_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RATES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "rates": { "EUR": 0.92 }
        })))
        .mount(&server)
        .await;
    let provider = OpenErApiProvider::new(&config_for(&server, 3600)).unwrap();

    let rate = provider.usd_to_cop().await;

    assert_eq!(rate.rate, dec!(4000));
    assert_eq!(rate.source, RateSource::Fallback);
}

#[tokio::test]
async fn malformed_body_is_treated_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RATES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    let provider = OpenErApiProvider::new(&config_for(&server, 3600)).unwrap();

    assert_eq!(provider.usd_to_cop().await.source, RateSource::Fallback);
}
