//! Integration tests for `MarketClient` using wiremock HTTP mocks.

use chrono::NaiveDate;
use marketpulse_market::{fetch_enriched_stock_data, fetch_stock_data, FetchError, MarketClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> MarketClient {
    MarketClient::with_base_url(30, base_url).expect("client construction should not fail")
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bars_body() -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "bars": {
            "AAPL": [
                { "date": "2020-01-02T00:00:00Z", "open": 74.0, "high": 76.0,
                  "low": 73.5, "close": 75.0, "volume": 135_480_400_u64 },
                { "date": "2020-01-03T00:00:00Z", "open": 74.2, "high": 75.1,
                  "low": 74.0, "close": 74.3, "volume": 146_322_800_u64 }
            ]
        }
    })
}

#[tokio::test]
async fn fetch_returns_only_requested_tickers_with_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/bars"))
        .and(query_param("symbols", "AAPL,ZZZZ_INVALID"))
        .and(query_param("start", "2020-01-01"))
        .and(query_param("end", "2020-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bars_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tickers = vec!["AAPL".to_string(), "ZZZZ_INVALID".to_string()];
    let bars = fetch_stock_data(&client, &tickers, day(2020, 1, 1), day(2020, 1, 31))
        .await
        .expect("partial results should not be an error");

    assert_eq!(bars.len(), 2);
    assert!(bars.iter().all(|b| b.ticker == "AAPL"));
    assert_eq!(bars[0].date, day(2020, 1, 2));
    assert_eq!(bars[0].close, 75.0);
}

#[tokio::test]
async fn provider_error_status_is_fetch_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "error",
        "message": "rate limit exceeded"
    });
    Mock::given(method("GET"))
        .and(path("/v1/bars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tickers = vec!["AAPL".to_string()];
    let result = fetch_stock_data(&client, &tickers, day(2020, 1, 1), day(2020, 1, 31)).await;

    assert!(
        matches!(result, Err(FetchError::Provider(ref msg)) if msg.contains("rate limit")),
        "expected Provider error, got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/bars"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tickers = vec!["AAPL".to_string()];
    let result = fetch_stock_data(&client, &tickers, day(2020, 1, 1), day(2020, 1, 31)).await;

    assert!(matches!(result, Err(FetchError::Deserialize { .. })));
}

#[tokio::test]
async fn http_500_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/bars"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tickers = vec!["AAPL".to_string()];
    let result = fetch_stock_data(&client, &tickers, day(2020, 1, 1), day(2020, 1, 31)).await;

    assert!(matches!(result, Err(FetchError::Http(_))));
}

#[tokio::test]
async fn fundamentals_missing_metrics_map_to_null() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/bars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bars_body()))
        .mount(&server)
        .await;

    // Only marketCap and trailingEps present; P/E and dividend yield omitted.
    let fundamentals = serde_json::json!({
        "status": "ok",
        "marketCap": 1.3e12,
        "trailingEps": 12.6
    });
    Mock::given(method("GET"))
        .and(path("/v1/fundamentals"))
        .and(query_param("symbol", "AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fundamentals))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tickers = vec!["AAPL".to_string()];
    let rows = fetch_enriched_stock_data(&client, &tickers, day(2020, 1, 1), day(2020, 1, 31))
        .await
        .expect("enriched fetch should succeed");

    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.market_cap, Some(1.3e12));
        assert_eq!(row.eps, Some(12.6));
        assert_eq!(row.pe_ratio, None);
        assert_eq!(row.dividend_yield, None);
    }
}

#[tokio::test]
async fn failed_fundamentals_lookup_nulls_metrics_without_aborting() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/bars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bars_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/fundamentals"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tickers = vec!["AAPL".to_string()];
    let rows = fetch_enriched_stock_data(&client, &tickers, day(2020, 1, 1), day(2020, 1, 31))
        .await
        .expect("fundamentals failure must not abort the run");

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.market_cap.is_none()
        && r.pe_ratio.is_none()
        && r.dividend_yield.is_none()
        && r.eps.is_none()));
}
