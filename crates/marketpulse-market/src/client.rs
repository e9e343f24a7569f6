//! HTTP client for the market-data provider.
//!
//! Wraps `reqwest` with provider-specific error handling and typed response
//! deserialization. The provider exposes two endpoints: a batched daily-bars
//! query grouped by ticker, and a per-ticker fundamentals lookup. Both check
//! the `"status"` field in the JSON envelope and surface provider-level
//! errors as [`FetchError::Provider`].

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::types::{DailyBarsResponse, FundamentalsResponse};

const DEFAULT_BASE_URL: &str = "https://data.marketpulse.dev/";

/// Client for the market-data provider REST API.
///
/// Use [`MarketClient::new`] for production or
/// [`MarketClient::with_base_url`] to point at a mock server in tests.
pub struct MarketClient {
    client: Client,
    base_url: Url,
}

impl MarketClient {
    /// Creates a new client pointed at the production provider.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::Provider`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("marketpulse/0.1 (batch-etl)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joined paths resolve under the root rather than replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| FetchError::Provider(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Fetches daily OHLCV bars for all `tickers` over `[start, end]` in one
    /// batched request.
    ///
    /// The response is a wide layout keyed by ticker; a ticker the provider
    /// has no data for is simply absent from the map.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Provider`] if the provider returns an error status.
    /// - [`FetchError::Http`] on network failure or non-2xx HTTP status.
    /// - [`FetchError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn daily_bars(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailyBarsResponse, FetchError> {
        let symbols = tickers.join(",");
        let url = self.build_url(
            "v1/bars",
            &[
                ("symbols", symbols.as_str()),
                ("start", &start.format("%Y-%m-%d").to_string()),
                ("end", &end.format("%Y-%m-%d").to_string()),
                ("interval", "1d"),
                ("group_by", "ticker"),
            ],
        )?;
        let body = self.request_json(&url).await?;
        Self::check_provider_error(&body)?;

        serde_json::from_value(body).map_err(|e| FetchError::Deserialize {
            context: format!("daily_bars(symbols={symbols})"),
            source: e,
        })
    }

    /// Fetches the current fundamentals snapshot for one ticker.
    ///
    /// Every metric in the response is independently optional; the provider
    /// omits metrics it does not track for a symbol.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Provider`] if the provider returns an error status.
    /// - [`FetchError::Http`] on network failure or non-2xx HTTP status.
    /// - [`FetchError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fundamentals(&self, ticker: &str) -> Result<FundamentalsResponse, FetchError> {
        let url = self.build_url("v1/fundamentals", &[("symbol", ticker)])?;
        let body = self.request_json(&url).await?;
        Self::check_provider_error(&body)?;

        serde_json::from_value(body).map_err(|e| FetchError::Deserialize {
            context: format!("fundamentals(symbol={ticker})"),
            source: e,
        })
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| FetchError::Provider(format!("invalid endpoint path '{path}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks the top-level `"status"` field and returns an error if it
    /// indicates failure.
    fn check_provider_error(body: &serde_json::Value) -> Result<(), FetchError> {
        if body.get("status").and_then(serde_json::Value::as_str) == Some("error") {
            let msg = body
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(FetchError::Provider(msg));
        }
        Ok(())
    }
}
