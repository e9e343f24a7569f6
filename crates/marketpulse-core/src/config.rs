use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("ticker list is empty")]
    EmptyTickers,

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

/// One news source file for a run: the registry name that selects its
/// column mapping, and the path to its CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSourceConfig {
    pub name: String,
    pub path: PathBuf,
}

/// Resolved parameters for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Ticker symbols to fetch, in request order.
    pub tickers: Vec<String>,
    /// First calendar day of the fetch interval (inclusive).
    pub start: NaiveDate,
    /// Last calendar day of the fetch interval (inclusive).
    pub end: NaiveDate,
    /// News source files to load, in union order.
    pub news_sources: Vec<NewsSourceConfig>,
    /// Destination for the stock CSV export.
    pub stock_out: PathBuf,
    /// Destination for the news CSV export.
    pub news_out: PathBuf,
    /// Whether to enrich price bars with per-ticker fundamentals.
    pub fundamentals: bool,
    /// Override for the market-data provider base URL, if set.
    pub provider_url: Option<String>,
    /// Per-request timeout for provider calls, in seconds.
    pub request_timeout_secs: u64,
}

/// Load run configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is malformed or the resolved config is
/// invalid (empty tickers, inverted date range).
pub fn load_run_config() -> Result<RunConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_run_config_from_env()
}

/// Load run configuration from environment variables already in the process.
///
/// Unlike [`load_run_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is malformed or the resolved config is
/// invalid.
pub fn load_run_config_from_env() -> Result<RunConfig, ConfigError> {
    build_run_config(|key| std::env::var(key))
}

/// Build run configuration using the provided env-var lookup function.
///
/// The core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup.
fn build_run_config<F>(lookup: F) -> Result<RunConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_date = |var: &str, default: &str| -> Result<NaiveDate, ConfigError> {
        let raw = or_default(var, default);
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got '{other}'"),
            }),
        }
    };

    let tickers = parse_ticker_list(&or_default(
        "MARKETPULSE_TICKERS",
        "AAPL,MSFT,GOOGL,AMZN,TSLA",
    ));

    let start = parse_date("MARKETPULSE_START", "2018-03-20")?;
    let end = parse_date("MARKETPULSE_END", "2020-07-18")?;

    let news_sources = parse_news_sources(&or_default(
        "MARKETPULSE_NEWS_SOURCES",
        "Guardian=./news/guardian_headlines.csv,Reuters=./news/reuters_headlines.csv",
    ))?;

    let stock_out = PathBuf::from(or_default(
        "MARKETPULSE_STOCK_OUT",
        "historical_stock_data.csv",
    ));
    let news_out = PathBuf::from(or_default("MARKETPULSE_NEWS_OUT", "news_data_combined.csv"));

    let fundamentals = parse_bool("MARKETPULSE_FUNDAMENTALS", "false")?;
    let provider_url = lookup("MARKETPULSE_PROVIDER_URL").ok();
    let request_timeout_secs = parse_u64("MARKETPULSE_REQUEST_TIMEOUT_SECS", "30")?;

    let config = RunConfig {
        tickers,
        start,
        end,
        news_sources,
        stock_out,
        news_out,
        fundamentals,
        provider_url,
        request_timeout_secs,
    };
    config.validate()?;
    Ok(config)
}

impl RunConfig {
    /// Check cross-field invariants: a non-empty ticker list and an
    /// ordered date interval. Callers that mutate a loaded config (e.g.
    /// CLI flag overrides) should re-validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an invariant is violated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::EmptyTickers);
        }
        if self.start > self.end {
            return Err(ConfigError::InvalidDateRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Split a comma-separated ticker list, trimming and uppercasing each
/// symbol and dropping empty segments.
fn parse_ticker_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// Parse a `Name=path,Name=path` news source list.
fn parse_news_sources(raw: &str) -> Result<Vec<NewsSourceConfig>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let (name, path) =
                entry
                    .split_once('=')
                    .ok_or_else(|| ConfigError::InvalidEnvVar {
                        var: "MARKETPULSE_NEWS_SOURCES".to_string(),
                        reason: format!("expected Name=path, got '{entry}'"),
                    })?;
            Ok(NewsSourceConfig {
                name: name.trim().to_string(),
                path: PathBuf::from(path.trim()),
            })
        })
        .collect()
}
