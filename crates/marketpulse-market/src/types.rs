use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Provider response for the batched daily-bars endpoint: a wide layout
/// keyed by ticker symbol, one bar record per trading day.
#[derive(Debug, Deserialize)]
pub struct DailyBarsResponse {
    #[serde(default)]
    pub bars: HashMap<String, Vec<BarRecord>>,
}

/// One raw bar as returned by the provider. The timestamp keeps whatever
/// precision the provider sent; it is truncated to a calendar date during
/// reshaping.
#[derive(Debug, Clone, Deserialize)]
pub struct BarRecord {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Provider response for the per-ticker fundamentals lookup. Every metric
/// is independently optional; an absent field is a null metric, not an
/// error.
#[derive(Debug, Clone, Deserialize)]
pub struct FundamentalsResponse {
    #[serde(rename = "marketCap")]
    pub market_cap: Option<f64>,
    #[serde(rename = "trailingPE")]
    pub pe_ratio: Option<f64>,
    #[serde(rename = "dividendYield")]
    pub dividend_yield: Option<f64>,
    #[serde(rename = "trailingEps")]
    pub eps: Option<f64>,
}

/// One row of the long-format stock table: one (ticker, trading day) pair.
/// Field order is the canonical CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: u64,
    #[serde(rename = "Ticker")]
    pub ticker: String,
}

/// Current-time fundamentals for one ticker, broadcast onto every bar of
/// that ticker in the enriched variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FundamentalsSnapshot {
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub eps: Option<f64>,
}

impl From<FundamentalsResponse> for FundamentalsSnapshot {
    fn from(r: FundamentalsResponse) -> Self {
        Self {
            market_cap: r.market_cap,
            pe_ratio: r.pe_ratio,
            dividend_yield: r.dividend_yield,
            eps: r.eps,
        }
    }
}

/// A price bar joined with its ticker's fundamentals snapshot. Field order
/// is the canonical CSV column order of the enriched export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBar {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: u64,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Market Cap")]
    pub market_cap: Option<f64>,
    #[serde(rename = "P/E Ratio")]
    pub pe_ratio: Option<f64>,
    #[serde(rename = "Dividend Yield")]
    pub dividend_yield: Option<f64>,
    #[serde(rename = "EPS")]
    pub eps: Option<f64>,
}

impl EnrichedBar {
    #[must_use]
    pub fn join(bar: PriceBar, fundamentals: &FundamentalsSnapshot) -> Self {
        Self {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            ticker: bar.ticker,
            market_cap: fundamentals.market_cap,
            pe_ratio: fundamentals.pe_ratio,
            dividend_yield: fundamentals.dividend_yield,
            eps: fundamentals.eps,
        }
    }
}
