//! Batched fetch and wide-to-long reshape for the stock pipeline.
//!
//! Per-ticker absence is a partial result, not a failure: missing tickers
//! are logged and skipped so one unknown symbol never aborts the batch.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::client::MarketClient;
use crate::error::FetchError;
use crate::types::{DailyBarsResponse, EnrichedBar, FundamentalsSnapshot, PriceBar};

/// Fetch daily bars for `tickers` over `[start, end]` and reshape into one
/// long-format table tagged with a ticker column.
///
/// Output ordering: request order of tickers, then date ascending. Bars the
/// provider returned outside the requested interval are dropped.
///
/// # Errors
///
/// Returns [`FetchError`] if the provider is unreachable or the response is
/// malformed as a whole. A single absent ticker yields zero rows for that
/// ticker and a logged notice.
pub async fn fetch_stock_data(
    client: &MarketClient,
    tickers: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<PriceBar>, FetchError> {
    let response = client.daily_bars(tickers, start, end).await?;
    Ok(reshape_bars(response, tickers, start, end))
}

/// Fetch daily bars plus a per-ticker fundamentals snapshot, broadcast onto
/// every bar of that ticker.
///
/// Fundamentals are only requested for tickers that produced at least one
/// bar. A failed fundamentals lookup nulls that ticker's metric columns and
/// logs a warning; it does not abort the run.
///
/// # Errors
///
/// Returns [`FetchError`] under the same conditions as [`fetch_stock_data`].
pub async fn fetch_enriched_stock_data(
    client: &MarketClient,
    tickers: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<EnrichedBar>, FetchError> {
    let bars = fetch_stock_data(client, tickers, start, end).await?;

    let mut snapshots: HashMap<String, FundamentalsSnapshot> = HashMap::new();
    for ticker in tickers {
        if !bars.iter().any(|b| &b.ticker == ticker) {
            continue;
        }
        let snapshot = match client.fundamentals(ticker).await {
            Ok(response) => FundamentalsSnapshot::from(response),
            Err(e) => {
                tracing::warn!(
                    ticker = %ticker,
                    error = %e,
                    "fundamentals lookup failed; metric columns will be null"
                );
                FundamentalsSnapshot::default()
            }
        };
        snapshots.insert(ticker.clone(), snapshot);
    }

    Ok(bars
        .into_iter()
        .map(|bar| {
            let snapshot = snapshots.get(&bar.ticker).cloned().unwrap_or_default();
            EnrichedBar::join(bar, &snapshot)
        })
        .collect())
}

/// Decompose the wide provider response into long-format rows.
///
/// Only requested tickers are consulted, in request order; extra keys the
/// provider sent are ignored. Bars with unparsable timestamps are dropped
/// with a warning, and remaining bars are filtered to `[start, end]` and
/// sorted by date within each ticker.
pub(crate) fn reshape_bars(
    response: DailyBarsResponse,
    tickers: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<PriceBar> {
    let mut bars = response.bars;
    let mut out = Vec::new();

    for ticker in tickers {
        let Some(records) = bars.remove(ticker) else {
            tracing::info!(ticker = %ticker, "no data returned for ticker; skipping");
            continue;
        };

        let mut ticker_rows: Vec<PriceBar> = records
            .into_iter()
            .filter_map(|record| {
                let Some(date) = parse_bar_date(&record.date) else {
                    tracing::warn!(
                        ticker = %ticker,
                        raw = %record.date,
                        "unparsable bar timestamp; dropping row"
                    );
                    return None;
                };
                if date < start || date > end {
                    return None;
                }
                Some(PriceBar {
                    date,
                    open: record.open,
                    high: record.high,
                    low: record.low,
                    close: record.close,
                    volume: record.volume,
                    ticker: ticker.clone(),
                })
            })
            .collect();

        ticker_rows.sort_by_key(|b| b.date);
        out.extend(ticker_rows);
    }

    out
}

/// Truncate a provider timestamp to a calendar date.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`, or a
/// bare `YYYY-MM-DD`. Returns `None` for anything else.
fn parse_bar_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
