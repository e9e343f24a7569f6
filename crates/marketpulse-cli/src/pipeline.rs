//! Pipeline drivers for the CLI.
//!
//! Each driver catches its pipeline's fatal error at the top level, logs
//! it, and reports "no data" so the sibling pipeline still runs. The
//! combined result maps to the process exit code.

use chrono::NaiveDate;
use marketpulse_core::RunConfig;
use marketpulse_market::{fetch_enriched_stock_data, fetch_stock_data, MarketClient};
use marketpulse_news::{combine_sources, load_source, source_spec, LoadError};
use marketpulse_report::{write_csv, ChartSink};
use marketpulse_sentiment::{aggregate_by_source, score_items};

/// Aggregate result of a run, derived from which requested pipelines
/// produced data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunOutcome {
    /// Every requested pipeline produced rows.
    Success,
    /// Some requested pipelines produced rows, others none.
    Partial,
    /// No requested pipeline produced any rows.
    NoData,
}

/// Map per-pipeline results (`None` = not requested) to a run outcome.
pub(crate) fn outcome(stocks: Option<bool>, news: Option<bool>) -> RunOutcome {
    let requested: Vec<bool> = [stocks, news].into_iter().flatten().collect();
    let produced = requested.iter().filter(|&&b| b).count();
    if produced == requested.len() {
        RunOutcome::Success
    } else if produced == 0 {
        RunOutcome::NoData
    } else {
        RunOutcome::Partial
    }
}

/// Run the stock ingestion pipeline end to end: fetch, reshape, chart,
/// export, summarize. Returns whether any rows were produced.
pub(crate) async fn run_stock_pipeline(config: &RunConfig, sink: &mut dyn ChartSink) -> bool {
    let client = match build_client(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "cannot construct market client");
            return false;
        }
    };

    if config.fundamentals {
        let rows = match fetch_enriched_stock_data(&client, &config.tickers, config.start, config.end)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "stock fetch failed; skipping stock pipeline");
                return false;
            }
        };
        if rows.is_empty() {
            tracing::warn!("no stock data obtained for any requested ticker");
            return false;
        }

        render_price_charts(
            sink,
            rows.iter().map(|r| (r.ticker.as_str(), r.date, r.close)),
        );
        log_enriched_summary(&rows);

        if let Err(e) = write_csv(&config.stock_out, &rows) {
            tracing::error!(error = %e, "stock export failed");
            return false;
        }
        true
    } else {
        let rows =
            match fetch_stock_data(&client, &config.tickers, config.start, config.end).await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::error!(error = %e, "stock fetch failed; skipping stock pipeline");
                    return false;
                }
            };
        if rows.is_empty() {
            tracing::warn!("no stock data obtained for any requested ticker");
            return false;
        }

        render_price_charts(
            sink,
            rows.iter().map(|r| (r.ticker.as_str(), r.date, r.close)),
        );
        tracing::info!(rows = rows.len(), "stock table ready");

        if let Err(e) = write_csv(&config.stock_out, &rows) {
            tracing::error!(error = %e, "stock export failed");
            return false;
        }
        true
    }
}

/// Run the news pipeline end to end: load, normalize, union, clean, score,
/// aggregate, chart, export. Returns whether any rows were produced.
pub(crate) fn run_news_pipeline(config: &RunConfig, sink: &mut dyn ChartSink) -> bool {
    let mut loaded = Vec::new();
    for source in &config.news_sources {
        let Some(spec) = source_spec(&source.name) else {
            let err = LoadError::UnknownSource(source.name.clone());
            tracing::error!(error = %err, "skipping news pipeline");
            return false;
        };
        match load_source(&source.path, spec) {
            Ok(rows) => {
                tracing::info!(source = %source.name, rows = rows.len(), "loaded news source");
                loaded.push(rows);
            }
            Err(e) => {
                tracing::error!(source = %source.name, error = %e, "news load failed; skipping news pipeline");
                return false;
            }
        }
    }

    let mut items = combine_sources(loaded);
    if items.is_empty() {
        tracing::warn!("no news rows after cleaning");
        return false;
    }

    score_items(&mut items);
    let aggregates = aggregate_by_source(&items);
    for aggregate in &aggregates {
        tracing::info!(
            source = %aggregate.source,
            mean_polarity = aggregate.mean_polarity,
            items = aggregate.item_count,
            "mean sentiment by source"
        );
    }

    let bars: Vec<(String, f64)> = aggregates
        .iter()
        .map(|a| (a.source.clone(), a.mean_polarity))
        .collect();
    sink.sentiment_bars(&bars);

    if let Err(e) = write_csv(&config.news_out, &items) {
        tracing::error!(error = %e, "news export failed");
        return false;
    }
    true
}

fn build_client(config: &RunConfig) -> Result<MarketClient, marketpulse_market::FetchError> {
    match &config.provider_url {
        Some(url) => MarketClient::with_base_url(config.request_timeout_secs, url),
        None => MarketClient::new(config.request_timeout_secs),
    }
}

/// Group rows by ticker (first-appearance order) and render one price
/// series per ticker.
fn render_price_charts<'a>(
    sink: &mut dyn ChartSink,
    rows: impl Iterator<Item = (&'a str, NaiveDate, f64)>,
) {
    for (ticker, points) in group_price_points(rows) {
        sink.price_series(&ticker, &points);
    }
}

fn group_price_points<'a>(
    rows: impl Iterator<Item = (&'a str, NaiveDate, f64)>,
) -> Vec<(String, Vec<(NaiveDate, f64)>)> {
    let mut groups: Vec<(String, Vec<(NaiveDate, f64)>)> = Vec::new();
    for (ticker, date, close) in rows {
        match groups.iter_mut().find(|(t, _)| t.as_str() == ticker) {
            Some((_, points)) => points.push((date, close)),
            None => groups.push((ticker.to_string(), vec![(date, close)])),
        }
    }
    groups
}

/// Mirror the original run's missing-data report: per-metric null counts
/// over the enriched table.
fn log_enriched_summary(rows: &[marketpulse_market::EnrichedBar]) {
    let nulls = |f: fn(&marketpulse_market::EnrichedBar) -> Option<f64>| {
        rows.iter().filter(|r| f(r).is_none()).count()
    };
    tracing::info!(
        rows = rows.len(),
        market_cap_nulls = nulls(|r| r.market_cap),
        pe_ratio_nulls = nulls(|r| r.pe_ratio),
        dividend_yield_nulls = nulls(|r| r.dividend_yield),
        eps_nulls = nulls(|r| r.eps),
        "enriched stock table ready"
    );
}
