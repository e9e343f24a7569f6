//! Chart rendering seam.
//!
//! Rendering itself belongs to an external charting collaborator; the
//! pipelines only decide what to plot. [`LogChartSink`] is the default
//! implementation and summarizes each chart to the log.

use chrono::NaiveDate;

/// Receiver for the charts a run produces: one close-price line per ticker
/// and one mean-sentiment bar per source.
pub trait ChartSink {
    /// Render a close-price-over-time line chart for one ticker.
    fn price_series(&mut self, ticker: &str, points: &[(NaiveDate, f64)]);

    /// Render a mean-sentiment bar chart, one bar per source.
    fn sentiment_bars(&mut self, bars: &[(String, f64)]);
}

/// Sink that summarizes each chart via `tracing` instead of drawing it.
#[derive(Debug, Default)]
pub struct LogChartSink;

impl ChartSink for LogChartSink {
    fn price_series(&mut self, ticker: &str, points: &[(NaiveDate, f64)]) {
        let (first, last) = match (points.first(), points.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => {
                tracing::info!(ticker, "price chart skipped: no points");
                return;
            }
        };
        tracing::info!(
            ticker,
            points = points.len(),
            from = %first.0,
            to = %last.0,
            first_close = first.1,
            last_close = last.1,
            "price chart"
        );
    }

    fn sentiment_bars(&mut self, bars: &[(String, f64)]) {
        for (source, mean) in bars {
            tracing::info!(source = %source, mean_polarity = mean, "sentiment bar");
        }
    }
}
