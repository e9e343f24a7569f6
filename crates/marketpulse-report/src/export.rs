//! Delimited-text export for pipeline tables.

use std::path::Path;

use serde::Serialize;

use crate::error::ReportError;

/// Render rows as a CSV string: header row from the row type's serde
/// names, one record per line, nulls as empty fields.
///
/// # Errors
///
/// Returns [`ReportError::Csv`] if a row fails to serialize.
pub fn render_csv<T: Serialize>(rows: &[T]) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| {
        ReportError::Csv(csv::Error::from(std::io::Error::other(e.to_string())))
    })?;
    // csv::Writer only emits valid UTF-8 for string/number fields.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Serialize rows to a CSV file at `path`, overwriting any existing file.
///
/// # Errors
///
/// Returns [`ReportError::Csv`] on serialization failure or
/// [`ReportError::Io`] if the file cannot be written.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ReportError> {
    let body = render_csv(rows)?;
    std::fs::write(path, body).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote CSV export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use marketpulse_market::{EnrichedBar, PriceBar};
    use marketpulse_news::NewsItem;

    use super::*;

    fn bar(day: u32) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2020, 1, day).unwrap(),
            open: 74.0,
            high: 76.0,
            low: 73.5,
            close: 75.25,
            volume: 1000,
            ticker: "AAPL".to_string(),
        }
    }

    #[test]
    fn stock_header_matches_canonical_columns() {
        let csv = render_csv(&[bar(2)]).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "Date,Open,High,Low,Close,Volume,Ticker");
    }

    #[test]
    fn enriched_header_appends_fundamentals_columns() {
        let row = EnrichedBar::join(
            bar(2),
            &marketpulse_market::FundamentalsSnapshot {
                market_cap: Some(1.3e12),
                pe_ratio: None,
                dividend_yield: Some(0.007),
                eps: None,
            },
        );
        let csv = render_csv(&[row]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Date,Open,High,Low,Close,Volume,Ticker,Market Cap,P/E Ratio,Dividend Yield,EPS"
        );
        // Null metrics serialize as empty fields, no trailing index column.
        let record = lines.next().unwrap();
        assert!(record.starts_with("2020-01-02,74.0,76.0,73.5,75.25,1000,AAPL,"));
        assert!(record.ends_with(",0.007,"));
    }

    #[test]
    fn news_header_matches_canonical_columns() {
        let item = NewsItem {
            time: None,
            headline: "Stocks fall".to_string(),
            description: None,
            source: "Reuters".to_string(),
            sentiment: Some(-0.3),
        };
        let csv = render_csv(&[item]).unwrap();
        assert_eq!(
            csv.lines().next().unwrap(),
            "Time,Headlines,Description,Source,Sentiment"
        );
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stocks.csv");

        std::fs::write(&path, "stale content").unwrap();
        write_csv(&path, &[bar(2)]).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("Date,Open"));
        assert!(!body.contains("stale"));
    }

    #[test]
    fn csv_round_trip_preserves_columns_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.csv");
        let rows = vec![bar(2), bar(3)];

        write_csv(&path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            ["Date", "Open", "High", "Low", "Close", "Volume", "Ticker"]
        );
        let reloaded: Vec<PriceBar> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("reloaded rows should deserialize");
        assert_eq!(reloaded, rows);
    }

    #[test]
    fn news_round_trip_preserves_nullable_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.csv");
        let rows = vec![NewsItem {
            time: NaiveDate::from_ymd_opt(2020, 7, 18)
                .unwrap()
                .and_hms_opt(14, 2, 0),
            headline: "Market rallies, again".to_string(),
            description: None,
            source: "Guardian".to_string(),
            sentiment: Some(0.4),
        }];

        write_csv(&path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let reloaded: Vec<NewsItem> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("reloaded rows should deserialize");
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].time, rows[0].time);
        assert_eq!(reloaded[0].description, None);
        assert_eq!(reloaded[0].headline, rows[0].headline);
    }
}
