//! Per-source aggregation of sentiment scores.

use std::collections::BTreeMap;

use marketpulse_news::NewsItem;

/// Mean sentiment polarity for one source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSentiment {
    pub source: String,
    pub mean_polarity: f64,
    /// Number of scored rows that entered the mean.
    pub item_count: usize,
}

/// Group scored rows by source and compute the arithmetic mean polarity
/// per group.
///
/// Null sentiments are excluded from both numerator and denominator; a
/// source whose rows are all unscored is omitted entirely. Output is
/// sorted by source name.
#[must_use]
pub fn aggregate_by_source(items: &[NewsItem]) -> Vec<SourceSentiment> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for item in items {
        let Some(sentiment) = item.sentiment else {
            tracing::warn!(source = %item.source, "unscored row skipped in aggregation");
            continue;
        };
        let entry = groups.entry(item.source.as_str()).or_insert((0.0, 0));
        entry.0 += sentiment;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(source, (sum, count))| {
            #[allow(clippy::cast_precision_loss)]
            let mean_polarity = sum / count as f64;
            SourceSentiment {
                source: source.to_string(),
                mean_polarity,
                item_count: count,
            }
        })
        .collect()
}
