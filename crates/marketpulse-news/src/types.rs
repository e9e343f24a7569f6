use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One normalized news row. Field order is the canonical CSV column order.
///
/// Invariant: after [`crate::combine_sources`], `headline` is non-empty.
/// `time` stays `None` when the source had no time column or the raw value
/// did not parse; `sentiment` is filled by the scoring stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(rename = "Time")]
    pub time: Option<NaiveDateTime>,
    #[serde(rename = "Headlines")]
    pub headline: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: Option<f64>,
}
