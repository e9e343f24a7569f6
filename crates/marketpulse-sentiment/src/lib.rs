//! Lexicon sentiment scoring for news headlines and per-source aggregation.
//!
//! Pure functions over text: no network calls, deterministic for a fixed
//! lexicon. Scores live in `[-1.0, 1.0]`.

pub mod aggregate;
pub mod scorer;

pub use aggregate::{aggregate_by_source, SourceSentiment};
pub use scorer::{polarity_score, score_items};
