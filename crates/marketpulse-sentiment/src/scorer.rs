//! Financial-news lexicon scorer.

use marketpulse_news::NewsItem;

/// Financial-news word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("surge", 0.5),
    ("surges", 0.5),
    ("rally", 0.4),
    ("rallies", 0.4),
    ("gain", 0.3),
    ("gains", 0.3),
    ("strong", 0.4),
    ("record", 0.3),
    ("beat", 0.4),
    ("beats", 0.4),
    ("growth", 0.3),
    ("profit", 0.3),
    ("profits", 0.3),
    ("upgrade", 0.4),
    ("upgraded", 0.4),
    ("soar", 0.5),
    ("soars", 0.5),
    ("jump", 0.4),
    ("jumps", 0.4),
    ("optimism", 0.4),
    ("recovery", 0.3),
    ("boom", 0.4),
    ("bullish", 0.5),
    ("win", 0.4),
    ("best", 0.4),
    // Negative signals
    ("fall", -0.3),
    ("falls", -0.3),
    ("drop", -0.3),
    ("drops", -0.3),
    ("plunge", -0.6),
    ("plunges", -0.6),
    ("loss", -0.4),
    ("losses", -0.4),
    ("layoff", -0.6),
    ("layoffs", -0.6),
    ("weak", -0.4),
    ("miss", -0.4),
    ("misses", -0.4),
    ("downgrade", -0.4),
    ("downgraded", -0.4),
    ("crash", -0.7),
    ("slump", -0.5),
    ("recession", -0.6),
    ("bankruptcy", -0.8),
    ("lawsuit", -0.5),
    ("fraud", -0.7),
    ("bearish", -0.5),
    ("fears", -0.4),
    ("crisis", -0.6),
    ("worst", -0.5),
    ("cuts", -0.3),
];

/// Score a text string using the financial-news lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn polarity_score(text: &str) -> f64 {
    let mut score = 0.0_f64;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}

/// Score every row's headline in place.
///
/// The cleaning stage guarantees non-empty headlines, so every row gets a
/// concrete score.
pub fn score_items(items: &mut [NewsItem]) {
    for item in items.iter_mut() {
        item.sentiment = Some(polarity_score(&item.headline));
    }
    tracing::debug!(rows = items.len(), "scored news headlines");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_returns_zero() {
        assert_eq!(polarity_score(""), 0.0);
    }

    #[test]
    fn unknown_text_returns_zero() {
        assert_eq!(polarity_score("the quick brown fox"), 0.0);
    }

    #[test]
    fn positive_headline_scores_positive() {
        let score = polarity_score("Stocks surge on strong earnings");
        assert!(score > 0.0, "expected positive score, got {score}");
    }

    #[test]
    fn negative_headline_scores_negative() {
        let score = polarity_score("Company faces major losses and layoffs");
        assert!(score < 0.0, "expected negative score, got {score}");
    }

    #[test]
    fn mixed_text_returns_intermediate() {
        let score = polarity_score("profits jump despite layoffs");
        assert!(
            score > -1.0 && score < 1.0,
            "expected intermediate score, got {score}"
        );
    }

    #[test]
    fn score_clamps_to_positive_one() {
        let text = "surge rally soars jumps bullish record strong beats optimism boom";
        assert_eq!(polarity_score(text), 1.0);
    }

    #[test]
    fn score_clamps_to_negative_one() {
        let text = "crash plunge bankruptcy fraud recession layoffs crisis worst slump";
        assert_eq!(polarity_score(text), -1.0);
    }

    #[test]
    fn punctuation_stripped_from_words() {
        let score = polarity_score("Markets rally!");
        assert!(score > 0.0, "expected positive score, got {score}");
    }

    #[test]
    fn scoring_is_deterministic() {
        let text = "Stocks fall as recession fears grow";
        assert_eq!(polarity_score(text), polarity_score(text));
    }

    #[test]
    fn scores_stay_in_bounds_for_arbitrary_text() {
        for text in [
            "surge surge surge surge surge surge",
            "crash crash crash crash crash crash",
            "neutral words only here",
        ] {
            let score = polarity_score(text);
            assert!((-1.0..=1.0).contains(&score), "out of bounds: {score}");
        }
    }

    #[test]
    fn score_items_fills_every_row() {
        let mut items = vec![
            marketpulse_news::NewsItem {
                time: None,
                headline: "Stocks surge".to_string(),
                description: None,
                source: "Reuters".to_string(),
                sentiment: None,
            },
            marketpulse_news::NewsItem {
                time: None,
                headline: "Markets crash".to_string(),
                description: None,
                source: "Guardian".to_string(),
                sentiment: None,
            },
        ];
        score_items(&mut items);
        assert!(items[0].sentiment.unwrap() > 0.0);
        assert!(items[1].sentiment.unwrap() < 0.0);
    }
}
