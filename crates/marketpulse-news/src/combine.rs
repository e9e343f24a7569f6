//! Union, cleaning, and ordering of normalized news tables.

use crate::types::NewsItem;

/// Union per-source tables into one cleaned, time-ordered table.
///
/// Cleaning drops any row whose headline is empty after trimming — the one
/// invariant every downstream stage relies on. The sort is stable and
/// ascending by time, with null times last, so identical inputs always
/// produce an identical table.
#[must_use]
pub fn combine_sources(loaded: Vec<Vec<NewsItem>>) -> Vec<NewsItem> {
    let total: usize = loaded.iter().map(Vec::len).sum();

    let mut items: Vec<NewsItem> = loaded
        .into_iter()
        .flatten()
        .filter(|item| !item.headline.trim().is_empty())
        .collect();

    let dropped = total - items.len();
    if dropped > 0 {
        tracing::info!(dropped, "dropped rows without a headline");
    }

    // Nulls last: (true, None) sorts after every (false, Some(_)).
    items.sort_by_key(|item| (item.time.is_none(), item.time));

    tracing::debug!(rows = items.len(), "combined news table ready");
    items
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn item(time: Option<NaiveDateTime>, headline: &str, source: &str) -> NewsItem {
        NewsItem {
            time,
            headline: headline.to_string(),
            description: None,
            source: source.to_string(),
            sentiment: None,
        }
    }

    fn epoch_time(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn sorts_ascending_across_sources() {
        let guardian = vec![item(Some(epoch_time(14, 2)), "Market rallies", "Guardian")];
        let reuters = vec![item(Some(epoch_time(9, 10)), "Stocks fall", "Reuters")];

        let combined = combine_sources(vec![guardian, reuters]);

        assert_eq!(combined.len(), 2);
        assert_eq!(combined[0].source, "Reuters");
        assert_eq!(combined[1].source, "Guardian");
    }

    #[test]
    fn empty_headlines_are_dropped() {
        let rows = vec![
            item(None, "Kept", "Guardian"),
            item(None, "", "Guardian"),
            item(None, "   ", "Guardian"),
        ];
        let combined = combine_sources(vec![rows]);
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].headline, "Kept");
    }

    #[test]
    fn null_times_sort_last() {
        let rows = vec![
            item(None, "Undated", "Guardian"),
            item(Some(epoch_time(9, 10)), "Dated", "Reuters"),
        ];
        let combined = combine_sources(vec![rows]);
        assert_eq!(combined[0].headline, "Dated");
        assert_eq!(combined[1].headline, "Undated");
    }

    #[test]
    fn equal_times_keep_union_order() {
        let rows = vec![
            item(Some(epoch_time(9, 10)), "First", "Guardian"),
            item(Some(epoch_time(9, 10)), "Second", "Reuters"),
        ];
        let combined = combine_sources(vec![rows]);
        assert_eq!(combined[0].headline, "First");
        assert_eq!(combined[1].headline, "Second");
    }

    #[test]
    fn combining_is_idempotent_for_fixed_input() {
        let build = || {
            vec![
                vec![
                    item(Some(epoch_time(14, 2)), "A", "Guardian"),
                    item(None, "B", "Guardian"),
                ],
                vec![item(Some(epoch_time(9, 10)), "C", "Reuters")],
            ]
        };
        assert_eq!(combine_sources(build()), combine_sources(build()));
    }

    #[test]
    fn no_sources_yield_empty_table() {
        assert!(combine_sources(Vec::new()).is_empty());
    }
}
