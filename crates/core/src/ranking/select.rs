use std::cmp::Ordering;

use super::types::RankedGroup;

/// Sort groups by composite score descending and keep the first `n`.
///
/// NaN scores are pushed to the end so they never appear as top entries,
/// and exact ties break by ascending group key, which keeps re-runs over
/// the same input byte-identical.
pub fn select_top<K: Ord>(mut groups: Vec<RankedGroup<K>>, n: usize) -> Vec<RankedGroup<K>> {
    groups.sort_by(|a, b| {
        let by_score = match (a.score.is_nan(), b.score.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
        };
        by_score.then_with(|| a.key.cmp(&b.key))
    });
    groups.truncate(n);
    groups
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::ranking::types::{GroupMetrics, RankedGroup, SignalProfile};

    use super::select_top;

    fn ranked(key: &str, score: f64) -> RankedGroup<String> {
        RankedGroup {
            key: key.to_owned(),
            metrics: GroupMetrics {
                transactions: 1,
                distinct_skus: 1,
                distinct_customers: 1,
                total_revenue: Decimal::ONE,
                mean_margin: Decimal::new(10, 2),
            },
            signals: SignalProfile { popularity: 0.0, revenue: 0.0, margin: 0.0 },
            score,
        }
    }

    #[test]
    fn orders_by_score_descending() {
        let groups = vec![ranked("low", 0.2), ranked("high", 0.9), ranked("mid", 0.5)];

        let top = select_top(groups, 3);

        let keys: Vec<&str> = top.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["high", "mid", "low"]);
    }

    #[test]
    fn truncates_to_the_requested_size() {
        let groups = vec![ranked("a", 0.9), ranked("b", 0.8), ranked("c", 0.7)];

        let top = select_top(groups, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].key, "a");
        assert_eq!(top[1].key, "b");
    }

    #[test]
    fn requesting_more_than_available_returns_all() {
        let groups = vec![ranked("a", 0.9)];

        let top = select_top(groups, 10);

        assert_eq!(top.len(), 1);
    }

    #[test]
    fn exact_ties_break_by_ascending_key() {
        let groups = vec![ranked("zeta", 0.5), ranked("alpha", 0.5), ranked("mid", 0.5)];

        let top = select_top(groups, 3);

        let keys: Vec<&str> = top.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn nan_scores_sink_to_the_end() {
        let groups = vec![ranked("bad", f64::NAN), ranked("good", 0.1)];

        let top = select_top(groups, 2);

        assert_eq!(top[0].key, "good");
        assert_eq!(top[1].key, "bad");
    }

    #[test]
    fn empty_input_stays_empty() {
        let top = select_top(Vec::<RankedGroup<String>>::new(), 5);
        assert!(top.is_empty());
    }
}
