use tracing::debug;

use super::aggregate::aggregate;
use super::normalize::normalize;
use super::score::ScoreWeights;
use super::select::select_top;
use super::types::{EnrichedSale, RankedGroup};

/// One configurable scoring pass: aggregate, normalize, composite, select.
/// Every hierarchy level runs through this same path; only the grouping key
/// and the cut-off differ between levels.
#[derive(Clone, Copy, Debug)]
pub struct RankingPipeline {
    weights: ScoreWeights,
}

impl RankingPipeline {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Score every group produced by `key_fn` over `rows`. Normalization
    /// spans exactly these groups, so the rows admitted by `key_fn` define
    /// the scope. Output keeps the aggregator's key order; no group is
    /// dropped here.
    pub fn score_level<K, F>(&self, rows: &[EnrichedSale], key_fn: F) -> Vec<RankedGroup<K>>
    where
        K: Ord,
        F: Fn(&EnrichedSale) -> Option<K>,
    {
        let groups = aggregate(rows, key_fn);
        let signals = normalize(&groups);

        debug!(
            event_name = "ranking.level.scored",
            rows = rows.len(),
            groups = groups.len(),
        );

        groups
            .into_iter()
            .zip(signals)
            .map(|(group, signals)| RankedGroup {
                key: group.key,
                metrics: group.metrics,
                signals,
                score: self.weights.composite(&signals),
            })
            .collect()
    }

    /// Score a level and keep its top `n` groups.
    pub fn rank<K, F>(&self, rows: &[EnrichedSale], key_fn: F, top_n: usize) -> Vec<RankedGroup<K>>
    where
        K: Ord,
        F: Fn(&EnrichedSale) -> Option<K>,
    {
        select_top(self.score_level(rows, key_fn), top_n)
    }
}

impl Default for RankingPipeline {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::{Channel, CustomerId, Margin, SkuId};
    use crate::ranking::types::EnrichedSale;

    use super::RankingPipeline;

    fn row(customer: &str, sku: &str, subcategory: &str, revenue: i64, margin_pct: i64) -> EnrichedSale {
        EnrichedSale {
            customer_id: CustomerId(customer.to_owned()),
            sku_id: SkuId(sku.to_owned()),
            sku_name: format!("{sku} name"),
            subcategory: subcategory.to_owned(),
            revenue: Decimal::new(revenue, 0),
            margin: Margin::from_fraction(Decimal::new(margin_pct, 2)),
            channel: Some(Channel("Retail".to_owned())),
        }
    }

    #[test]
    fn score_level_keeps_every_group() {
        let rows = vec![
            row("C-1", "S-1", "Anvils", 100, 20),
            row("C-2", "S-2", "Widgets", 300, 40),
            row("C-3", "S-3", "Zippers", 200, 30),
        ];

        let pipeline = RankingPipeline::default();
        let scored = pipeline.score_level(&rows, |r| Some(r.subcategory.clone()));

        assert_eq!(scored.len(), 3);
        let keys: Vec<&str> = scored.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Anvils", "Widgets", "Zippers"]);
    }

    #[test]
    fn rank_orders_by_score_and_truncates() {
        let rows = vec![
            row("C-1", "S-1", "Anvils", 100, 20),
            row("C-2", "S-2", "Widgets", 300, 40),
            row("C-3", "S-3", "Zippers", 200, 30),
        ];

        let pipeline = RankingPipeline::default();
        let top = pipeline.rank(&rows, |r| Some(r.subcategory.clone()), 2);

        assert_eq!(top.len(), 2);
        // Widgets dominates every signal; Zippers is second on all three.
        assert_eq!(top[0].key, "Widgets");
        assert!((top[0].score - 1.0).abs() < 1e-12);
        assert_eq!(top[1].key, "Zippers");
        assert!(top[0].score > top[1].score);
    }

    #[test]
    fn scoring_the_same_rows_twice_is_identical() {
        let rows = vec![
            row("C-1", "S-1", "Anvils", 100, 20),
            row("C-2", "S-2", "Widgets", 300, 40),
        ];

        let pipeline = RankingPipeline::default();
        let first = pipeline.rank(&rows, |r| Some(r.subcategory.clone()), 5);
        let second = pipeline.rank(&rows, |r| Some(r.subcategory.clone()), 5);

        assert_eq!(first, second);
    }
}
