use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;

use crate::domain::{CustomerId, SkuId};

use super::types::{EnrichedSale, GroupAggregate, GroupMetrics};

/// Fold rows into groups keyed by `key_fn`. Rows mapped to `None` are left
/// out entirely; channel-partitioned stages use this to exclude rows whose
/// customer had no channel. Groups come back sorted by key, and a key with
/// no rows simply never materializes.
pub fn aggregate<K, F>(rows: &[EnrichedSale], key_fn: F) -> Vec<GroupAggregate<K>>
where
    K: Ord,
    F: Fn(&EnrichedSale) -> Option<K>,
{
    let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();

    for row in rows {
        let Some(key) = key_fn(row) else { continue };
        groups.entry(key).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|(key, accumulator)| GroupAggregate { key, metrics: accumulator.finish() })
        .collect()
}

#[derive(Default)]
struct Accumulator {
    transactions: u64,
    skus: HashSet<SkuId>,
    customers: HashSet<CustomerId>,
    revenue: Decimal,
    margin_sum: Decimal,
}

impl Accumulator {
    fn push(&mut self, row: &EnrichedSale) {
        self.transactions += 1;
        self.skus.insert(row.sku_id.clone());
        self.customers.insert(row.customer_id.clone());
        self.revenue += row.revenue;
        self.margin_sum += row.margin.as_fraction();
    }

    fn finish(self) -> GroupMetrics {
        let mean_margin = if self.transactions == 0 {
            Decimal::ZERO
        } else {
            self.margin_sum / Decimal::from(self.transactions)
        };

        GroupMetrics {
            transactions: self.transactions,
            distinct_skus: self.skus.len(),
            distinct_customers: self.customers.len(),
            total_revenue: self.revenue,
            mean_margin,
        }
    }
}
