use rust_decimal::Decimal;

use super::types::{GroupAggregate, SignalProfile};

/// Collapsed-range guard. Underneath this spread every group carries the
/// same information, so the signal contributes its full weight (1.0) for
/// all of them instead of dividing by zero.
const DEGENERATE_RANGE: f64 = 1e-10;

/// Min-max rescale the three scoring signals onto [0, 1], each column
/// independently, across exactly the groups given. The slice defines the
/// normalization scope: callers wanting per-partition scores hand in one
/// partition's groups at a time.
pub fn normalize<K>(groups: &[GroupAggregate<K>]) -> Vec<SignalProfile> {
    let popularity = rescale(&column(groups, |g| g.metrics.distinct_customers as f64));
    let revenue = rescale(&column(groups, |g| decimal_to_f64(g.metrics.total_revenue)));
    let margin = rescale(&column(groups, |g| decimal_to_f64(g.metrics.mean_margin)));

    popularity
        .into_iter()
        .zip(revenue)
        .zip(margin)
        .map(|((popularity, revenue), margin)| SignalProfile { popularity, revenue, margin })
        .collect()
}

fn column<K, F>(groups: &[GroupAggregate<K>], extract: F) -> Vec<f64>
where
    F: Fn(&GroupAggregate<K>) -> f64,
{
    groups.iter().map(extract).collect()
}

fn rescale(values: &[f64]) -> Vec<f64> {
    let Some(first) = values.first().copied() else {
        return Vec::new();
    };

    let (min, max) = values.iter().skip(1).fold((first, first), |(min, max), &value| {
        (min.min(value), max.max(value))
    });

    if (max - min).abs() < DEGENERATE_RANGE {
        return vec![1.0; values.len()];
    }

    values.iter().map(|value| ((value - min) / (max - min)).clamp(0.0, 1.0)).collect()
}

fn decimal_to_f64(value: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    value.to_f64().unwrap_or(0.0)
}
