//! Types flowing through the ranking pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Channel, CustomerId, Margin, SkuId};

/// A sale joined with its customer's channel. `channel` is `None` when the
/// customer id was absent from the customer master; such rows still count in
/// channel-agnostic aggregations but never reach a channel partition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSale {
    pub customer_id: CustomerId,
    pub sku_id: SkuId,
    pub sku_name: String,
    pub subcategory: String,
    pub revenue: Decimal,
    pub margin: Margin,
    pub channel: Option<Channel>,
}

/// Raw per-group metrics produced by aggregation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupMetrics {
    /// Number of rows folded into the group.
    pub transactions: u64,
    pub distinct_skus: usize,
    pub distinct_customers: usize,
    pub total_revenue: Decimal,
    pub mean_margin: Decimal,
}

/// One aggregated group keyed by the caller's grouping key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupAggregate<K> {
    pub key: K,
    pub metrics: GroupMetrics,
}

/// Per-group signals after min-max rescaling. Each component is in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalProfile {
    pub popularity: f64,
    pub revenue: f64,
    pub margin: f64,
}

/// A fully scored group: raw metrics, normalized signals, and the weighted
/// composite. This is the unformatted record shape consumers receive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedGroup<K> {
    pub key: K,
    pub metrics: GroupMetrics,
    pub signals: SignalProfile,
    pub score: f64,
}
