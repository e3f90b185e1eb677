//! Composite scoring and hierarchical ranking.
//!
//! Joins transactions with the customer master, aggregates per group,
//! min-max normalizes the signals, blends them into one weighted composite
//! score, and drives the same pipeline down the channel, subcategory, and
//! SKU levels.

mod aggregate;
mod join;
mod normalize;
mod pipeline;
mod portfolio;
mod score;
mod select;
mod types;

pub use aggregate::aggregate;
pub use join::left_join;
pub use normalize::normalize;
pub use pipeline::RankingPipeline;
pub use portfolio::{
    ChannelRanking, PortfolioAnalyst, PortfolioReport, SkuKey, SubcategoryRanking,
};
pub use score::ScoreWeights;
pub use select::select_top;
pub use types::{EnrichedSale, GroupAggregate, GroupMetrics, RankedGroup, SignalProfile};

/// Default composite weights: revenue 0.40, popularity 0.30, margin 0.30.
pub const DEFAULT_WEIGHTS: ScoreWeights =
    ScoreWeights { revenue: 0.4, popularity: 0.3, margin: 0.3 };

/// Allowed deviation of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// How many channels the hierarchy keeps, by transaction volume.
pub const PRINCIPAL_CHANNEL_COUNT: usize = 2;

/// How many subcategories each principal channel keeps.
pub const TOP_SUBCATEGORIES_PER_CHANNEL: usize = 5;

/// How many SKUs each winning subcategory keeps.
pub const TOP_SKUS_PER_SUBCATEGORY: usize = 10;
