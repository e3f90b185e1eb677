pub mod config;
pub mod domain;
pub mod errors;
pub mod ranking;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::{Channel, CustomerId, CustomerRecord, Margin, SaleRecord, SkuId};
pub use errors::DomainError;
pub use ranking::{
    ChannelRanking, EnrichedSale, GroupAggregate, GroupMetrics, PortfolioAnalyst, PortfolioReport,
    RankedGroup, RankingPipeline, ScoreWeights, SignalProfile, SkuKey, SubcategoryRanking,
};
