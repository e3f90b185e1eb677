use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{Channel, CustomerRecord, SaleRecord, SkuId};

use super::aggregate::aggregate;
use super::join::left_join;
use super::pipeline::RankingPipeline;
use super::score::ScoreWeights;
use super::types::{EnrichedSale, GroupAggregate, RankedGroup};
use super::{PRINCIPAL_CHANNEL_COUNT, TOP_SKUS_PER_SUBCATEGORY, TOP_SUBCATEGORIES_PER_CHANNEL};

/// Identity of a SKU at the terminal ranking level. Ordering is by id, then
/// name, which doubles as the deterministic tie-break.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkuKey {
    pub sku_id: SkuId,
    pub sku_name: String,
}

/// One ranked subcategory together with its ranked SKUs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryRanking {
    pub subcategory: RankedGroup<String>,
    pub top_skus: Vec<RankedGroup<SkuKey>>,
}

impl SubcategoryRanking {
    /// The bare (id, name) pairs of the winning SKUs, in rank order.
    pub fn top_sku_pairs(&self) -> Vec<(SkuId, String)> {
        self.top_skus
            .iter()
            .map(|entry| (entry.key.sku_id.clone(), entry.key.sku_name.clone()))
            .collect()
    }
}

/// A principal channel with its ranked subcategory tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelRanking {
    pub channel: Channel,
    /// Matched transaction volume that made this channel principal.
    pub transactions: u64,
    pub subcategories: Vec<SubcategoryRanking>,
}

/// Terminal output of the full analysis: channel, then subcategory, then SKU.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub channels: Vec<ChannelRanking>,
}

impl PortfolioReport {
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Drives the ranking pipeline across the channel, subcategory, and SKU
/// levels. Holds no state between invocations; two runs over the same input
/// produce identical reports.
#[derive(Clone, Debug)]
pub struct PortfolioAnalyst {
    pipeline: RankingPipeline,
    channel_count: usize,
    subcategory_count: usize,
    sku_count: usize,
}

impl PortfolioAnalyst {
    /// Analyst with default weights and level sizes.
    pub fn new() -> Self {
        Self::with_weights(ScoreWeights::default())
    }

    /// Analyst with custom, already-validated weights.
    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self {
            pipeline: RankingPipeline::new(weights),
            channel_count: PRINCIPAL_CHANNEL_COUNT,
            subcategory_count: TOP_SUBCATEGORIES_PER_CHANNEL,
            sku_count: TOP_SKUS_PER_SUBCATEGORY,
        }
    }

    /// Override how many entries each level keeps.
    pub fn with_levels(mut self, channels: usize, subcategories: usize, skus: usize) -> Self {
        self.channel_count = channels;
        self.subcategory_count = subcategories;
        self.sku_count = skus;
        self
    }

    /// Join and rank the full hierarchy. Empty inputs produce an empty
    /// report; nothing here fails.
    pub fn analyze(&self, sales: &[SaleRecord], customers: &[CustomerRecord]) -> PortfolioReport {
        let rows = left_join(sales, customers);
        self.analyze_rows(&rows)
    }

    /// Rank the hierarchy over already-joined rows.
    pub fn analyze_rows(&self, rows: &[EnrichedSale]) -> PortfolioReport {
        info!(event_name = "portfolio.analyze.start", rows = rows.len());

        let principal = self.principal_channels(rows);
        let mut channels = Vec::with_capacity(principal.len());

        for group in principal {
            let channel = group.key;

            // Stage A: subcategories within this channel. The filtering key
            // function also fixes the normalization scope to the channel.
            let ranked_subcategories = self.pipeline.rank(
                rows,
                |row| {
                    (row.channel.as_ref() == Some(&channel)).then(|| row.subcategory.clone())
                },
                self.subcategory_count,
            );

            // Stage B: SKUs within each winning (channel, subcategory) pair.
            let mut subcategories = Vec::with_capacity(ranked_subcategories.len());
            for subcategory in ranked_subcategories {
                let top_skus = self.pipeline.rank(
                    rows,
                    |row| {
                        (row.channel.as_ref() == Some(&channel)
                            && row.subcategory == subcategory.key)
                            .then(|| SkuKey {
                                sku_id: row.sku_id.clone(),
                                sku_name: row.sku_name.clone(),
                            })
                    },
                    self.sku_count,
                );

                debug!(
                    event_name = "portfolio.subcategory.ranked",
                    channel = %channel,
                    subcategory = %subcategory.key,
                    skus = top_skus.len(),
                );
                subcategories.push(SubcategoryRanking { subcategory, top_skus });
            }

            channels.push(ChannelRanking {
                channel,
                transactions: group.metrics.transactions,
                subcategories,
            });
        }

        info!(event_name = "portfolio.analyze.complete", channels = channels.len());
        PortfolioReport { channels }
    }

    /// Channels ordered by matched transaction volume, highest first, ties
    /// by channel name, truncated to the configured count. Rows without a
    /// channel contribute to no candidate.
    pub fn principal_channels(&self, rows: &[EnrichedSale]) -> Vec<GroupAggregate<Channel>> {
        let mut groups = aggregate(rows, |row| row.channel.clone());
        groups.sort_by(|a, b| {
            b.metrics.transactions.cmp(&a.metrics.transactions).then_with(|| a.key.cmp(&b.key))
        });
        groups.truncate(self.channel_count);
        groups
    }

    /// Per-channel KPI roll-up over every channel in the data, not only the
    /// principal ones. Keys come back in channel order.
    pub fn channel_summary(
        &self,
        sales: &[SaleRecord],
        customers: &[CustomerRecord],
    ) -> Vec<GroupAggregate<Channel>> {
        let rows = left_join(sales, customers);
        aggregate(&rows, |row| row.channel.clone())
    }
}

impl Default for PortfolioAnalyst {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::{Channel, CustomerId, CustomerRecord, Margin, SaleRecord, SkuId};

    use super::PortfolioAnalyst;

    fn sale(customer: &str, sku: &str, subcategory: &str, revenue: i64, margin_pct: i64) -> SaleRecord {
        SaleRecord {
            customer_id: CustomerId(customer.to_owned()),
            sku_id: SkuId(sku.to_owned()),
            sku_name: format!("{sku} name"),
            subcategory: subcategory.to_owned(),
            revenue: Decimal::new(revenue, 0),
            margin: Margin::from_fraction(Decimal::new(margin_pct, 2)),
        }
    }

    fn customer(id: &str, channel: &str) -> CustomerRecord {
        CustomerRecord {
            customer_id: CustomerId(id.to_owned()),
            channel: Channel(channel.to_owned()),
        }
    }

    fn fixture() -> (Vec<SaleRecord>, Vec<CustomerRecord>) {
        let sales = vec![
            sale("C-1", "S-1", "Anvils", 400, 20),
            sale("C-1", "S-2", "Anvils", 300, 25),
            sale("C-2", "S-3", "Mallets", 500, 30),
            sale("C-2", "S-1", "Anvils", 150, 20),
            sale("C-3", "S-4", "Mallets", 700, 35),
            sale("C-3", "S-5", "Widgets", 250, 15),
            sale("C-4", "S-6", "Widgets", 90, 10),
            sale("C-9", "S-1", "Anvils", 9_999, 90), // no customer record
        ];
        let customers = vec![
            customer("C-1", "Retail"),
            customer("C-2", "Retail"),
            customer("C-3", "Online"),
            customer("C-4", "Fairs"),
        ];
        (sales, customers)
    }

    #[test]
    fn principal_channels_rank_by_matched_volume() {
        let (sales, customers) = fixture();
        let analyst = PortfolioAnalyst::new();

        let rows = crate::ranking::left_join(&sales, &customers);
        let principal = analyst.principal_channels(&rows);

        assert_eq!(principal.len(), 2);
        assert_eq!(principal[0].key, Channel("Retail".to_owned()));
        assert_eq!(principal[0].metrics.transactions, 4);
        assert_eq!(principal[1].key, Channel("Online".to_owned()));
        assert_eq!(principal[1].metrics.transactions, 2);
    }

    #[test]
    fn channel_volume_ties_break_alphabetically() {
        let sales = vec![
            sale("C-1", "S-1", "Anvils", 100, 20),
            sale("C-2", "S-2", "Anvils", 100, 20),
        ];
        let customers = vec![customer("C-1", "Zebra"), customer("C-2", "Acme")];
        let analyst = PortfolioAnalyst::new();

        let rows = crate::ranking::left_join(&sales, &customers);
        let principal = analyst.principal_channels(&rows);

        assert_eq!(principal[0].key, Channel("Acme".to_owned()));
        assert_eq!(principal[1].key, Channel("Zebra".to_owned()));
    }

    #[test]
    fn unmatched_rows_never_form_a_channel() {
        let (sales, customers) = fixture();
        let analyst = PortfolioAnalyst::new();

        let rows = crate::ranking::left_join(&sales, &customers);
        let matched: u64 = analyst
            .channel_summary(&sales, &customers)
            .iter()
            .map(|group| group.metrics.transactions)
            .sum();

        // One orphan row out of eight.
        assert_eq!(rows.len(), 8);
        assert_eq!(matched, 7);
    }

    #[test]
    fn analyze_builds_the_full_hierarchy() {
        let (sales, customers) = fixture();
        let analyst = PortfolioAnalyst::new();

        let report = analyst.analyze(&sales, &customers);

        assert_eq!(report.channels.len(), 2);
        let retail = &report.channels[0];
        assert_eq!(retail.channel, Channel("Retail".to_owned()));
        assert_eq!(retail.subcategories.len(), 2); // Anvils, Mallets

        for channel in &report.channels {
            for subcategory in &channel.subcategories {
                assert!(subcategory.top_skus.len() <= 10);
                for window in subcategory.top_skus.windows(2) {
                    assert!(window[0].score >= window[1].score);
                }
            }
        }
    }

    #[test]
    fn sku_pairs_come_back_in_rank_order() {
        let (sales, customers) = fixture();
        let analyst = PortfolioAnalyst::new();

        let report = analyst.analyze(&sales, &customers);
        let retail_anvils = report.channels[0]
            .subcategories
            .iter()
            .find(|s| s.subcategory.key == "Anvils")
            .unwrap();

        let pairs = retail_anvils.top_sku_pairs();
        assert_eq!(pairs.len(), retail_anvils.top_skus.len());
        assert_eq!(pairs[0].0, retail_anvils.top_skus[0].key.sku_id);
    }

    #[test]
    fn empty_input_yields_an_empty_report() {
        let analyst = PortfolioAnalyst::new();
        let report = analyst.analyze(&[], &[]);
        assert!(report.is_empty());
    }

    #[test]
    fn level_sizes_are_configurable() {
        let (sales, customers) = fixture();
        let analyst = PortfolioAnalyst::new().with_levels(1, 1, 1);

        let report = analyst.analyze(&sales, &customers);

        assert_eq!(report.channels.len(), 1);
        assert_eq!(report.channels[0].subcategories.len(), 1);
        assert_eq!(report.channels[0].subcategories[0].top_skus.len(), 1);
    }

    #[test]
    fn repeated_analysis_is_deterministic() {
        let (sales, customers) = fixture();
        let analyst = PortfolioAnalyst::new();

        let first = analyst.analyze(&sales, &customers);
        let second = analyst.analyze(&sales, &customers);

        assert_eq!(first, second);
    }
}
