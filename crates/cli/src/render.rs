//! Human-readable report rendering.
//!
//! Currency rounding, percent signs, and score precision live here, not in
//! the core engine: the engine hands over raw decimals and scores and the
//! CLI decides how they read.

use rust_decimal::Decimal;

use topshelf_core::{Channel, GroupAggregate, PortfolioReport};

pub(crate) fn portfolio_report(report: &PortfolioReport) -> String {
    if report.is_empty() {
        return "no sales row matched a customer with a channel; nothing to rank".to_string();
    }

    let channel_names: Vec<String> =
        report.channels.iter().map(|entry| entry.channel.to_string()).collect();
    let mut lines = vec![format!("Principal channels: {}", channel_names.join(", "))];

    for channel in &report.channels {
        lines.push(String::new());
        lines.push(format!(
            "Top subcategories for {} ({} matched transactions):",
            channel.channel, channel.transactions
        ));
        for entry in &channel.subcategories {
            let ranked = &entry.subcategory;
            lines.push(format!(
                "- {} (score: {}, revenue: {}, customers: {}, margin: {})",
                ranked.key,
                score(ranked.score),
                money(ranked.metrics.total_revenue),
                ranked.metrics.distinct_customers,
                percent(ranked.metrics.mean_margin),
            ));
        }
    }

    for channel in &report.channels {
        lines.push(String::new());
        lines.push(format!("Channel: {}", channel.channel));
        for entry in &channel.subcategories {
            lines.push(String::new());
            lines.push(format!("Subcategory: {}", entry.subcategory.key));
            lines.push("Top SKUs:".to_string());
            for sku in &entry.top_skus {
                lines.push(format!(
                    "- {} (id: {}, score: {})",
                    sku.key.sku_name,
                    sku.key.sku_id,
                    score(sku.score),
                ));
            }
        }
    }

    lines.join("\n")
}

pub(crate) fn channel_summary(groups: &[GroupAggregate<Channel>]) -> String {
    if groups.is_empty() {
        return "no sales row matched a customer with a channel".to_string();
    }

    let mut lines = vec![format!("Channel overview ({} channels):", groups.len())];
    for group in groups {
        lines.push(format!(
            "- {}: revenue {}, customers {}, mean margin {}, transactions {}",
            group.key,
            money(group.metrics.total_revenue),
            group.metrics.distinct_customers,
            percent(group.metrics.mean_margin),
            group.metrics.transactions,
        ));
    }
    lines.join("\n")
}

fn money(value: Decimal) -> String {
    format!("{value:.2}")
}

fn percent(fraction: Decimal) -> String {
    format!("{:.1}%", fraction * Decimal::ONE_HUNDRED)
}

fn score(value: f64) -> String {
    format!("{value:.3}")
}
