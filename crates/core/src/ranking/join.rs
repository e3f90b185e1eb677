use std::collections::HashMap;

use crate::domain::{Channel, CustomerId, CustomerRecord, SaleRecord};

use super::types::EnrichedSale;

/// Left-join sales against the customer master. Every sale appears exactly
/// once in the output; a customer id missing from the master leaves the
/// channel empty rather than dropping the row.
pub fn left_join(sales: &[SaleRecord], customers: &[CustomerRecord]) -> Vec<EnrichedSale> {
    // Later duplicates would shadow earlier ones; the loader rejects them.
    let channel_by_customer: HashMap<&CustomerId, &Channel> =
        customers.iter().map(|record| (&record.customer_id, &record.channel)).collect();

    sales
        .iter()
        .map(|sale| EnrichedSale {
            customer_id: sale.customer_id.clone(),
            sku_id: sale.sku_id.clone(),
            sku_name: sale.sku_name.clone(),
            subcategory: sale.subcategory.clone(),
            revenue: sale.revenue,
            margin: sale.margin,
            channel: channel_by_customer.get(&sale.customer_id).map(|channel| (*channel).clone()),
        })
        .collect()
}
