//! Deterministic demo dataset.
//!
//! A small specialty-coffee catalogue spread over three channels. The seed
//! tables are fixed so demo output is reproducible run to run. One sales row
//! (`C-9999`) deliberately has no entry in the customer master, exercising
//! the unmatched-customer path of the join.

use rust_decimal::Decimal;

use topshelf_core::{Channel, CustomerId, CustomerRecord, Margin, SaleRecord, SkuId};

struct SaleSeed {
    customer_id: &'static str,
    sku_id: &'static str,
    sku_name: &'static str,
    subcategory: &'static str,
    revenue_cents: i64,
    margin_milli: i64,
}

struct CustomerSeed {
    customer_id: &'static str,
    channel: &'static str,
}

const SALE_SEEDS: &[SaleSeed] = &[
    // Retail
    SaleSeed { customer_id: "C-1001", sku_id: "SKU-100", sku_name: "Espresso Beans 1kg", subcategory: "Coffee", revenue_cents: 12050, margin_milli: 225 },
    SaleSeed { customer_id: "C-1001", sku_id: "SKU-101", sku_name: "Single Origin 250g", subcategory: "Coffee", revenue_cents: 4500, margin_milli: 300 },
    SaleSeed { customer_id: "C-1002", sku_id: "SKU-100", sku_name: "Espresso Beans 1kg", subcategory: "Coffee", revenue_cents: 9800, margin_milli: 225 },
    SaleSeed { customer_id: "C-1002", sku_id: "SKU-110", sku_name: "Filter Papers", subcategory: "Brewing", revenue_cents: 1500, margin_milli: 400 },
    SaleSeed { customer_id: "C-1003", sku_id: "SKU-111", sku_name: "Pour Over Kettle", subcategory: "Brewing", revenue_cents: 6400, margin_milli: 350 },
    SaleSeed { customer_id: "C-1003", sku_id: "SKU-120", sku_name: "Ceramic Mug", subcategory: "Drinkware", revenue_cents: 1899, margin_milli: 500 },
    SaleSeed { customer_id: "C-1004", sku_id: "SKU-130", sku_name: "Burr Grinder", subcategory: "Grinders", revenue_cents: 24900, margin_milli: 180 },
    SaleSeed { customer_id: "C-1004", sku_id: "SKU-100", sku_name: "Espresso Beans 1kg", subcategory: "Coffee", revenue_cents: 11000, margin_milli: 225 },
    SaleSeed { customer_id: "C-1001", sku_id: "SKU-140", sku_name: "Digital Scale", subcategory: "Accessories", revenue_cents: 3250, margin_milli: 420 },
    SaleSeed { customer_id: "C-1002", sku_id: "SKU-121", sku_name: "Travel Tumbler", subcategory: "Drinkware", revenue_cents: 2499, margin_milli: 480 },
    SaleSeed { customer_id: "C-1003", sku_id: "SKU-101", sku_name: "Single Origin 250g", subcategory: "Coffee", revenue_cents: 5200, margin_milli: 300 },
    SaleSeed { customer_id: "C-1004", sku_id: "SKU-110", sku_name: "Filter Papers", subcategory: "Brewing", revenue_cents: 1200, margin_milli: 400 },
    // Online
    SaleSeed { customer_id: "C-2001", sku_id: "SKU-101", sku_name: "Single Origin 250g", subcategory: "Coffee", revenue_cents: 4800, margin_milli: 300 },
    SaleSeed { customer_id: "C-2001", sku_id: "SKU-131", sku_name: "Hand Grinder", subcategory: "Grinders", revenue_cents: 7900, margin_milli: 260 },
    SaleSeed { customer_id: "C-2002", sku_id: "SKU-120", sku_name: "Ceramic Mug", subcategory: "Drinkware", revenue_cents: 1799, margin_milli: 500 },
    SaleSeed { customer_id: "C-2002", sku_id: "SKU-100", sku_name: "Espresso Beans 1kg", subcategory: "Coffee", revenue_cents: 10500, margin_milli: 225 },
    SaleSeed { customer_id: "C-2003", sku_id: "SKU-141", sku_name: "Cleaning Kit", subcategory: "Accessories", revenue_cents: 2100, margin_milli: 450 },
    SaleSeed { customer_id: "C-2003", sku_id: "SKU-110", sku_name: "Filter Papers", subcategory: "Brewing", revenue_cents: 1350, margin_milli: 400 },
    SaleSeed { customer_id: "C-2001", sku_id: "SKU-121", sku_name: "Travel Tumbler", subcategory: "Drinkware", revenue_cents: 2299, margin_milli: 480 },
    SaleSeed { customer_id: "C-2002", sku_id: "SKU-140", sku_name: "Digital Scale", subcategory: "Accessories", revenue_cents: 2950, margin_milli: 420 },
    // Wholesale
    SaleSeed { customer_id: "C-3001", sku_id: "SKU-100", sku_name: "Espresso Beans 1kg", subcategory: "Coffee", revenue_cents: 89000, margin_milli: 150 },
    SaleSeed { customer_id: "C-3001", sku_id: "SKU-130", sku_name: "Burr Grinder", subcategory: "Grinders", revenue_cents: 112_000, margin_milli: 140 },
    SaleSeed { customer_id: "C-3002", sku_id: "SKU-101", sku_name: "Single Origin 250g", subcategory: "Coffee", revenue_cents: 56000, margin_milli: 160 },
    SaleSeed { customer_id: "C-3002", sku_id: "SKU-111", sku_name: "Pour Over Kettle", subcategory: "Brewing", revenue_cents: 28800, margin_milli: 200 },
    // No master entry for this customer.
    SaleSeed { customer_id: "C-9999", sku_id: "SKU-120", sku_name: "Ceramic Mug", subcategory: "Drinkware", revenue_cents: 1599, margin_milli: 500 },
];

const CUSTOMER_SEEDS: &[CustomerSeed] = &[
    CustomerSeed { customer_id: "C-1001", channel: "Retail" },
    CustomerSeed { customer_id: "C-1002", channel: "Retail" },
    CustomerSeed { customer_id: "C-1003", channel: "Retail" },
    CustomerSeed { customer_id: "C-1004", channel: "Retail" },
    CustomerSeed { customer_id: "C-2001", channel: "Online" },
    CustomerSeed { customer_id: "C-2002", channel: "Online" },
    CustomerSeed { customer_id: "C-2003", channel: "Online" },
    CustomerSeed { customer_id: "C-3001", channel: "Wholesale" },
    CustomerSeed { customer_id: "C-3002", channel: "Wholesale" },
];

/// Build the demo sales extract and customer master.
pub fn demo_dataset() -> (Vec<SaleRecord>, Vec<CustomerRecord>) {
    let sales = SALE_SEEDS
        .iter()
        .map(|seed| SaleRecord {
            customer_id: CustomerId(seed.customer_id.to_string()),
            sku_id: SkuId(seed.sku_id.to_string()),
            sku_name: seed.sku_name.to_string(),
            subcategory: seed.subcategory.to_string(),
            revenue: Decimal::new(seed.revenue_cents, 2),
            margin: Margin::from_fraction(Decimal::new(seed.margin_milli, 3)),
        })
        .collect();

    let customers = CUSTOMER_SEEDS
        .iter()
        .map(|seed| CustomerRecord {
            customer_id: CustomerId(seed.customer_id.to_string()),
            channel: Channel(seed.channel.to_string()),
        })
        .collect();

    (sales, customers)
}
