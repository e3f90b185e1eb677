//! CSV ingestion and demo fixtures for topshelf.
//!
//! The loaders turn raw sales extracts and the customer master file into the
//! validated domain records that `topshelf-core` ranks. Schema problems
//! (missing columns, malformed values, duplicate customer ids) surface here,
//! before any ranking work starts.

pub mod fixtures;
pub mod loader;

pub use fixtures::demo_dataset;
pub use loader::{
    load_customers, load_customers_file, load_sales, load_sales_file, DatasetError,
    CUSTOMER_COLUMNS, SALES_COLUMNS,
};
