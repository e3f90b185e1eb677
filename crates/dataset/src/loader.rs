//! CSV loaders for the sales extract and the customer master.
//!
//! Upstream exports are inconsistent about header casing, so headers are
//! matched case-insensitively and normalised to uppercase before rows are
//! read. A missing required column fails the whole load before any row is
//! parsed; row-level problems carry the 1-based CSV line number.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use topshelf_core::{Channel, CustomerId, CustomerRecord, DomainError, Margin, SaleRecord, SkuId};

/// Columns the sales extract must provide, after uppercasing.
pub const SALES_COLUMNS: &[&str] = &[
    "CUSTOMER_ID",
    "SKU_ID",
    "SKU_NAME",
    "SUBCATEGORY",
    "REVENUE",
    "MARGIN",
];

/// Columns the customer master must provide, after uppercasing.
pub const CUSTOMER_COLUMNS: &[&str] = &["CUSTOMER_ID", "CHANNEL"];

/// Failures raised while reading a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not open dataset file `{path}`: {source}")]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not read csv header row: {0}")]
    Header(#[source] csv::Error),

    #[error("required column `{column}` is missing from the header row")]
    MissingColumn { column: String },

    #[error("csv line {line} is malformed: {source}")]
    InvalidRow {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("csv line {line}: could not parse revenue value `{value}`")]
    InvalidRevenue { line: usize, value: String },

    #[error("csv line {line}: {source}")]
    InvalidValue {
        line: usize,
        #[source]
        source: DomainError,
    },

    #[error("csv line {line}: duplicate customer id `{customer_id}` in customer master")]
    DuplicateCustomer { line: usize, customer_id: String },
}

#[derive(Debug, Deserialize)]
struct RawSaleRow {
    #[serde(rename = "CUSTOMER_ID")]
    customer_id: String,
    #[serde(rename = "SKU_ID")]
    sku_id: String,
    #[serde(rename = "SKU_NAME")]
    sku_name: String,
    #[serde(rename = "SUBCATEGORY")]
    subcategory: String,
    #[serde(rename = "REVENUE")]
    revenue: String,
    #[serde(rename = "MARGIN")]
    margin: String,
}

#[derive(Debug, Deserialize)]
struct RawCustomerRow {
    #[serde(rename = "CUSTOMER_ID")]
    customer_id: String,
    #[serde(rename = "CHANNEL")]
    channel: String,
}

/// Load sales records from any CSV reader.
pub fn load_sales<R: Read>(reader: R) -> Result<Vec<SaleRecord>, DatasetError> {
    let mut csv_reader = reader_with_upper_headers(reader, SALES_COLUMNS)?;

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<RawSaleRow>().enumerate() {
        // Line 1 is the header row.
        let line = index + 2;
        let raw = row.map_err(|source| DatasetError::InvalidRow { line, source })?;
        records.push(convert_sale(raw, line)?);
    }

    Ok(records)
}

/// Load sales records from a CSV file on disk.
pub fn load_sales_file(path: impl AsRef<Path>) -> Result<Vec<SaleRecord>, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    load_sales(file)
}

/// Load the customer master from any CSV reader.
///
/// Duplicate customer ids are rejected: the master is the join key for
/// channel enrichment, and a duplicate would silently shadow an earlier
/// assignment.
pub fn load_customers<R: Read>(reader: R) -> Result<Vec<CustomerRecord>, DatasetError> {
    let mut csv_reader = reader_with_upper_headers(reader, CUSTOMER_COLUMNS)?;

    let mut seen: HashSet<CustomerId> = HashSet::new();
    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<RawCustomerRow>().enumerate() {
        let line = index + 2;
        let raw = row.map_err(|source| DatasetError::InvalidRow { line, source })?;
        let customer_id = CustomerId(raw.customer_id);
        if !seen.insert(customer_id.clone()) {
            return Err(DatasetError::DuplicateCustomer {
                line,
                customer_id: customer_id.0,
            });
        }
        records.push(CustomerRecord {
            customer_id,
            channel: Channel(raw.channel),
        });
    }

    Ok(records)
}

/// Load the customer master from a CSV file on disk.
pub fn load_customers_file(path: impl AsRef<Path>) -> Result<Vec<CustomerRecord>, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    load_customers(file)
}

/// Build a CSV reader whose headers have been uppercased, after checking
/// that every required column is present.
fn reader_with_upper_headers<R: Read>(
    reader: R,
    required: &[&str],
) -> Result<csv::Reader<R>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(DatasetError::Header)?;
    let upper: Vec<String> = headers
        .iter()
        .map(|name| name.trim().to_ascii_uppercase())
        .collect();

    for column in required {
        if !upper.iter().any(|name| name.as_str() == *column) {
            return Err(DatasetError::MissingColumn {
                column: (*column).to_string(),
            });
        }
    }

    csv_reader.set_headers(csv::StringRecord::from(upper));
    Ok(csv_reader)
}

fn convert_sale(raw: RawSaleRow, line: usize) -> Result<SaleRecord, DatasetError> {
    let revenue = Decimal::from_str(raw.revenue.trim()).map_err(|_| DatasetError::InvalidRevenue {
        line,
        value: raw.revenue.clone(),
    })?;
    let margin = Margin::parse_percent(&raw.margin)
        .map_err(|source| DatasetError::InvalidValue { line, source })?;

    let record = SaleRecord {
        customer_id: CustomerId(raw.customer_id),
        sku_id: SkuId(raw.sku_id),
        sku_name: raw.sku_name,
        subcategory: raw.subcategory,
        revenue,
        margin,
    };
    record
        .validate()
        .map_err(|source| DatasetError::InvalidValue { line, source })?;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    const SAMPLE_SALES: &str = "\
CUSTOMER_ID,SKU_ID,SKU_NAME,SUBCATEGORY,REVENUE,MARGIN
C-001,SKU-100,Espresso Beans 1kg,Coffee,120.50,22.5%
C-002,SKU-101,Filter Papers,Brewing,15.00,40%
C-001,SKU-100,Espresso Beans 1kg,Coffee,98.20,21%
";

    const SAMPLE_CUSTOMERS: &str = "\
CUSTOMER_ID,CHANNEL
C-001,Retail
C-002,Online
";

    #[test]
    fn loads_well_formed_sales() {
        let records = load_sales(SAMPLE_SALES.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].customer_id, CustomerId("C-001".to_string()));
        assert_eq!(records[0].sku_name, "Espresso Beans 1kg");
        assert_eq!(records[0].revenue, Decimal::new(12050, 2));
        assert_eq!(records[0].margin, Margin::from_fraction(Decimal::new(225, 3)));
        assert_eq!(records[1].margin, Margin::from_fraction(Decimal::new(40, 2)));
    }

    #[test]
    fn header_casing_is_normalised() {
        let csv = "\
customer_id,Sku_Id,sku_name,SubCategory,revenue,Margin
C-009,SKU-7,Mug,Drinkware,9.99,10%
";
        let records = load_sales(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sku_id, SkuId("SKU-7".to_string()));
        assert_eq!(records[0].subcategory, "Drinkware");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "\
CUSTOMER_ID,SKU_ID,SKU_NAME,SUBCATEGORY,REVENUE,MARGIN,REGION
C-001,SKU-1,Kettle,Brewing,50.00,30%,EMEA
";
        let records = load_sales(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_column_fails_before_rows() {
        let csv = "\
CUSTOMER_ID,SKU_ID,SKU_NAME,REVENUE,MARGIN
C-001,SKU-1,Kettle,not-a-number,nope
";
        let err = load_sales(csv.as_bytes()).unwrap_err();

        match err {
            DatasetError::MissingColumn { column } => assert_eq!(column, "SUBCATEGORY"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn malformed_margin_reports_line_number() {
        let csv = "\
CUSTOMER_ID,SKU_ID,SKU_NAME,SUBCATEGORY,REVENUE,MARGIN
C-001,SKU-1,Kettle,Brewing,50.00,30%
C-002,SKU-2,Scale,Brewing,80.00,thirty
";
        let err = load_sales(csv.as_bytes()).unwrap_err();

        match err {
            DatasetError::InvalidValue { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(source, DomainError::MalformedMargin { .. }));
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn margin_without_percent_suffix_is_rejected() {
        let csv = "\
CUSTOMER_ID,SKU_ID,SKU_NAME,SUBCATEGORY,REVENUE,MARGIN
C-001,SKU-1,Kettle,Brewing,50.00,0.35
";
        let err = load_sales(csv.as_bytes()).unwrap_err();

        match err {
            DatasetError::InvalidValue { line, source } => {
                assert_eq!(line, 2);
                assert!(
                    matches!(source, DomainError::MalformedMargin { ref raw } if raw == "0.35")
                );
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn malformed_revenue_reports_offending_value() {
        let csv = "\
CUSTOMER_ID,SKU_ID,SKU_NAME,SUBCATEGORY,REVENUE,MARGIN
C-001,SKU-1,Kettle,Brewing,a lot,30%
";
        let err = load_sales(csv.as_bytes()).unwrap_err();

        match err {
            DatasetError::InvalidRevenue { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "a lot");
            }
            other => panic!("expected InvalidRevenue, got {other:?}"),
        }
    }

    #[test]
    fn negative_revenue_is_rejected() {
        let csv = "\
CUSTOMER_ID,SKU_ID,SKU_NAME,SUBCATEGORY,REVENUE,MARGIN
C-001,SKU-1,Kettle,Brewing,-5.00,30%
";
        let err = load_sales(csv.as_bytes()).unwrap_err();

        match err {
            DatasetError::InvalidValue { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(source, DomainError::NegativeRevenue { .. }));
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn loads_customer_master() {
        let records = load_customers(SAMPLE_CUSTOMERS.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].customer_id, CustomerId("C-001".to_string()));
        assert_eq!(records[0].channel, Channel("Retail".to_string()));
        assert_eq!(records[1].channel, Channel("Online".to_string()));
    }

    #[test]
    fn duplicate_customer_id_is_rejected() {
        let csv = "\
CUSTOMER_ID,CHANNEL
C-001,Retail
C-002,Online
C-001,Wholesale
";
        let err = load_customers(csv.as_bytes()).unwrap_err();

        match err {
            DatasetError::DuplicateCustomer { line, customer_id } => {
                assert_eq!(line, 4);
                assert_eq!(customer_id, "C-001");
            }
            other => panic!("expected DuplicateCustomer, got {other:?}"),
        }
    }

    #[test]
    fn customer_master_missing_channel_column() {
        let csv = "\
CUSTOMER_ID,SEGMENT
C-001,Enterprise
";
        let err = load_customers(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingColumn { column } if column == "CHANNEL"
        ));
    }

    #[test]
    fn file_loaders_read_from_disk() {
        let dir = TempDir::new().unwrap();
        let sales_path = dir.path().join("sales.csv");
        let customers_path = dir.path().join("customers.csv");
        fs::write(&sales_path, SAMPLE_SALES).unwrap();
        fs::write(&customers_path, SAMPLE_CUSTOMERS).unwrap();

        let sales = load_sales_file(&sales_path).unwrap();
        let customers = load_customers_file(&customers_path).unwrap();

        assert_eq!(sales.len(), 3);
        assert_eq!(customers.len(), 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");

        let err = load_sales_file(&path).unwrap_err();
        match err {
            DatasetError::OpenFile { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected OpenFile, got {other:?}"),
        }
    }

    #[test]
    fn values_are_trimmed() {
        let csv = "\
CUSTOMER_ID , CHANNEL
 C-001 , Retail
";
        let records = load_customers(csv.as_bytes()).unwrap();
        assert_eq!(records[0].customer_id, CustomerId("C-001".to_string()));
        assert_eq!(records[0].channel, Channel("Retail".to_string()));
    }
}
