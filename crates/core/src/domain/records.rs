use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{Channel, CustomerId, SkuId};
use crate::domain::margin::Margin;
use crate::errors::DomainError;

/// One transaction line from the sales extract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub customer_id: CustomerId,
    pub sku_id: SkuId,
    pub sku_name: String,
    pub subcategory: String,
    pub revenue: Decimal,
    pub margin: Margin,
}

impl SaleRecord {
    /// Validate per-record invariants. Revenue is a gross amount and must
    /// not be negative; margins may legitimately be negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.revenue < Decimal::ZERO {
            return Err(DomainError::NegativeRevenue { raw: self.revenue.to_string() });
        }
        Ok(())
    }
}

/// One row from the customer master. `customer_id` is the unique join key;
/// uniqueness is enforced where the file is read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub channel: Channel,
}
