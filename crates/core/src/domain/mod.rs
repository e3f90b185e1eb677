pub mod ids;
pub mod margin;
pub mod records;

pub use ids::{Channel, CustomerId, SkuId};
pub use margin::Margin;
pub use records::{CustomerRecord, SaleRecord};
