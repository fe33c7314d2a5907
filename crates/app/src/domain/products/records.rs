//! Product Records

use jiff::Timestamp;

use crate::{domain::accounts::records::AccountUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,

    /// Unit price in minor currency units.
    pub price: u64,

    /// Units in stock.
    pub quantity: u32,

    /// Owning merchant.
    pub belongs_to: AccountUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
