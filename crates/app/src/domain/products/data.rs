//! Products Data

use crate::domain::{accounts::records::AccountUuid, products::records::ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub belongs_to: AccountUuid,
}
