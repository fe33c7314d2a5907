//! Products
//!
//! The product rows double as the inventory ledger: `quantity` is the stock
//! counter debited by purchases and re-credited by reversals.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use service::*;
