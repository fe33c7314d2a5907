//! Purchases
//!
//! Tickets group the purchase lines written by one checkout. A ticket is not
//! stored on its own; it is the set of lines sharing a `ticket` value.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::PurchasesServiceError;
pub use service::*;
