//! Storefront Domain Concerns

pub mod accounts;
pub(crate) mod columns;
pub mod products;
pub mod purchases;
