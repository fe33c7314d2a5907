//! Storefront purchase ledger: accounts, stock and tickets.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

pub mod uuids;
