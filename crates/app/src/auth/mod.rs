//! Authentication
//!
//! Bearer tokens are opaque strings; only their SHA-256 digest is stored.

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
