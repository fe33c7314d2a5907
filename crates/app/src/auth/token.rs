//! API token generation and hashing.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "sf";

/// Generate a new random bearer token.
#[must_use]
pub fn generate_api_token() -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

/// Hex-encoded SHA-256 digest stored in place of the raw token.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
