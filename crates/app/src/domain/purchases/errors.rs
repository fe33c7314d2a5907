//! Purchases service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::records::ProductUuid;

/// `deadlock_detected`
const DEADLOCK_DETECTED: &str = "40P01";

/// `lock_not_available`, raised when `lock_timeout` expires.
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// `serialization_failure`
const SERIALIZATION_FAILURE: &str = "40001";

#[derive(Debug, Error)]
pub enum PurchasesServiceError {
    #[error("ticket has no items")]
    EmptyTicket,

    #[error("quantity for product {product} must be greater than zero")]
    InvalidQuantity { product: ProductUuid },

    #[error("product {0} not found")]
    UnknownProduct(ProductUuid),

    #[error("insufficient stock for {0}")]
    InsufficientStock(String),

    #[error("ticket not found")]
    NotFound,

    #[error("ticket can no longer be cancelled")]
    CancellationWindowElapsed,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage unavailable")]
    Connectivity(#[source] Error),

    #[error("conflicting concurrent update")]
    ConcurrencyConflict(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl PurchasesServiceError {
    /// Whether the request itself was at fault.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyTicket | Self::InvalidQuantity { .. } | Self::UnknownProduct(_)
        )
    }

    /// Whether the whole call may be retried unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict(_))
    }
}

impl From<Error> for PurchasesServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => return Self::NotFound,
            Error::Io(_)
            | Error::Tls(_)
            | Error::Protocol(_)
            | Error::PoolTimedOut
            | Error::PoolClosed
            | Error::WorkerCrashed => return Self::Connectivity(error),
            _ => {}
        }

        let code = error
            .as_database_error()
            .and_then(DatabaseError::code)
            .map(|code| code.into_owned());

        if matches!(
            code.as_deref(),
            Some(DEADLOCK_DETECTED | LOCK_NOT_AVAILABLE | SERIALIZATION_FAILURE)
        ) {
            return Self::ConcurrencyConflict(error);
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}
