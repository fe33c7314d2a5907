//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use storefront_app::domain::purchases::PurchasesServiceError;

pub(crate) fn into_status_error(error: PurchasesServiceError) -> StatusError {
    match error {
        PurchasesServiceError::EmptyTicket => {
            StatusError::bad_request().brief("Ticket has no items")
        }
        PurchasesServiceError::InvalidQuantity { .. }
        | PurchasesServiceError::UnknownProduct(_)
        | PurchasesServiceError::InsufficientStock(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        PurchasesServiceError::InvalidReference | PurchasesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid ticket payload")
        }
        PurchasesServiceError::NotFound => StatusError::not_found().brief("Ticket not found"),
        PurchasesServiceError::CancellationWindowElapsed => {
            StatusError::conflict().brief("Ticket can no longer be cancelled")
        }
        PurchasesServiceError::ConcurrencyConflict(source) => {
            warn!("ticket lost a lock race: {source}");

            StatusError::conflict().brief("Conflicting concurrent purchase, retry the request")
        }
        PurchasesServiceError::Connectivity(source) => {
            error!("storage unavailable: {source}");

            StatusError::service_unavailable()
        }
        PurchasesServiceError::Sql(source) => {
            error!("ticket storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
