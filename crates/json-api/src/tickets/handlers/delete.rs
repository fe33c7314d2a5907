//! Cancel Ticket Handler

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::domain::purchases::records::TicketUuid;

use crate::{extensions::*, tickets::errors::into_status_error};

/// Cancel Ticket Handler
///
/// Restores stock and removes the ticket while the cancellation window is open.
#[endpoint(
    tags("tickets"),
    summary = "Cancel Ticket",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Ticket cancelled"),
        (status_code = StatusCode::NOT_FOUND, description = "Ticket not found"),
        (status_code = StatusCode::CONFLICT, description = "Cancellation window elapsed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "tickets.delete",
    skip(ticket, depot),
    fields(
        account_uuid = tracing::field::Empty,
        ticket_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    ticket: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let account = depot.account_uuid_or_401()?;
    let ticket = TicketUuid::from_uuid(ticket.into_inner());

    let span = tracing::Span::current();

    span.record("account_uuid", tracing::field::display(account));
    span.record("ticket_uuid", tracing::field::display(ticket));

    state
        .app
        .purchases
        .cancel_ticket(account, ticket, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    tracing::info!(ticket_uuid = %ticket, "cancelled ticket");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::purchases::{MockPurchasesService, PurchasesServiceError};

    use crate::test_helpers::{TEST_ACCOUNT_UUID, purchases_service};

    use super::*;

    fn make_service(purchases: MockPurchasesService) -> Service {
        purchases_service(
            purchases,
            Router::with_path("tickets/{ticket}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_returns_200() -> TestResult {
        let ticket = TicketUuid::new();
        let before = Timestamp::now();

        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_cancel_ticket()
            .once()
            .withf(move |buyer, t, now| {
                *buyer == TEST_ACCOUNT_UUID && *t == ticket && *now >= before
            })
            .return_once(|_, _, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/tickets/{ticket}"))
            .send(&make_service(purchases))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_ticket_returns_404() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_cancel_ticket()
            .once()
            .return_once(|_, _, _| Err(PurchasesServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/tickets/{}", Uuid::now_v7()))
            .send(&make_service(purchases))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_after_window_returns_409() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_cancel_ticket()
            .once()
            .return_once(|_, _, _| Err(PurchasesServiceError::CancellationWindowElapsed));

        let res = TestClient::delete(format!("http://example.com/tickets/{}", Uuid::now_v7()))
            .send(&make_service(purchases))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
