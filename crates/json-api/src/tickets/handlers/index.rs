//! Ticket Index Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::purchases::records::{TicketPage, TicketSummary};

use crate::{extensions::*, tickets::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketSummaryResponse {
    /// The ticket identifier
    pub ticket: Uuid,

    /// Sum of price times quantity at purchase time, in minor units
    pub total: u64,

    /// Number of purchase lines on the ticket
    pub line_count: u32,

    /// When the ticket was created
    pub created_at: String,
}

impl From<TicketSummary> for TicketSummaryResponse {
    fn from(summary: TicketSummary) -> Self {
        Self {
            ticket: summary.ticket.into_uuid(),
            total: summary.total,
            line_count: summary.line_count,
            created_at: summary.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketsResponse {
    /// 1-based page number
    pub page: u32,

    /// Maximum tickets per page
    pub page_size: u32,

    /// Tickets, most recent first
    pub tickets: Vec<TicketSummaryResponse>,
}

impl From<TicketPage> for TicketsResponse {
    fn from(page: TicketPage) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            tickets: page.tickets.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ticket Index Handler
///
/// Returns one page of the caller's tickets.
#[endpoint(
    tags("tickets"),
    summary = "List Tickets",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<TicketsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let account = depot.account_uuid_or_401()?;

    let page = state
        .app
        .purchases
        .list_tickets(account, page.into_inner().unwrap_or(1))
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::purchases::{
        MockPurchasesService, PurchasesServiceError,
        records::{TICKETS_PAGE_SIZE, TicketUuid},
    };

    use crate::test_helpers::{TEST_ACCOUNT_UUID, purchases_service};

    use super::*;

    fn make_service(purchases: MockPurchasesService) -> Service {
        purchases_service(purchases, Router::with_path("tickets").get(handler))
    }

    fn make_page(page: u32, tickets: Vec<TicketSummary>) -> TicketPage {
        TicketPage {
            page,
            page_size: TICKETS_PAGE_SIZE,
            tickets,
        }
    }

    #[tokio::test]
    async fn test_index_defaults_to_first_page() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_list_tickets()
            .once()
            .withf(|buyer, page| *buyer == TEST_ACCOUNT_UUID && *page == 1)
            .return_once(|_, page| Ok(make_page(page, vec![])));

        let response: TicketsResponse = TestClient::get("http://example.com/tickets")
            .send(&make_service(purchases))
            .await
            .take_json()
            .await?;

        assert_eq!(response.page, 1);
        assert_eq!(response.page_size, TICKETS_PAGE_SIZE);
        assert!(response.tickets.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_page_and_returns_summaries() -> TestResult {
        let ticket = TicketUuid::new();

        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_list_tickets()
            .once()
            .withf(|_, page| *page == 3)
            .return_once(move |_, page| {
                Ok(make_page(
                    page,
                    vec![TicketSummary {
                        ticket,
                        total: 30_00,
                        line_count: 2,
                        created_at: Timestamp::UNIX_EPOCH,
                    }],
                ))
            });

        let response: TicketsResponse = TestClient::get("http://example.com/tickets?page=3")
            .send(&make_service(purchases))
            .await
            .take_json()
            .await?;

        assert_eq!(response.page, 3);
        assert_eq!(response.tickets.len(), 1, "expected one ticket");
        assert!(response.tickets.iter().all(|summary| {
            summary.ticket == ticket.into_uuid() && summary.total == 30_00 && summary.line_count == 2
        }));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_unavailable_returns_503() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        purchases.expect_list_tickets().once().return_once(|_, _| {
            Err(PurchasesServiceError::Connectivity(sqlx::Error::PoolClosed))
        });

        let res = TestClient::get("http://example.com/tickets")
            .send(&make_service(purchases))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }
}
