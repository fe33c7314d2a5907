//! Get Ticket Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::purchases::records::{
    PurchaseLineRecord, TicketSummary, TicketUuid,
};

use crate::{extensions::*, tickets::errors::into_status_error};

/// Ticket Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketResponse {
    /// The ticket identifier
    pub ticket: Uuid,

    /// Sum of line subtotals, in minor units
    pub total: u64,

    /// When the ticket was created
    pub created_at: String,

    /// The purchase lines on the ticket
    pub lines: Vec<PurchaseLineResponse>,
}

/// Purchase Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseLineResponse {
    pub uuid: Uuid,
    pub product: Uuid,
    pub quantity: u32,

    /// Unit price captured at purchase time
    pub price: u64,
    pub subtotal: u64,
}

impl From<PurchaseLineRecord> for PurchaseLineResponse {
    fn from(line: PurchaseLineRecord) -> Self {
        Self {
            uuid: line.uuid.into_uuid(),
            product: line.product_uuid.into_uuid(),
            quantity: line.quantity,
            price: line.price,
            subtotal: line.subtotal(),
        }
    }
}

/// Get Ticket Handler
///
/// Returns a ticket's lines and snapshot total.
#[endpoint(
    tags("tickets"),
    summary = "Get Ticket",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Ticket found"),
        (status_code = StatusCode::NOT_FOUND, description = "Ticket not found"),
    ),
)]
pub(crate) async fn handler(
    ticket: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TicketResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let account = depot.account_uuid_or_401()?;

    let lines = state
        .app
        .purchases
        .get_ticket(account, TicketUuid::from_uuid(ticket.into_inner()))
        .await
        .map_err(into_status_error)?;

    let summary = TicketSummary::from_lines(&lines)
        .ok_or_else(|| StatusError::not_found().brief("Ticket not found"))?;

    Ok(Json(TicketResponse {
        ticket: summary.ticket.into_uuid(),
        total: summary.total,
        created_at: summary.created_at.to_string(),
        lines: lines.into_iter().map(Into::into).collect(),
    }))
}
