//! Create Ticket Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    products::records::ProductUuid, purchases::data::NewTicketItem,
};

use crate::{extensions::*, tickets::errors::into_status_error};

/// Requested Ticket Item
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketItemRequest {
    /// The product to buy
    pub product: Uuid,

    /// Units to buy; must be positive
    pub quantity: i64,
}

impl From<TicketItemRequest> for NewTicketItem {
    fn from(item: TicketItemRequest) -> Self {
        NewTicketItem {
            product: ProductUuid::from_uuid(item.product),
            quantity: item.quantity,
        }
    }
}

/// Create Ticket Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketCreatedResponse {
    /// Created ticket UUID
    pub ticket: Uuid,
}

/// Create Ticket Handler
///
/// Buys every requested item in one all-or-nothing ticket.
#[endpoint(
    tags("tickets"),
    summary = "Create Ticket",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Ticket created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid items or insufficient stock"),
        (status_code = StatusCode::CONFLICT, description = "Lost a lock race; safe to retry"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Storage unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "tickets.create",
    skip(json, depot, res),
    fields(
        account_uuid = tracing::field::Empty,
        ticket_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<Vec<TicketItemRequest>>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TicketCreatedResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let account = depot.account_uuid_or_401()?;

    let span = tracing::Span::current();

    span.record("account_uuid", tracing::field::display(account));

    let items = json.into_inner().into_iter().map(Into::into).collect();

    let ticket = state
        .app
        .purchases
        .create_ticket(account, items)
        .await
        .map_err(into_status_error)?
        .into_uuid();

    span.record("ticket_uuid", tracing::field::display(ticket));

    res.add_header(LOCATION, format!("/tickets/{ticket}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(TicketCreatedResponse { ticket }))
}
