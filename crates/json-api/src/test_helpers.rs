//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        accounts::records::AccountUuid,
        products::records::ProductUuid,
        purchases::{
            MockPurchasesService,
            records::{PurchaseLineRecord, PurchaseLineUuid, TicketUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ACCOUNT_UUID: AccountUuid = AccountUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_account(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_account_uuid(TEST_ACCOUNT_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_purchases_mock() -> MockPurchasesService {
    let mut purchases = MockPurchasesService::new();

    purchases.expect_create_ticket().never();
    purchases.expect_list_tickets().never();
    purchases.expect_get_ticket().never();
    purchases.expect_reverse_lines().never();
    purchases.expect_cancel_ticket().never();

    purchases
}

fn state(purchases: MockPurchasesService, auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        purchases: Arc::new(purchases),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_purchases(purchases: MockPurchasesService) -> Arc<State> {
    state(purchases, strict_auth_mock())
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_purchases_mock(), auth)
}

/// Mount `route` behind an already-authenticated test account.
pub(crate) fn purchases_service(purchases: MockPurchasesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_purchases(purchases)))
            .hoop(inject_account)
            .push(route),
    )
}

pub(crate) fn make_line(ticket: TicketUuid, price: u64, quantity: u32) -> PurchaseLineRecord {
    PurchaseLineRecord {
        uuid: PurchaseLineUuid::new(),
        ticket,
        product_uuid: ProductUuid::new(),
        quantity,
        price,
        purchased_by: TEST_ACCOUNT_UUID,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
