//! App Router

use salvo::Router;

use crate::{auth, tickets};

/// Authenticated ticket routes.
pub(crate) fn app_router() -> Router {
    Router::new().hoop(auth::middleware::handler).push(
        Router::with_path("tickets")
            .get(tickets::index::handler)
            .post(tickets::create::handler)
            .push(
                Router::with_path("{ticket}")
                    .get(tickets::get::handler)
                    .delete(tickets::delete::handler),
            ),
    )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::TestClient,
    };
    use storefront_app::auth::{AuthServiceError, MockAuthService};
    use testresult::TestResult;

    use crate::test_helpers::state_with_auth;

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn ticket_routes_require_a_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com/tickets")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_cannot_cancel() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/tickets/{}",
            uuid::Uuid::now_v7()
        ))
        .add_header(AUTHORIZATION, "Bearer sf_revoked", true)
        .send(&make_service(auth))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
