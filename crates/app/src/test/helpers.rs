//! Test Helpers

use crate::{
    domain::{
        accounts::{
            AccountsService, AccountsServiceError,
            data::NewAccount,
            records::{AccountRecord, AccountUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_account(
    ctx: &TestContext,
    email: &str,
) -> Result<AccountRecord, AccountsServiceError> {
    ctx.accounts
        .create_account(NewAccount {
            uuid: AccountUuid::new(),
            email: email.to_string(),
        })
        .await
}

/// Create a product owned by a throwaway merchant account.
pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
    quantity: u32,
) -> Result<ProductRecord, ProductsServiceError> {
    let merchant = create_account(ctx, &format!("merchant-{}@example.com", AccountUuid::new()))
        .await
        .expect("Failed to create merchant account");

    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            price,
            quantity,
            belongs_to: merchant.uuid,
        })
        .await
}

pub(crate) async fn purchase_count(ctx: &TestContext) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM purchases")
        .fetch_one(ctx.db.pool())
        .await
}
