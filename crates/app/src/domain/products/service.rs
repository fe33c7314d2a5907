//! Products service.
//!
//! Catalog maintenance is out of scope for the storefront API; this service
//! exists for stock seeding from the CLI and for inspecting ledger state.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::NewProduct,
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_ledger_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve a single product with its current stock.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product with an initial stock level.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::accounts::records::AccountUuid,
        test::{TestContext, helpers::create_account},
    };

    use super::*;

    fn new_product(merchant: AccountUuid, price: u64, quantity: u32) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            name: "Widget".to_string(),
            price,
            quantity,
            belongs_to: merchant,
        }
    }

    #[tokio::test]
    async fn create_product_returns_stock_and_price() -> TestResult {
        let ctx = TestContext::new().await;
        let merchant = create_account(&ctx, "merchant@example.com").await?;
        let new = new_product(merchant.uuid, 10_00, 5);
        let uuid = new.uuid;

        let product = ctx.products.create_product(new).await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 10_00);
        assert_eq!(product.quantity, 5);
        assert_eq!(product.belongs_to, merchant.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;
        let merchant = create_account(&ctx, "merchant@example.com").await?;
        let created = ctx
            .products
            .create_product(new_product(merchant.uuid, 2_50, 12))
            .await?;

        let product = ctx.products.get_product(created.uuid).await?;

        assert_eq!(product.uuid, created.uuid);
        assert_eq!(product.quantity, 12);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_unknown_merchant_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(new_product(AccountUuid::new(), 100, 1))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let merchant = create_account(&ctx, "merchant@example.com").await?;
        let first = new_product(merchant.uuid, 100, 1);
        let mut second = new_product(merchant.uuid, 200, 2);
        second.uuid = first.uuid;

        ctx.products.create_product(first).await?;

        let result = ctx.products.create_product(second).await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
