//! Products Repository
//!
//! Every method runs against a caller-owned transaction. Row locks taken by
//! [`PgProductsRepository::lock_product`] are held until that transaction
//! commits or rolls back.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;

use crate::domain::{
    accounts::records::AccountUuid,
    columns::{amount_to_sql, quantity_to_sql, try_get_amount, try_get_quantity},
    products::{
        data::NewProduct,
        records::{ProductRecord, ProductUuid},
    },
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const DECREMENT_QUANTITY_SQL: &str = include_str!("sql/decrement_quantity.sql");
const CREDIT_QUANTITY_SQL: &str = include_str!("sql/credit_quantity.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(amount_to_sql(product.price)?)
            .bind(quantity_to_sql(product.quantity)?)
            .bind(product.belongs_to.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Read a product and take an exclusive row lock on it.
    ///
    /// Blocks while another transaction holds the lock, up to the
    /// transaction's `lock_timeout`.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        debug!(product_uuid = %product, "locking product row");

        query_as::<Postgres, ProductRecord>(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Debit stock. Callers must hold the row lock and have checked availability.
    pub(crate) async fn decrement_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_QUANTITY_SQL)
            .bind(product.into_uuid())
            .bind(quantity_to_sql(quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn credit_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CREDIT_QUANTITY_SQL)
            .bind(product.into_uuid())
            .bind(quantity_to_sql(quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            quantity: try_get_quantity(row, "quantity")?,
            belongs_to: AccountUuid::from_uuid(row.try_get("belongs_to")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
