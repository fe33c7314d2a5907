//! Purchases Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    accounts::records::AccountUuid,
    columns::{amount_to_sql, quantity_to_sql, try_get_amount, try_get_quantity},
    products::records::ProductUuid,
    purchases::{
        data::NewPurchaseLine,
        records::{PurchaseLineRecord, PurchaseLineUuid, TicketSummary, TicketUuid},
    },
};

const CREATE_PURCHASE_LINE_SQL: &str = include_str!("sql/create_purchase_line.sql");
const LIST_TICKETS_SQL: &str = include_str!("sql/list_tickets.sql");
const GET_TICKET_LINES_SQL: &str = include_str!("sql/get_ticket_lines.sql");
const DELETE_PURCHASE_LINE_SQL: &str = include_str!("sql/delete_purchase_line.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPurchasesRepository;

impl PgPurchasesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: NewPurchaseLine,
    ) -> Result<PurchaseLineRecord, sqlx::Error> {
        query_as::<Postgres, PurchaseLineRecord>(CREATE_PURCHASE_LINE_SQL)
            .bind(line.uuid.into_uuid())
            .bind(line.ticket.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(quantity_to_sql(line.quantity)?)
            .bind(amount_to_sql(line.price)?)
            .bind(line.purchased_by.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_tickets(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        buyer: AccountUuid,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<TicketSummary>, sqlx::Error> {
        let offset = i64::try_from(offset).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query_as::<Postgres, TicketSummary>(LIST_TICKETS_SQL)
            .bind(buyer.into_uuid())
            .bind(i64::from(limit))
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_ticket_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        buyer: AccountUuid,
        ticket: TicketUuid,
    ) -> Result<Vec<PurchaseLineRecord>, sqlx::Error> {
        query_as::<Postgres, PurchaseLineRecord>(GET_TICKET_LINES_SQL)
            .bind(ticket.into_uuid())
            .bind(buyer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Delete one line, matched by its own id and its ticket.
    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: PurchaseLineUuid,
        ticket: TicketUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PURCHASE_LINE_SQL)
            .bind(line.into_uuid())
            .bind(ticket.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PurchaseLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PurchaseLineUuid::from_uuid(row.try_get("uuid")?),
            ticket: TicketUuid::from_uuid(row.try_get("ticket")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            price: try_get_amount(row, "price")?,
            purchased_by: AccountUuid::from_uuid(row.try_get("purchased_by")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TicketSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            ticket: TicketUuid::from_uuid(row.try_get("ticket")?),
            total: try_get_amount(row, "total")?,
            line_count: try_get_quantity(row, "line_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
