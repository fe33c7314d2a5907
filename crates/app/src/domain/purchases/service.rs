//! Purchases service.
//!
//! Ticket creation and reversal each run as one flat ledger transaction.
//! Product rows are locked with `SELECT ... FOR UPDATE` in the order the items
//! are processed; no global lock order is imposed, so a deadlock between two
//! tickets surfaces as [`PurchasesServiceError::ConcurrencyConflict`] and the
//! caller may retry the whole call. Nothing is retried here.
//!
//! Dropping a returned future mid-flight drops its transaction handle, which
//! rolls the transaction back. Explicit failures roll back before returning.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info, warn};

use crate::{
    database::{self, Db},
    domain::{
        accounts::records::AccountUuid,
        products::repository::PgProductsRepository,
        purchases::{
            data::{NewPurchaseLine, NewTicketItem, TicketItem, coalesce_items},
            errors::PurchasesServiceError,
            records::{
                PurchaseLineRecord, PurchaseLineUuid, TICKETS_PAGE_SIZE, TicketPage,
                TicketSummary, TicketUuid,
            },
            repository::PgPurchasesRepository,
        },
    },
};

/// How long after purchase a buyer may cancel a ticket.
pub const DEFAULT_CANCELLATION_WINDOW: SignedDuration = SignedDuration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct PgPurchasesService {
    db: Db,
    products: PgProductsRepository,
    purchases: PgPurchasesRepository,
    cancellation_window: SignedDuration,
}

impl PgPurchasesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            products: PgProductsRepository::new(),
            purchases: PgPurchasesRepository::new(),
            cancellation_window: DEFAULT_CANCELLATION_WINDOW,
        }
    }

    #[must_use]
    pub fn with_cancellation_window(mut self, cancellation_window: SignedDuration) -> Self {
        self.cancellation_window = cancellation_window;
        self
    }

    /// Lock, check, record and debit each item in order.
    async fn apply_ticket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        buyer: AccountUuid,
        ticket: TicketUuid,
        items: &[TicketItem],
    ) -> Result<(), PurchasesServiceError> {
        for item in items {
            let product = self
                .products
                .lock_product(tx, item.product)
                .await?
                .ok_or(PurchasesServiceError::UnknownProduct(item.product))?;

            if product.quantity < item.quantity {
                return Err(PurchasesServiceError::InsufficientStock(product.name));
            }

            self.purchases
                .create_line(
                    tx,
                    NewPurchaseLine {
                        uuid: PurchaseLineUuid::new(),
                        ticket,
                        product_uuid: product.uuid,
                        quantity: item.quantity,
                        price: product.price,
                        purchased_by: buyer,
                    },
                )
                .await?;

            let rows_affected = self
                .products
                .decrement_quantity(tx, product.uuid, item.quantity)
                .await?;

            if rows_affected == 0 {
                return Err(PurchasesServiceError::UnknownProduct(product.uuid));
            }
        }

        Ok(())
    }

    /// Credit stock back and delete each line.
    async fn apply_reversal(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lines: &[PurchaseLineRecord],
    ) -> Result<(), PurchasesServiceError> {
        for line in lines {
            let credited = self
                .products
                .credit_quantity(tx, line.product_uuid, line.quantity)
                .await?;

            if credited == 0 {
                return Err(PurchasesServiceError::UnknownProduct(line.product_uuid));
            }

            // Zero rows means a concurrent reversal already removed the line.
            let deleted = self
                .purchases
                .delete_line(tx, line.uuid, line.ticket)
                .await?;

            if deleted == 0 {
                return Err(PurchasesServiceError::NotFound);
            }
        }

        Ok(())
    }
}

#[async_trait]
impl PurchasesService for PgPurchasesService {
    #[tracing::instrument(
        name = "purchases.service.create_ticket",
        skip(self, items),
        fields(
            buyer_uuid = %buyer,
            ticket_uuid = tracing::field::Empty,
            item_count = tracing::field::Empty
        ),
        err
    )]
    async fn create_ticket(
        &self,
        buyer: AccountUuid,
        items: Vec<NewTicketItem>,
    ) -> Result<TicketUuid, PurchasesServiceError> {
        let items = coalesce_items(&items)?;
        let ticket = TicketUuid::new();

        let span = Span::current();

        span.record("ticket_uuid", tracing::field::display(ticket));
        span.record("item_count", items.len());

        let mut tx = self.db.begin_ledger_transaction().await?;

        match self.apply_ticket(&mut tx, buyer, ticket, &items).await {
            Ok(()) => {
                tx.commit().await?;

                info!("ticket created");

                Ok(ticket)
            }
            Err(error) => {
                database::rollback(tx).await;

                warn!("ticket rejected: {error}");

                Err(error)
            }
        }
    }

    async fn list_tickets(
        &self,
        buyer: AccountUuid,
        page: u32,
    ) -> Result<TicketPage, PurchasesServiceError> {
        let page = page.max(1);
        let offset = u64::from(page - 1) * u64::from(TICKETS_PAGE_SIZE);

        let mut tx = self.db.begin_read_transaction().await?;

        let tickets = self
            .purchases
            .list_tickets(&mut tx, buyer, TICKETS_PAGE_SIZE, offset)
            .await?;

        tx.commit().await?;

        Ok(TicketPage {
            page,
            page_size: TICKETS_PAGE_SIZE,
            tickets,
        })
    }

    async fn get_ticket(
        &self,
        buyer: AccountUuid,
        ticket: TicketUuid,
    ) -> Result<Vec<PurchaseLineRecord>, PurchasesServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let lines = self
            .purchases
            .get_ticket_lines(&mut tx, buyer, ticket)
            .await?;

        tx.commit().await?;

        Ok(lines)
    }

    #[tracing::instrument(
        name = "purchases.service.reverse_lines",
        skip(self, lines),
        fields(line_count = lines.len()),
        err
    )]
    async fn reverse_lines(
        &self,
        lines: Vec<PurchaseLineRecord>,
    ) -> Result<(), PurchasesServiceError> {
        if lines.is_empty() {
            return Ok(());
        }

        let mut tx = self.db.begin_ledger_transaction().await?;

        match self.apply_reversal(&mut tx, &lines).await {
            Ok(()) => {
                tx.commit().await?;

                info!(lines = lines.len(), "purchase lines reversed");

                Ok(())
            }
            Err(error) => {
                database::rollback(tx).await;

                warn!("reversal aborted: {error}");

                Err(error)
            }
        }
    }

    #[tracing::instrument(
        name = "purchases.service.cancel_ticket",
        skip(self, buyer, ticket),
        fields(buyer_uuid = %buyer, ticket_uuid = %ticket),
        err
    )]
    async fn cancel_ticket(
        &self,
        buyer: AccountUuid,
        ticket: TicketUuid,
        now: Timestamp,
    ) -> Result<(), PurchasesServiceError> {
        let lines = self.get_ticket(buyer, ticket).await?;

        let summary = TicketSummary::from_lines(&lines).ok_or(PurchasesServiceError::NotFound)?;

        if now.duration_since(summary.created_at) > self.cancellation_window {
            return Err(PurchasesServiceError::CancellationWindowElapsed);
        }

        self.reverse_lines(lines).await
    }
}

#[automock]
#[async_trait]
pub trait PurchasesService: Send + Sync {
    /// Atomically debit stock for every item and record them under a new ticket.
    ///
    /// Either every line is committed or nothing is.
    async fn create_ticket(
        &self,
        buyer: AccountUuid,
        items: Vec<NewTicketItem>,
    ) -> Result<TicketUuid, PurchasesServiceError>;

    /// One page of the buyer's ticket summaries, most recent first.
    ///
    /// Page numbers start at 1; 0 is treated as 1.
    async fn list_tickets(
        &self,
        buyer: AccountUuid,
        page: u32,
    ) -> Result<TicketPage, PurchasesServiceError>;

    /// The buyer's lines for a ticket. Empty when nothing matches.
    async fn get_ticket(
        &self,
        buyer: AccountUuid,
        ticket: TicketUuid,
    ) -> Result<Vec<PurchaseLineRecord>, PurchasesServiceError>;

    /// Re-credit stock and delete exactly the given lines, all or nothing.
    ///
    /// Performs no ownership or age checks.
    async fn reverse_lines(&self, lines: Vec<PurchaseLineRecord>)
    -> Result<(), PurchasesServiceError>;

    /// Reverse a buyer's ticket if it is still inside the cancellation window.
    async fn cancel_ticket(
        &self,
        buyer: AccountUuid,
        ticket: TicketUuid,
        now: Timestamp,
    ) -> Result<(), PurchasesServiceError>;
}
