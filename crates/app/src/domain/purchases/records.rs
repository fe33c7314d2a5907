//! Purchase Records

use jiff::Timestamp;

use crate::{
    domain::{accounts::records::AccountUuid, products::records::ProductUuid},
    uuids::TypedUuid,
};

/// Purchase Line UUID
pub type PurchaseLineUuid = TypedUuid<PurchaseLineRecord>;

/// Ticket marker; tickets have no row of their own.
#[derive(Debug)]
pub struct Ticket;

/// Ticket UUID
pub type TicketUuid = TypedUuid<Ticket>;

/// Number of ticket summaries returned per page.
pub const TICKETS_PAGE_SIZE: u32 = 20;

/// Purchase Line Record
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseLineRecord {
    pub uuid: PurchaseLineUuid,
    pub ticket: TicketUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,

    /// Unit price captured when the line was written.
    pub price: u64,
    pub purchased_by: AccountUuid,
    pub created_at: Timestamp,
}

impl PurchaseLineRecord {
    /// Line total at the snapshot price.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Ticket Summary
#[derive(Debug, Clone, PartialEq)]
pub struct TicketSummary {
    pub ticket: TicketUuid,

    /// Sum of `price * quantity` over the ticket's lines.
    pub total: u64,
    pub line_count: u32,
    pub created_at: Timestamp,
}

impl TicketSummary {
    /// Summarise lines already fetched for a single ticket.
    ///
    /// Returns `None` for an empty slice.
    #[must_use]
    pub fn from_lines(lines: &[PurchaseLineRecord]) -> Option<Self> {
        let first = lines.first()?;

        Some(Self {
            ticket: first.ticket,
            total: lines
                .iter()
                .map(PurchaseLineRecord::subtotal)
                .fold(0, u64::saturating_add),
            line_count: u32::try_from(lines.len()).unwrap_or(u32::MAX),
            created_at: lines
                .iter()
                .map(|line| line.created_at)
                .max()
                .unwrap_or(first.created_at),
        })
    }
}

/// One page of a buyer's tickets, most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketPage {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub tickets: Vec<TicketSummary>,
}
