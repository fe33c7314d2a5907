//! Purchase Data

use smallvec::SmallVec;

use crate::domain::{
    accounts::records::AccountUuid,
    products::records::ProductUuid,
    purchases::{
        errors::PurchasesServiceError,
        records::{PurchaseLineUuid, TicketUuid},
    },
};

/// One requested item of a new ticket, as supplied by the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTicketItem {
    pub product: ProductUuid,

    /// Requested units. Signed so that non-positive requests can be reported.
    pub quantity: i64,
}

/// A validated item: one per distinct product, positive quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketItem {
    pub product: ProductUuid,
    pub quantity: u32,
}

/// Validated items in first-appearance order.
pub type TicketItems = SmallVec<[TicketItem; 8]>;

/// New Purchase Line Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchaseLine {
    pub uuid: PurchaseLineUuid,
    pub ticket: TicketUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price: u64,
    pub purchased_by: AccountUuid,
}

/// Validate requested items and merge repeated products.
///
/// Every requested quantity must be positive. Repeated references to one
/// product are summed into the position of its first appearance, so a ticket
/// never locks the same row twice.
///
/// # Errors
///
/// Returns [`PurchasesServiceError::EmptyTicket`] for an empty request and
/// [`PurchasesServiceError::InvalidQuantity`] for the first non-positive or
/// out-of-range quantity.
pub fn coalesce_items(items: &[NewTicketItem]) -> Result<TicketItems, PurchasesServiceError> {
    if items.is_empty() {
        return Err(PurchasesServiceError::EmptyTicket);
    }

    let mut coalesced = TicketItems::new();

    for item in items {
        let invalid = || PurchasesServiceError::InvalidQuantity {
            product: item.product,
        };

        if item.quantity <= 0 {
            return Err(invalid());
        }

        let quantity = u32::try_from(item.quantity).map_err(|_overflow| invalid())?;

        if let Some(existing) = coalesced
            .iter_mut()
            .find(|existing| existing.product == item.product)
        {
            existing.quantity = existing.quantity.checked_add(quantity).ok_or_else(invalid)?;
        } else {
            coalesced.push(TicketItem {
                product: item.product,
                quantity,
            });
        }
    }

    Ok(coalesced)
}
