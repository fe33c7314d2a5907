use clap::Args;
use storefront_app::domain::{
    accounts::records::AccountUuid,
    purchases::{PgPurchasesService, PurchasesService},
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListTicketsArgs {
    /// Buyer account UUID
    #[arg(long)]
    buyer_uuid: Uuid,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: u32,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ListTicketsArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let page = PgPurchasesService::new(db)
        .list_tickets(AccountUuid::from_uuid(args.buyer_uuid), args.page)
        .await
        .map_err(|error| format!("failed to list tickets: {error}"))?;

    if page.tickets.is_empty() {
        println!("no tickets on page {} for buyer {}", page.page, args.buyer_uuid);
        return Ok(());
    }

    for ticket in page.tickets {
        println!("ticket_uuid: {}", ticket.ticket);
        println!("total: {}", ticket.total);
        println!("lines: {}", ticket.line_count);
        println!("created_at: {}", ticket.created_at);
        println!();
    }

    Ok(())
}
