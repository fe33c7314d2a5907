use clap::Args;
use storefront_app::domain::{
    accounts::records::AccountUuid,
    purchases::{
        PgPurchasesService, PurchasesService,
        records::{TicketSummary, TicketUuid},
    },
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ShowTicketArgs {
    /// Buyer account UUID
    #[arg(long)]
    buyer_uuid: Uuid,

    /// Ticket UUID
    #[arg(long)]
    ticket_uuid: Uuid,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ShowTicketArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let lines = PgPurchasesService::new(db)
        .get_ticket(
            AccountUuid::from_uuid(args.buyer_uuid),
            TicketUuid::from_uuid(args.ticket_uuid),
        )
        .await
        .map_err(|error| format!("failed to load ticket: {error}"))?;

    let Some(summary) = TicketSummary::from_lines(&lines) else {
        return Err(format!("ticket {} not found", args.ticket_uuid));
    };

    println!("ticket_uuid: {}", summary.ticket);
    println!("total: {}", summary.total);
    println!("created_at: {}", summary.created_at);
    println!();

    for line in lines {
        println!("line_uuid: {}", line.uuid);
        println!("product_uuid: {}", line.product_uuid);
        println!("quantity: {}", line.quantity);
        println!("price: {}", line.price);
        println!();
    }

    Ok(())
}
