use clap::{Args, Subcommand};

mod list;
mod show;

#[derive(Debug, Args)]
pub(crate) struct TicketCommand {
    #[command(subcommand)]
    command: TicketSubcommand,
}

#[derive(Debug, Subcommand)]
enum TicketSubcommand {
    /// List a buyer's tickets, most recent first
    List(list::ListTicketsArgs),

    /// Show the lines of one ticket
    Show(show::ShowTicketArgs),
}

pub(crate) async fn run(command: TicketCommand) -> Result<(), String> {
    match command.command {
        TicketSubcommand::List(args) => list::run(args).await,
        TicketSubcommand::Show(args) => show::run(args).await,
    }
}
