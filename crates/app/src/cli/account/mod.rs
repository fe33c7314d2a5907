use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct AccountCommand {
    #[command(subcommand)]
    command: AccountSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccountSubcommand {
    /// Create an account and issue its first API token
    Create(create::CreateAccountArgs),
}

pub(crate) async fn run(command: AccountCommand) -> Result<(), String> {
    match command.command {
        AccountSubcommand::Create(args) => create::run(args).await,
    }
}
