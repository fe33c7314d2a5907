use clap::{Args, Parser, Subcommand};
use storefront_app::database::{self, DEFAULT_MAX_CONNECTIONS, Db};

mod account;
mod product;
mod ticket;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Account(account::AccountCommand),
    Product(product::ProductCommand),
    Ticket(ticket::TicketCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Account(command) => account::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Ticket(command) => ticket::run(command).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    /// Connect and bring the schema up to date.
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        let pool = database::connect(&self.database_url, DEFAULT_MAX_CONNECTIONS)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        database::migrate(&pool)
            .await
            .map_err(|error| format!("failed to apply migrations: {error}"))?;

        Ok(Db::new(pool))
    }
}
