use clap::Args;
use storefront_app::{
    auth::PgAuthService,
    domain::accounts::{
        AccountsService, PgAccountsService, data::NewAccount, records::AccountUuid,
    },
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateAccountArgs {
    /// Contact email; must be unique
    #[arg(long)]
    email: String,

    #[command(flatten)]
    database: DatabaseArgs,

    /// Optional account UUID; generated when omitted
    #[arg(long)]
    account_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateAccountArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let account = PgAccountsService::new(db.pool().clone())
        .create_account(NewAccount {
            uuid: args
                .account_uuid
                .map_or_else(AccountUuid::new, AccountUuid::from_uuid),
            email: args.email,
        })
        .await
        .map_err(|error| format!("failed to create account: {error}"))?;

    let issued = PgAuthService::new(db.pool().clone())
        .issue_api_token(account.uuid)
        .await
        .map_err(|error| format!("failed to issue api token: {error}"))?;

    println!("account_uuid: {}", account.uuid);
    println!("email: {}", account.email);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
