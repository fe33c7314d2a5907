use clap::Args;
use storefront_app::domain::{
    accounts::records::AccountUuid,
    products::{PgProductsService, ProductsService, data::NewProduct, records::ProductUuid},
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Unit price in minor currency units
    #[arg(long)]
    price: u64,

    /// Units in stock
    #[arg(long)]
    quantity: u32,

    /// Owning merchant account
    #[arg(long)]
    merchant_uuid: Uuid,

    #[command(flatten)]
    database: DatabaseArgs,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let product = PgProductsService::new(db)
        .create_product(NewProduct {
            uuid: args
                .product_uuid
                .map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: args.name,
            price: args.price,
            quantity: args.quantity,
            belongs_to: AccountUuid::from_uuid(args.merchant_uuid),
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price: {}", product.price);
    println!("quantity: {}", product.quantity);

    Ok(())
}
