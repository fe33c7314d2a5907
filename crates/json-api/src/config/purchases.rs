//! Purchases Config

use clap::Args;

/// Ticket lifecycle settings.
#[derive(Debug, Args)]
pub struct PurchasesConfig {
    /// Seconds after purchase during which a buyer may cancel a ticket
    #[arg(long, env = "CANCELLATION_WINDOW_SECONDS", default_value_t = 3_600)]
    pub cancellation_window_seconds: u32,
}
