//! App Context

use std::{sync::Arc, time::Duration};

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::purchases::{PgPurchasesService, PurchasesService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Settings needed to wire the services together.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub lock_timeout: Duration,
    pub cancellation_window: SignedDuration,
}

#[derive(Clone)]
pub struct AppContext {
    pub purchases: Arc<dyn PurchasesService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Connect, migrate and build the service graph.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url, settings.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let db = Db::new(pool.clone()).with_lock_timeout(settings.lock_timeout);

        Ok(Self {
            purchases: Arc::new(
                PgPurchasesService::new(db)
                    .with_cancellation_window(settings.cancellation_window),
            ),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
