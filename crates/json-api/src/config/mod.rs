//! Server configuration module

use std::time::Duration;

use clap::Parser;
use jiff::SignedDuration;
use storefront_app::context::AppSettings;

use crate::config::{
    db::DatabaseConfig, logging::LoggingConfig, purchases::PurchasesConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod purchases;
pub(crate) mod server;

pub(crate) use logging::LogFormat;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Ticket lifecycle settings.
    #[command(flatten)]
    pub purchases: PurchasesConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings handed to the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            max_connections: self.database.max_connections,
            lock_timeout: Duration::from_millis(self.database.lock_timeout_ms),
            cancellation_window: SignedDuration::from_secs(i64::from(
                self.purchases.cancellation_window_seconds,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_are_applied() -> TestResult {
        let config =
            ServerConfig::try_parse_from(["storefront-json", "--database-url", "postgres://db"])?;

        let settings = config.app_settings();

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(settings.max_connections, 10);
        assert_eq!(settings.lock_timeout, Duration::from_secs(5));
        assert_eq!(settings.cancellation_window, SignedDuration::from_hours(1));

        Ok(())
    }

    #[test]
    fn flags_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://db",
            "--lock-timeout-ms",
            "250",
            "--cancellation-window-seconds",
            "60",
            "--log-format",
            "json",
        ])?;

        let settings = config.app_settings();

        assert_eq!(settings.lock_timeout, Duration::from_millis(250));
        assert_eq!(settings.cancellation_window, SignedDuration::from_secs(60));
        assert!(matches!(config.logging.log_format, LogFormat::Json));

        Ok(())
    }

    #[test]
    fn zero_lock_timeout_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://db",
            "--lock-timeout-ms",
            "0",
        ]);

        assert!(result.is_err(), "a zero lock timeout would wait forever");
    }
}
