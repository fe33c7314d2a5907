//! Per-test databases inside one shared PostgreSQL container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};
use uuid::Uuid;

use crate::database;

const TEST_USER: &str = "storefront_test";
const TEST_PASSWORD: &str = "storefront_test_password";
const TEST_DB_PREFIX: &str = "storefront_test_";

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(TEST_USER)
        .with_password(TEST_PASSWORD)
        .with_db_name("storefront_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn init_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(db_name) = receiver.recv().await {
            if let Err(err) = drop_database(&db_name).await {
                eprintln!("Failed to drop test database '{db_name}': {err}");
            }
        }
    });

    sender
}

fn host() -> String {
    std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string())
}

fn database_url(port: u16, db_name: &str) -> String {
    format!(
        "postgresql://{TEST_USER}:{TEST_PASSWORD}@{host}:{port}/{db_name}",
        host = host()
    )
}

/// Only names this module generated are ever dropped.
fn is_test_database(name: &str) -> bool {
    name.strip_prefix(TEST_DB_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit()))
}

async fn drop_database(db_name: &str) -> Result<(), sqlx::Error> {
    if !is_test_database(db_name) {
        return Ok(());
    }

    let Some(container) = POSTGRES_CONTAINER.get() else {
        return Ok(());
    };

    let Ok(port) = container.get_host_port_ipv4(5432).await else {
        return Ok(());
    };

    let mut conn = PgConnection::connect(&database_url(port, "postgres")).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A freshly migrated database owned by a single test.
///
/// Services commit normally, so isolation comes from the database itself
/// rather than from rolling anything back. The database is dropped in the
/// background once the `TestDb` goes out of scope.
#[derive(Debug)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        CLEANUP_SENDER.get_or_init(init_cleanup_task).await;

        let container = POSTGRES_CONTAINER
            .get_or_init(init_postgres_container)
            .await;

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");

        let name = format!("{TEST_DB_PREFIX}{}", Uuid::now_v7().simple());

        let mut conn = PgConnection::connect(&database_url(port, "postgres"))
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&database_url(port, &name))
            .await
            .expect("Failed to create pool for test database");

        database::migrate(&pool)
            .await
            .expect("Failed to run migrations on test database");

        Self { pool, name }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_recognised() {
        let name = format!("{TEST_DB_PREFIX}{}", Uuid::now_v7().simple());

        assert!(is_test_database(&name));
    }

    #[test]
    fn foreign_names_are_never_dropped() {
        assert!(!is_test_database("postgres"));
        assert!(!is_test_database(TEST_DB_PREFIX));
        assert!(!is_test_database("storefront_test_x\"; DROP"));
    }

    #[tokio::test]
    async fn new_database_is_migrated() {
        let test_db = TestDb::new().await;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchases")
            .fetch_one(test_db.pool())
            .await
            .expect("purchases table should exist");

        assert_eq!(count, 0);
    }
}
