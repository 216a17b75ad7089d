pub mod invoice_repository;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::config::DatabaseConfig;

pub use invoice_repository::SqliteInvoiceRepository;

/// Opens the pool, creating the database file when it does not exist yet.
///
/// In-memory databases live per connection, so callers using `sqlite::memory:`
/// should configure a single connection.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
  let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

  SqlitePoolOptions::new()
    .max_connections(config.max_connections)
    .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
    .connect_with(options)
    .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
  sqlx::migrate!("./migrations").run(pool).await
}
