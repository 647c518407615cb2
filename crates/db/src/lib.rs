//! Database access for the product inventory service.
//!
//! Owns pool construction, migrations, row models and the repositories.
//! The pool is created once at startup and handed to whoever needs it;
//! nothing in this crate keeps a global connection.

pub mod config;
pub mod constraint;
pub mod models;
pub mod repositories;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub use config::DbConfig;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool sized and time-bounded by `config`.
///
/// Connections are opened lazily up to `max_connections`; a caller that
/// cannot get one within `connect_timeout_secs` receives
/// [`sqlx::Error::PoolTimedOut`].
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let options = config.connect_options()?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_with(options)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
