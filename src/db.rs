use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::config::Settings;
use crate::errors::AppError;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Opens the connection pool and brings the schema up to date.
#[tracing::instrument(name = "init_db", skip(settings), fields(database_url = %settings.database_url))]
pub async fn init_db(settings: &Settings) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.db_max_connections)
        .acquire_timeout(settings.query_timeout)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;

    tracing::info!("Database ready");
    Ok(pool)
}

/// A private in-memory database. The pool is pinned to one connection that
/// never expires, since every new SQLite memory connection starts empty.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    pool
}
