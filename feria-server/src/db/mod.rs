//! SQLite pool bootstrap, migrations, and per-table query modules.

pub mod accounts;
pub mod reservations;
pub mod stalls;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Open the SQLite pool (WAL mode) and apply migrations.
pub async fn connect(db_path: &str) -> Result<SqlitePool, BoxError> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
        .map_err(|e| format!("Invalid database path: {e}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .pragma("foreign_keys", "ON")
        .optimize_on_close(true, None);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| format!("Failed to open database: {e}"))?;

    // busy_timeout: a competing writer makes us wait up to 5s, not fail
    sqlx::query("PRAGMA busy_timeout = 5000;")
        .execute(&pool)
        .await
        .map_err(|e| format!("Failed to set busy_timeout: {e}"))?;

    tracing::info!(path = db_path, "SQLite pool ready (WAL, busy_timeout=5000ms)");

    // ignore_missing: migrations deleted from the tree may already be applied
    sqlx::migrate!("./migrations")
        .set_ignore_missing(true)
        .run(&pool)
        .await
        .map_err(|e| format!("Failed to apply migrations: {e}"))?;
    tracing::info!("Schema migrations applied");

    Ok(pool)
}
