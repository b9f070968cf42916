use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::CoreError;

// Re-export the pool for use in other parts of the core crate
pub use sqlx::SqlitePool as DbPool;

/// Connection string for a private, process-local database.
pub const IN_MEMORY: &str = "sqlite::memory:";

/// Opens (creating if needed) the SQLite database at `db_path` and applies
/// the embedded schema.
///
/// Passing [`IN_MEMORY`] yields a throwaway database, see
/// [`establish_in_memory`].
pub async fn establish_connection(db_path: &str) -> Result<SqlitePool, CoreError> {
    if db_path == IN_MEMORY {
        return establish_in_memory().await;
    }

    // Create the parent directory if it doesn't exist
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    debug!(path = db_path, "database ready");

    Ok(pool)
}

/// Opens an in-memory database.
///
/// Every SQLite connection to `:memory:` sees its own database, so the pool
/// is pinned to a single connection that is never recycled.
pub async fn establish_in_memory() -> Result<SqlitePool, CoreError> {
    let options = SqliteConnectOptions::from_str(IN_MEMORY)?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    debug!("in-memory database ready");

    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<(), CoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
