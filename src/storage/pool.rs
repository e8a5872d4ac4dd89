//! Database connection pool management.
//!
//! This module initializes and configures the SQLite connection pool with:
//! - WAL mode enabled for concurrent access
//! - Connection limits and timeouts
//! - Automatic database file creation
//! - Named shared in-memory databases for ephemeral stores

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::config::{DB_ACQUIRE_TIMEOUT, DB_PATH, DB_PATH_ENV};
use crate::error_handling::DatabaseError;

/// Shared handle to the SQLite pool.
pub type DbPool = Arc<Pool<Sqlite>>;

/// Initializes a pool for the database named by `RECORDING_STORE_DB_PATH`,
/// falling back to the default path.
pub async fn init_db_pool(max_connections: u32) -> Result<DbPool, DatabaseError> {
    let db_path = std::env::var(DB_PATH_ENV).unwrap_or_else(|_| DB_PATH.to_string());
    init_db_pool_with_path(Path::new(&db_path), max_connections).await
}

/// Initializes and returns a database connection pool with an explicit path.
///
/// Creates the database file (and its parent directory) if it doesn't exist
/// and enables WAL mode for better concurrent access.
pub async fn init_db_pool_with_path(
    db_path: &Path,
    max_connections: u32,
) -> Result<DbPool, DatabaseError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            error!("Failed to create database directory {}: {e}", parent.display());
            DatabaseError::FileCreationError(e.to_string())
        })?;
    }

    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(db_path)
    {
        Ok(_) => info!("Database file {} created.", db_path.display()),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            info!("Using existing database file {}.", db_path.display())
        }
        Err(e) => {
            error!("Failed to create database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    // Writers queue behind each other for as long as a caller waits for a connection
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .busy_timeout(DB_ACQUIRE_TIMEOUT);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(DB_ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    // Enable WAL mode
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .map_err(|e| {
            error!("Failed to set WAL mode: {e}");
            DatabaseError::SqlError(e)
        })?;

    Ok(Arc::new(pool))
}

/// Initializes a pool over a named, shared in-memory database.
///
/// Every connection in the pool sees the same data. The database lives as
/// long as the pool keeps at least one connection open, so idle connections
/// are never reaped.
pub async fn init_in_memory_pool(
    identifier: &str,
    max_connections: u32,
) -> Result<DbPool, DatabaseError> {
    let options = SqliteConnectOptions::from_str(&format!(
        "sqlite:file:recording-store-{identifier}?mode=memory&cache=shared"
    ))?;
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(DB_ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to open in-memory database {identifier}: {e}");
            DatabaseError::SqlError(e)
        })?;

    info!("Opened in-memory database {identifier}.");
    Ok(Arc::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_db_pool_creates_file_and_directory() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("nested").join("recordings.db");

        let pool = init_db_pool_with_path(&db_path, 2).await.unwrap();
        assert!(db_path.exists());

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(pool.as_ref())
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_init_db_pool_reuses_existing_file() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("recordings.db");

        let pool = init_db_pool_with_path(&db_path, 1).await.unwrap();
        sqlx::query("CREATE TABLE marker (id INTEGER)")
            .execute(pool.as_ref())
            .await
            .unwrap();
        pool.close().await;

        let pool = init_db_pool_with_path(&db_path, 1).await.unwrap();
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='marker'",
        )
        .fetch_one(pool.as_ref())
        .await
        .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_init_db_pool_reads_path_from_env() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("from-env.db");
        // Only this test reads the variable.
        std::env::set_var(DB_PATH_ENV, &db_path);

        let pool = init_db_pool(1).await.unwrap();
        std::env::remove_var(DB_PATH_ENV);
        pool.close().await;
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_in_memory_pool_shares_data_across_connections() {
        let pool = init_in_memory_pool("pool-shared-test", 3).await.unwrap();
        sqlx::query("CREATE TABLE marker (id INTEGER)")
            .execute(pool.as_ref())
            .await
            .unwrap();

        // Hold one connection while querying through another.
        let mut held = pool.acquire().await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM marker")
            .fetch_one(pool.as_ref())
            .await
            .unwrap();
        assert_eq!(count, 0);
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM marker")
            .fetch_one(&mut *held)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
