//! The recording repository handle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use sqlx::{Sqlite, Transaction};

use crate::config::Config;
use crate::error_handling::DatabaseError;

use super::migrations::run_migrations;
use super::pool::{init_db_pool_with_path, init_in_memory_pool, DbPool};
use super::subscriptions::Subscriptions;

/// Repository of [`Recording`](crate::Recording)s backed by SQLite.
///
/// Cheap to clone; clones share the pool and the subscription registry.
/// Operations are spread over the `storage` submodules by concern:
/// record CRUD and queries, schedule lookups, file-aware deletion and
/// change subscriptions.
#[derive(Clone, Debug)]
pub struct RecordingStore {
    pub(crate) pool: DbPool,
    db_path: Option<PathBuf>,
    pub(crate) subscriptions: Arc<Subscriptions>,
}

impl RecordingStore {
    /// Wraps an already-migrated pool.
    pub fn new(pool: DbPool, db_path: Option<PathBuf>) -> Self {
        Self {
            pool,
            db_path,
            subscriptions: Arc::new(Subscriptions::default()),
        }
    }

    /// Opens (creating if needed) the store described by `config` and applies migrations.
    pub async fn open(config: &Config) -> Result<Self, DatabaseError> {
        match config.in_memory_identifier.as_deref() {
            Some(identifier) => Self::open_in_memory(identifier, config.max_connections).await,
            None => Self::open_path(&config.db_path, config.max_connections).await,
        }
    }

    /// Opens the SQLite file at `db_path` and applies migrations.
    pub async fn open_path(db_path: &Path, max_connections: u32) -> Result<Self, DatabaseError> {
        let pool = init_db_pool_with_path(db_path, max_connections).await?;
        run_migrations(&pool).await?;
        info!("Recording store ready at {}", db_path.display());
        Ok(Self::new(pool, Some(db_path.to_path_buf())))
    }

    /// Opens a shared in-memory store. Stores opened with the same identifier
    /// see the same data while any of them is alive.
    pub async fn open_in_memory(
        identifier: &str,
        max_connections: u32,
    ) -> Result<Self, DatabaseError> {
        let pool = init_in_memory_pool(identifier, max_connections).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool, None))
    }

    /// Starts a transaction that holds the write lock from its first statement.
    ///
    /// A deferred transaction that reads before it writes cannot upgrade its
    /// WAL snapshot once another writer has committed, and SQLite fails it
    /// with `SQLITE_BUSY` without waiting. `BEGIN IMMEDIATE` queues on the
    /// busy timeout instead.
    pub(crate) async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin_with("BEGIN IMMEDIATE").await
    }

    /// File backing the store, `None` for in-memory stores.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// The underlying pool, for callers that need raw SQL access.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Closes every pooled connection. In-memory data is lost once all
    /// stores sharing the identifier are closed.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
