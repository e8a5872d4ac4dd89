//! Application initialization and resource setup.
//!
//! The binary calls these once at startup: the logger first, then the store.

mod logger;

use log::info;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::storage::RecordingStore;

pub use logger::{init_logger, init_logger_with};

/// Opens the store described by `config`, running migrations as needed.
///
/// # Errors
///
/// Returns `InitializationError::StoreError` if the database cannot be
/// created, opened or migrated.
pub async fn init_store(config: &Config) -> Result<RecordingStore, InitializationError> {
    let store = RecordingStore::open(config).await?;
    match store.db_path() {
        Some(path) => info!("Store opened at {}", path.display()),
        None => info!("Store opened in memory"),
    }
    Ok(store)
}
