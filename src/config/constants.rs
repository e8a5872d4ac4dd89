//! Configuration constants.
//!
//! This module defines the constants used as defaults throughout the application.

use std::time::Duration;

/// Default SQLite database file.
pub const DB_PATH: &str = "./recordings.db";

/// Environment variable overriding [`DB_PATH`].
pub const DB_PATH_ENV: &str = "RECORDING_STORE_DB_PATH";

/// Default maximum number of pooled SQLite connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long to wait for a pooled connection before giving up.
/// SQLite writers serialize, so this also bounds how long a caller waits on a busy writer.
pub const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
