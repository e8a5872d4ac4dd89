//! SQLite-backed recording storage.
//!
//! [`RecordingStore`] is the entry point. Its operations live in one
//! submodule per concern:
//! - `recordings`: create, read, update, delete and filtered queries
//! - `schedules`: lookups keyed by schedule id
//! - `deletion`: deleting recordings together with their media files
//! - `subscriptions`: live queries notified after each write

mod deletion;
mod migrations;
mod pool;
mod recordings;
mod schedules;
mod store;
mod subscriptions;
mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use migrations::run_migrations;
pub use pool::{init_db_pool, init_db_pool_with_path, init_in_memory_pool, DbPool};
pub use store::RecordingStore;
pub use types::{QueryResults, RecordingRef, ResultsChange};

pub(crate) use recordings::{select_sql, ORDER_BY};
