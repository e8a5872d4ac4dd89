//! recording_store library: persistence for media recording records
//!
//! This library stores recording metadata (dimensions, duration, thumbnail,
//! checksum, cloud-sync state, local file path) in SQLite and answers
//! filtered queries, schedule lookups and live subscriptions over it.
//!
//! # Example
//!
//! ```no_run
//! use recording_store::{Field, Predicate, Query, Recording, RecordingStore};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RecordingStore::open_path(std::path::Path::new("recordings.db"), 5).await?;
//!
//! let mut recording = Recording::new_now("3f0c9a52-1d1e-4d0e-9a51-0d7f2b1c9e11");
//! recording.schedule_id = Some("morning-show".into());
//! recording.duration = Some(1800.0);
//! store.create(&recording).await?;
//!
//! let query = Query::filter(Predicate::equal_to(Field::ScheduleId, "morning-show"))
//!     .with_limit(10);
//! let page = store.query(&query).await?;
//! println!("{} of {} recordings", page.results.len(), page.count);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
mod error_handling;
pub mod export;
pub mod initialization;
mod models;
pub mod query;
mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{DatabaseError, InitializationError, QueryError, StoreError, ValidationError};
pub use models::{Recording, RecordingPatch};
pub use query::{Field, FieldKind, FieldValue, Predicate, Query};
pub use storage::{
    init_db_pool, init_db_pool_with_path, init_in_memory_pool, run_migrations, DbPool,
    QueryResults, RecordingRef, RecordingStore, ResultsChange,
};
