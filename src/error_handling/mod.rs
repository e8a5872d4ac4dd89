//! Error handling.
//!
//! This module provides the error types used by the library:
//! - Initialization failures (logger setup)
//! - Database failures (file creation, SQL, migrations)
//! - Recording validation and query construction failures
//! - Store operation failures (not found, duplicates, subscriptions)

mod types;

// Re-export public API
pub use types::{DatabaseError, InitializationError, QueryError, StoreError, ValidationError};
