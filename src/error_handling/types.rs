//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error opening the recording store.
    #[error("Store initialization error: {0}")]
    StoreError(#[from] DatabaseError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// A recording that violates one of the schema invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("uuid must not be empty")]
    EmptyUuid,

    #[error("duration must be a finite, non-negative number of seconds (got {0})")]
    NegativeDuration(f64),

    #[error("frame rate must be a finite number greater than zero (got {0})")]
    InvalidFrameRate(f64),

    #[error("file size must not be negative (got {0})")]
    NegativeFileSize(i64),
}

/// A predicate that cannot be applied to the field it names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The operator does not accept the value type, or the field has the wrong kind.
    #[error("Unsupported type for {op} on field {field}")]
    UnsupportedType {
        op: &'static str,
        field: &'static str,
    },
}

/// Error types for recording store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Recording not found with primaryKey = {0}")]
    NotFound(String),

    #[error("Recording already exists with primaryKey = {0}")]
    AlreadyExists(String),

    #[error("Already subscribed: {0}")]
    AlreadySubscribed(String),

    #[error("Not subscribed: {0}")]
    NotSubscribed(String),

    #[error("Invalid recording: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(DatabaseError::SqlError(e))
    }
}
