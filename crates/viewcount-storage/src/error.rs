//! Storage error types for viewcount-storage.
//!
//! [`StorageError`] covers all anticipated failure modes in the storage
//! layer: IO, serialization, SQLite, migrations, and corrupt persisted
//! state. Callers that must never fail (the HTTP read path) degrade these
//! to a zero count at the service layer, not here.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A SQLite operation failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Persisted state exists but cannot be interpreted as a counter.
    #[error("corrupt counter state: {reason}")]
    Corrupt { reason: String },
}
