//! The [`CounterStore`] trait defining the storage contract for the counter.
//!
//! All backends (InMemoryStore, FileStore, SqliteStore) implement this
//! trait, ensuring they are fully swappable without changing server logic.
//! The trait is synchronous (not async); every operation is at most one
//! storage round-trip and runs behind the server's async mutex.

use crate::error::StorageError;
use crate::types::CounterRecord;

/// The storage contract for the persisted view counter.
///
/// `load` and `store` are atomic with respect to each other: a `load` that
/// starts after a `store` completes observes the new record, and a `load`
/// concurrent with a `store` observes either the old or the new record,
/// never a truncated one.
pub trait CounterStore {
    /// Loads the persisted counter.
    ///
    /// Returns `Ok(None)` when no persisted state exists yet (first run).
    /// Unreadable or undecodable state is an error, which the service layer
    /// degrades to a zero count.
    fn load(&self) -> Result<Option<CounterRecord>, StorageError>;

    /// Persists `record`, fully overwriting prior state.
    fn store(&mut self, record: &CounterRecord) -> Result<(), StorageError>;

    /// Increments the counter by one and returns the new record.
    ///
    /// The default implementation is a non-atomic read-modify-write: two
    /// writers on separate handles may both observe the same prior value
    /// and lose one increment. Backends with an atomic primitive override
    /// this (see `SqliteStore`).
    fn increment(&mut self) -> Result<CounterRecord, StorageError> {
        let current = self.load()?.map(|record| record.views).unwrap_or(0);
        let record = CounterRecord::new(current + 1);
        self.store(&record)?;
        Ok(record)
    }
}
