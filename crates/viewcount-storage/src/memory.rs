//! In-memory implementation of [`CounterStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and ephemeral
//! deployments where persistence isn't needed. Semantics are identical to
//! the file and SQLite backends, minus durability.

use crate::error::StorageError;
use crate::traits::CounterStore;
use crate::types::CounterRecord;

/// In-memory implementation of [`CounterStore`].
///
/// The counter resets whenever the store is dropped; restarts therefore
/// start from the seed again.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    record: Option<CounterRecord>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        InMemoryStore { record: None }
    }
}

impl CounterStore for InMemoryStore {
    fn load(&self) -> Result<Option<CounterRecord>, StorageError> {
        Ok(self.record.clone())
    }

    fn store(&mut self, record: &CounterRecord) -> Result<(), StorageError> {
        self.record = Some(record.clone());
        Ok(())
    }
}
