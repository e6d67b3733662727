//! Degrading counter service over a [`CounterStore`].
//!
//! [`CounterService`] adapts the fallible storage contract to the API
//! contract, which never fails once a backend exists: unreadable state
//! reads as 0, and a failed write is logged and dropped while the request
//! still gets the incremented count. A later successful write heals
//! whatever was wrong on disk.

use viewcount_storage::{CounterRecord, CounterStore};

/// Counter operations with storage failures degraded to safe defaults.
///
/// Owns the backend exclusively; the server shares one instance behind an
/// async mutex (see `AppState`).
pub struct CounterService {
    store: Box<dyn CounterStore + Send>,
}

impl CounterService {
    /// Wraps a storage backend.
    pub fn new(store: Box<dyn CounterStore + Send>) -> Self {
        CounterService { store }
    }

    /// Seeds the store with `seed` when no persisted state exists yet.
    ///
    /// Existing state is left alone, so the seed only matters on first run.
    /// Corrupt state is deliberately not re-seeded: it reads as 0 and heals
    /// on the next successful write instead of silently resetting to the
    /// seed.
    pub fn initialize(&mut self, seed: u64) {
        match self.store.load() {
            Ok(Some(record)) => {
                tracing::debug!("counter already at {}, leaving seed alone", record.views);
            }
            Ok(None) => {
                if let Err(err) = self.store.store(&CounterRecord::new(seed)) {
                    tracing::warn!("failed to seed counter with {}: {}", seed, err);
                } else {
                    tracing::info!("seeded counter with initial count {}", seed);
                }
            }
            Err(err) => {
                tracing::warn!("counter state unreadable at startup: {}", err);
            }
        }
    }

    /// Current count; unreadable or missing state reads as 0.
    pub fn current(&self) -> u64 {
        match self.store.load() {
            Ok(Some(record)) => record.views,
            Ok(None) => 0,
            Err(err) => {
                tracing::warn!("failed to read counter, serving 0: {}", err);
                0
            }
        }
    }

    /// Increments the counter and returns the new count.
    ///
    /// If the backend's increment fails, the count is recomputed from
    /// whatever is readable (0 when nothing is) and a best-effort write
    /// tries to heal the store; the returned count reflects the increment
    /// either way.
    pub fn increment(&mut self) -> u64 {
        match self.store.increment() {
            Ok(record) => record.views,
            Err(err) => {
                tracing::warn!("failed to increment persisted counter: {}", err);
                let next = self.current() + 1;
                if let Err(store_err) = self.store.store(&CounterRecord::new(next)) {
                    tracing::warn!("failed to persist recovered count {}: {}", next, store_err);
                }
                next
            }
        }
    }
}
