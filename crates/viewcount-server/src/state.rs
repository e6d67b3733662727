//! Application state shared across handler tasks.
//!
//! [`AppState`] wraps the counter service in `Arc<tokio::sync::Mutex<>>` for
//! use with axum handlers. Uses `tokio::sync::Mutex` (async-aware) instead
//! of `std::sync::Mutex` (blocking) so handlers await the lock without
//! blocking the tokio runtime.
//!
//! Note: `tokio::sync::RwLock` would allow concurrent reads, but the SQLite
//! backend holds a `rusqlite::Connection`, which is `!Sync` and cannot live
//! behind an `RwLock`. Every counter operation is a single cheap storage
//! round-trip, so the `Mutex` is not a bottleneck at this scale.

use std::sync::Arc;

use viewcount_storage::{FileStore, InMemoryStore, SqliteStore};

use crate::config::{BackendConfig, GateConfig, ServerConfig};
use crate::gate::{CookieGate, IpSetGate, VisitGate};
use crate::service::CounterService;

/// The counter, or the reason there isn't one.
///
/// A server started with an unusable backend still binds and serves; every
/// request on the `Unavailable` arm answers 500 with the stored reason,
/// so a misconfiguration is visible to clients rather than crashing the
/// process on startup.
#[derive(Clone)]
pub enum CounterHandle {
    /// A working counter service behind an async mutex.
    Ready(Arc<tokio::sync::Mutex<CounterService>>),
    /// No usable backend; the string names what went wrong.
    Unavailable(String),
}

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The counter service, or the startup failure that replaced it.
    pub counter: CounterHandle,
    /// Visit deduplication strategy.
    pub gate: Arc<dyn VisitGate>,
}

impl AppState {
    /// Builds state from configuration: opens the backend, seeds a fresh
    /// store, and constructs the configured gate.
    ///
    /// Backend failures (unknown name, unopenable database) degrade to
    /// [`CounterHandle::Unavailable`] instead of returning an error.
    pub fn from_config(config: &ServerConfig) -> Self {
        let counter = match &config.backend {
            BackendConfig::File { path } => {
                Self::ready(CounterService::new(Box::new(FileStore::new(path))), config.seed)
            }
            BackendConfig::Sqlite { path } => match SqliteStore::open(path) {
                Ok(store) => Self::ready(CounterService::new(Box::new(store)), config.seed),
                Err(err) => {
                    let reason = format!("failed to open sqlite database '{}': {}", path, err);
                    tracing::error!("{}", reason);
                    CounterHandle::Unavailable(reason)
                }
            },
            BackendConfig::Memory => {
                Self::ready(CounterService::new(Box::new(InMemoryStore::new())), config.seed)
            }
            BackendConfig::Unconfigured { reason } => {
                tracing::error!("{}", reason);
                CounterHandle::Unavailable(reason.clone())
            }
        };

        let gate: Arc<dyn VisitGate> = match &config.gate {
            GateConfig::IpSet => {
                tracing::info!("visit gate: per-process IP set");
                Arc::new(IpSetGate::new())
            }
            GateConfig::Cookie { marker_ttl } => {
                tracing::info!(
                    "visit gate: per-client expiring cookie ({}s)",
                    marker_ttl.as_secs()
                );
                Arc::new(CookieGate::new(*marker_ttl))
            }
        };

        AppState { counter, gate }
    }

    /// Creates state backed by an in-memory store and the IP gate, seeded
    /// with the default count (for testing).
    pub fn in_memory(seed: u64) -> Self {
        AppState {
            counter: Self::ready(CounterService::new(Box::new(InMemoryStore::new())), seed),
            gate: Arc::new(IpSetGate::new()),
        }
    }

    /// Creates state with no usable backend (for testing the 500 path).
    pub fn unavailable(reason: impl Into<String>) -> Self {
        AppState {
            counter: CounterHandle::Unavailable(reason.into()),
            gate: Arc::new(IpSetGate::new()),
        }
    }

    /// Swaps the gate, keeping the counter (for testing gate variants).
    pub fn with_gate(mut self, gate: Arc<dyn VisitGate>) -> Self {
        self.gate = gate;
        self
    }

    fn ready(mut service: CounterService, seed: u64) -> CounterHandle {
        service.initialize(seed);
        CounterHandle::Ready(Arc::new(tokio::sync::Mutex::new(service)))
    }
}
