//! Server configuration read from environment variables.
//!
//! All settings have defaults, so the server starts with no environment at
//! all:
//! - `VIEWCOUNT_PORT`: listen port (default: "3000")
//! - `VIEWCOUNT_BACKEND`: "file", "sqlite", or "memory" (default: "file")
//! - `VIEWCOUNT_DATA_PATH`: backing file/database path (default:
//!   "views-data.json" for file, "views.db" for sqlite)
//! - `VIEWCOUNT_GATE`: "ip" or "cookie" (default: "ip")
//! - `VIEWCOUNT_MARKER_TTL_SECS`: cookie lifetime in seconds (default: 3600)
//! - `VIEWCOUNT_SEED`: initial count for a fresh store (default: 823)
//!
//! An unrecognized backend does not abort startup; it yields
//! [`BackendConfig::Unconfigured`], and the server answers every request
//! with a 500 until the operator fixes the variable.

use std::time::Duration;

/// Default initial count seeded into a fresh store.
pub const DEFAULT_SEED: u64 = 823;

/// Default cookie lifetime for the cookie gate.
pub const DEFAULT_MARKER_TTL: Duration = Duration::from_secs(3600);

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
    /// Storage backend selection.
    pub backend: BackendConfig,
    /// Visitor deduplication strategy.
    pub gate: GateConfig,
    /// Count stored on first run when no persisted state exists.
    pub seed: u64,
}

/// Which storage backend to use.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// JSON file at `path`, rewritten on each change.
    File { path: String },
    /// SQLite database at `path`, with atomic increments.
    Sqlite { path: String },
    /// In-memory counter, lost on restart.
    Memory,
    /// No usable backend; requests get a 500 naming `reason`.
    Unconfigured { reason: String },
}

/// Which visit gate to use.
#[derive(Debug, Clone)]
pub enum GateConfig {
    /// Process-local set of client IPs; resets on restart.
    IpSet,
    /// `viewed` cookie with the given lifetime; survives restarts but is
    /// per-browser.
    Cookie { marker_ttl: Duration },
}

impl ServerConfig {
    /// Reads configuration from environment variables, falling back to the
    /// documented defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let port = std::env::var("VIEWCOUNT_PORT")
            .ok()
            .and_then(|raw| match raw.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    tracing::warn!("ignoring unparseable VIEWCOUNT_PORT '{}'", raw);
                    None
                }
            })
            .unwrap_or(3000);

        let backend_name = std::env::var("VIEWCOUNT_BACKEND")
            .unwrap_or_else(|_| "file".to_string());
        let data_path = std::env::var("VIEWCOUNT_DATA_PATH").ok();
        let backend = parse_backend(&backend_name, data_path);

        let gate_name =
            std::env::var("VIEWCOUNT_GATE").unwrap_or_else(|_| "ip".to_string());
        let marker_ttl = std::env::var("VIEWCOUNT_MARKER_TTL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_MARKER_TTL);
        let gate = parse_gate(&gate_name, marker_ttl);

        let seed = std::env::var("VIEWCOUNT_SEED")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SEED);

        ServerConfig {
            port,
            backend,
            gate,
            seed,
        }
    }
}

/// Resolves a backend name and optional data path into a [`BackendConfig`].
fn parse_backend(name: &str, data_path: Option<String>) -> BackendConfig {
    match name {
        "file" => BackendConfig::File {
            path: data_path.unwrap_or_else(|| "views-data.json".to_string()),
        },
        "sqlite" => BackendConfig::Sqlite {
            path: data_path.unwrap_or_else(|| "views.db".to_string()),
        },
        "memory" => BackendConfig::Memory,
        other => BackendConfig::Unconfigured {
            reason: format!(
                "unknown VIEWCOUNT_BACKEND '{}', expected file/sqlite/memory",
                other
            ),
        },
    }
}

/// Resolves a gate name into a [`GateConfig`], defaulting to the IP set.
fn parse_gate(name: &str, marker_ttl: Duration) -> GateConfig {
    match name {
        "cookie" => GateConfig::Cookie { marker_ttl },
        "ip" => GateConfig::IpSet,
        other => {
            tracing::warn!("unknown VIEWCOUNT_GATE '{}', falling back to 'ip'", other);
            GateConfig::IpSet
        }
    }
}
