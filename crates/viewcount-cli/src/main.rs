//! View counter storage CLI.
//!
//! Provides the `viewcount` binary with subcommands for inspecting and
//! maintaining the persisted counter outside the HTTP server: `show` prints
//! the current record, `set` overwrites the count, and `init` seeds a fresh
//! store. Operates on the same file and SQLite backends as the server, so
//! an operator can fix up state while the server is stopped.

use std::process;

use clap::{Parser, Subcommand};

use viewcount_storage::{CounterRecord, CounterStore, FileStore, SqliteStore};

/// View counter storage tools.
#[derive(Parser)]
#[command(name = "viewcount", about = "View counter storage tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the persisted counter record as JSON.
    Show {
        /// Storage backend: file or sqlite.
        #[arg(short, long, default_value = "file")]
        backend: String,

        /// Backing file/database path (default: views-data.json or views.db).
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Overwrite the persisted count.
    Set {
        /// The count to store.
        count: u64,

        /// Storage backend: file or sqlite.
        #[arg(short, long, default_value = "file")]
        backend: String,

        /// Backing file/database path (default: views-data.json or views.db).
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Seed a fresh store; leaves an existing count alone.
    Init {
        /// Count to seed when no state exists.
        #[arg(long, default_value_t = 823)]
        seed: u64,

        /// Storage backend: file or sqlite.
        #[arg(short, long, default_value = "file")]
        backend: String,

        /// Backing file/database path (default: views-data.json or views.db).
        #[arg(short, long)]
        path: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Show { backend, path } => run_show(&backend, path),
        Commands::Set {
            count,
            backend,
            path,
        } => run_set(&backend, path, count),
        Commands::Init {
            seed,
            backend,
            path,
        } => run_init(&backend, path, seed),
    };
    process::exit(exit_code);
}

/// Opens the selected backend, defaulting the path per backend kind.
///
/// Returns a usage error string for an unknown backend name.
fn open_store(backend: &str, path: Option<String>) -> Result<Box<dyn CounterStore>, String> {
    match backend {
        "file" => {
            let path = path.unwrap_or_else(|| "views-data.json".to_string());
            Ok(Box::new(FileStore::new(path)))
        }
        "sqlite" => {
            let path = path.unwrap_or_else(|| "views.db".to_string());
            let store = SqliteStore::open(&path)
                .map_err(|e| format!("failed to open database '{}': {}", path, e))?;
            Ok(Box::new(store))
        }
        other => Err(format!(
            "unknown backend '{}', expected file or sqlite",
            other
        )),
    }
}

/// Execute the show subcommand.
///
/// Returns exit code: 0 = success, 1 = usage error, 3 = storage error.
fn run_show(backend: &str, path: Option<String>) -> i32 {
    let store = match open_store(backend, path) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 1;
        }
    };

    match store.load() {
        Ok(record) => {
            // `None` prints as JSON null, keeping the output machine-readable.
            let json = serde_json::to_string_pretty(&record).unwrap_or_else(|e| {
                format!("{{\"error\": \"failed to serialize record: {}\"}}", e)
            });
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: failed to read counter: {}", e);
            3
        }
    }
}

/// Execute the set subcommand.
///
/// Returns exit code: 0 = success, 1 = usage error, 3 = storage error.
fn run_set(backend: &str, path: Option<String>, count: u64) -> i32 {
    let mut store = match open_store(backend, path) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 1;
        }
    };

    match store.store(&CounterRecord::new(count)) {
        Ok(()) => {
            println!("count set to {}", count);
            0
        }
        Err(e) => {
            eprintln!("Error: failed to write counter: {}", e);
            3
        }
    }
}

/// Execute the init subcommand.
///
/// Returns exit code: 0 = success (including already-initialized),
/// 1 = usage error, 3 = storage error.
fn run_init(backend: &str, path: Option<String>, seed: u64) -> i32 {
    let mut store = match open_store(backend, path) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 1;
        }
    };

    match store.load() {
        Ok(Some(record)) => {
            println!("already initialized at {}", record.views);
            0
        }
        Ok(None) => match store.store(&CounterRecord::new(seed)) {
            Ok(()) => {
                println!("seeded count {}", seed);
                0
            }
            Err(e) => {
                eprintln!("Error: failed to seed counter: {}", e);
                3
            }
        },
        Err(e) => {
            eprintln!("Error: failed to read counter: {}", e);
            3
        }
    }
}
