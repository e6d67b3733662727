//! SQLite implementation of [`CounterStore`].
//!
//! [`SqliteStore`] keeps the counter in a single-row key-value table and
//! overrides `increment` with an atomic upsert, so concurrent writers on
//! separate handles never lose an update (unlike the file backend).

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StorageError;
use crate::schema;
use crate::traits::CounterStore;
use crate::types::CounterRecord;

/// Row key under which the counter value is stored.
const VIEWS_KEY: &str = "views";

/// SQLite-backed implementation of [`CounterStore`].
///
/// The value is stored as a decimal string under the `views` key; no
/// timestamp is persisted, so loaded records carry `last_updated: None`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a database file at `path` and applies migrations.
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory database, mainly for tests.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }
}

impl CounterStore for SqliteStore {
    fn load(&self) -> Result<Option<CounterRecord>, StorageError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM counter WHERE key = ?1",
                params![VIEWS_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            None => Ok(None),
            Some(raw) => {
                let views = raw.parse::<u64>().map_err(|_| StorageError::Corrupt {
                    reason: format!("counter value '{}' is not an unsigned integer", raw),
                })?;
                Ok(Some(CounterRecord {
                    views,
                    last_updated: None,
                }))
            }
        }
    }

    fn store(&mut self, record: &CounterRecord) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO counter (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![VIEWS_KEY, record.views.to_string()],
        )?;
        Ok(())
    }

    /// Atomic increment: a single upsert statement, so two handles on the
    /// same database serialize through SQLite's write lock and neither
    /// increment is lost. `CAST` maps a non-numeric stored value to 0, so a
    /// corrupt row increments to 1 rather than erroring.
    fn increment(&mut self) -> Result<CounterRecord, StorageError> {
        let views: i64 = self.conn.query_row(
            "INSERT INTO counter (key, value) VALUES (?1, '1')
             ON CONFLICT(key) DO UPDATE SET
                 value = CAST(CAST(value AS INTEGER) + 1 AS TEXT)
             RETURNING CAST(value AS INTEGER)",
            params![VIEWS_KEY],
            |row| row.get(0),
        )?;
        Ok(CounterRecord::new(views as u64))
    }
}
