//! JSON-file implementation of [`CounterStore`].
//!
//! [`FileStore`] persists the counter as a pretty-printed JSON document
//! (`{ "views": N, "lastUpdated": "..." }`), fully rewritten on each write.
//! Writes go to a sibling temp file that is renamed over the target, so a
//! concurrent load observes either the old or the new record, never a
//! truncated file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::traits::CounterStore;
use crate::types::CounterRecord;

/// File-backed implementation of [`CounterStore`].
///
/// Uses the default non-atomic `increment`; two processes sharing the same
/// file may lose an increment under concurrent writes, which is the
/// documented tolerance for this backend.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the file at `path`.
    ///
    /// The file is not touched until the first `store`; a missing file
    /// loads as `None`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CounterStore for FileStore {
    fn load(&self) -> Result<Option<CounterRecord>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let record: CounterRecord = serde_json::from_str(&text)?;
                Ok(Some(record))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&mut self, record: &CounterRecord) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp = self.temp_path();
        fs::write(&temp, serde_json::to_vec_pretty(record)?)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}
