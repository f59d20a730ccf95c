//! File-backed Storage
//!
//! Persists the cart blob as a single file on disk, the durable equivalent of
//! the browser's per-origin key-value store.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::storage::{CartStorage, StorageError};

/// Storage backend writing the blob to one file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a backend persisting to `path`.
    ///
    /// The file does not need to exist yet; a missing file loads as empty.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, blob: &str) -> Result<(), StorageError> {
        Ok(fs::write(&self.path, blob)?)
    }
}
