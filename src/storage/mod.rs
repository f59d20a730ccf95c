//! Durable Cart Storage
//!
//! A key-value persistence primitive holding a single serialized cart blob.
//! The store treats the persisted representation as authoritative after the
//! initial load; backends only need round-trip fidelity for the blob.

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Get/set of one serialized cart snapshot blob.
pub trait CartStorage {
    /// Load the previously saved blob, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read. The cart
    /// store treats this the same as an absent blob.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the saved blob with `blob`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written. The cart
    /// store logs the failure and keeps its in-memory state authoritative.
    fn save(&self, blob: &str) -> Result<(), StorageError>;
}
