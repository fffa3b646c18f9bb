//! String-keyed JSON document storage.
//!
//! The application persists its whole state as two JSON documents under the
//! keys [TRANSACTIONS_KEY] and [CATEGORIES_KEY]. This module defines the
//! [StorageBackend] trait those documents live behind, with a file-backed
//! implementation for normal use and an in-memory one for tests.
//!
//! Every key carries a [Version] that increases by one on each committed
//! write. Writers that read a document, modify it and write it back pass the
//! version they read; the write is refused with
//! [Error::VersionConflict](crate::Error::VersionConflict) if another write
//! landed in between. Plain overwrites (import, clear) skip the check.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::Error;

/// The storage key holding the JSON array of transactions.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// The storage key holding the JSON object with the category lists.
pub const CATEGORIES_KEY: &str = "categories";

/// A per-key write counter used for conflict detection.
pub type Version = u64;

/// A document read from storage: its raw JSON text and the version it had
/// at read time.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The raw JSON text as stored.
    pub json: String,
    /// The version of the key when the document was read.
    pub version: Version,
}

/// A callback invoked after every committed write or removal.
pub type Subscriber = Box<dyn Fn(&str, Version) + Send + Sync>;

/// A string-keyed JSON document store.
///
/// Implementations must apply each write atomically: readers observe either
/// the previous document or the new one, never a partial write.
pub trait StorageBackend: Send + Sync {
    /// Read the document stored under `key`, or `None` if the key is absent.
    fn read(&self, key: &str) -> Result<Option<Document>, Error>;

    /// Write `json` under `key` and return the new version.
    ///
    /// If `expected` is `Some`, the write only succeeds when the current
    /// version of `key` equals it.
    ///
    /// # Errors
    /// Returns [Error::VersionConflict](crate::Error::VersionConflict) when
    /// the expected version does not match, and an I/O error if the backend
    /// fails to persist the document.
    fn write(&self, key: &str, json: &str, expected: Option<Version>) -> Result<Version, Error>;

    /// Remove the document stored under `key`. Removing an absent key is a
    /// no-op.
    fn remove(&self, key: &str) -> Result<(), Error>;

    /// Register a callback that is invoked with the key and new version
    /// after every committed write or removal.
    fn subscribe(&self, subscriber: Subscriber);
}
