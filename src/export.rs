//! Backup snapshots: export, import, and clearing all data.
//!
//! A snapshot bundles the full transaction history and the category set into
//! one JSON document together with the time it was taken. Importing a
//! snapshot overwrites both stored documents, there is no merging.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    models::{Categories, Transaction},
    storage::{CATEGORIES_KEY, StorageBackend, TRANSACTIONS_KEY},
    stores::{CategoryStore, TransactionStore},
};

/// A full backup of the application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The full transaction history.
    pub transactions: Vec<Transaction>,
    /// The category set.
    pub categories: Categories,
    /// When the snapshot was taken.
    #[serde(rename = "exportDate", with = "time::serde::rfc3339")]
    pub export_date: OffsetDateTime,
}

impl Snapshot {
    /// Serialize the snapshot to pretty-printed JSON for a backup file.
    ///
    /// # Errors
    /// Returns [Error::InvalidSnapshot] if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|error| Error::InvalidSnapshot(error.to_string()))
    }

    /// Parse and validate a snapshot from a backup file.
    ///
    /// Every transaction record is validated the same way stored documents
    /// are, so a hand-edited backup with a negative amount or a missing
    /// field is rejected as a whole instead of corrupting the stores.
    ///
    /// # Errors
    /// Returns [Error::InvalidSnapshot] describing the first problem found.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let snapshot: Snapshot = serde_json::from_str(json)
            .map_err(|error| Error::InvalidSnapshot(error.to_string()))?;

        for transaction in &snapshot.transactions {
            transaction
                .check()
                .map_err(Error::InvalidSnapshot)?;
        }

        Ok(snapshot)
    }
}

/// Take a snapshot of the current state of both stores, stamped with `now`.
pub fn export(
    transactions: &dyn TransactionStore,
    categories: &dyn CategoryStore,
    now: OffsetDateTime,
) -> Result<Snapshot, Error> {
    Ok(Snapshot {
        transactions: transactions.get_all()?,
        categories: categories.get_all()?,
        export_date: now,
    })
}

/// Overwrite both stored documents with the contents of `snapshot`.
///
/// The write is unconditional: whatever was stored before the import is
/// replaced, matching the restore-from-backup semantics of the original.
pub fn import(storage: &dyn StorageBackend, snapshot: &Snapshot) -> Result<(), Error> {
    let transactions_json = serde_json::to_string(&snapshot.transactions)
        .map_err(|error| Error::InvalidSnapshot(error.to_string()))?;
    let categories_json = serde_json::to_string(&snapshot.categories)
        .map_err(|error| Error::InvalidSnapshot(error.to_string()))?;

    storage.write(TRANSACTIONS_KEY, &transactions_json, None)?;
    storage.write(CATEGORIES_KEY, &categories_json, None)?;
    tracing::info!(
        "imported {} transaction(s) from a snapshot taken at {}",
        snapshot.transactions.len(),
        snapshot.export_date
    );

    Ok(())
}

/// Remove both stored documents.
///
/// The next category read re-seeds the default set; the transaction history
/// starts over empty. Destructive, so callers must confirm with the user
/// first.
pub fn clear(storage: &dyn StorageBackend) -> Result<(), Error> {
    storage.remove(TRANSACTIONS_KEY)?;
    storage.remove(CATEGORIES_KEY)?;
    tracing::info!("cleared all stored data");

    Ok(())
}
