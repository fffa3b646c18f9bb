//! Implements the stores on top of a [StorageBackend].
//!
//! Each store owns one JSON document: a `transactions` array and a
//! `categories` object. Documents are parsed and validated in full on every
//! read, so corrupt records surface as typed errors instead of leaking
//! `NaN` or missing fields into the aggregations.

mod category;
mod transaction;

pub use category::JsonCategoryStore;
pub use transaction::JsonTransactionStore;

use crate::{
    Error,
    models::{Categories, Transaction},
    storage::{CATEGORIES_KEY, StorageBackend, TRANSACTIONS_KEY, Version},
};

/// Read and validate the transaction history.
///
/// Returns the parsed records along with the document version to use for a
/// subsequent compare-and-swap write. An absent document reads as an empty
/// history at version 0.
fn read_transactions(
    storage: &dyn StorageBackend,
) -> Result<(Vec<Transaction>, Version), Error> {
    let Some(document) = storage.read(TRANSACTIONS_KEY)? else {
        return Ok((Vec::new(), 0));
    };

    let transactions: Vec<Transaction> =
        serde_json::from_str(&document.json).map_err(|error| Error::MalformedDocument {
            key: TRANSACTIONS_KEY.to_owned(),
            reason: error.to_string(),
        })?;

    for transaction in &transactions {
        transaction.check().map_err(|reason| Error::InvalidRecord {
            key: TRANSACTIONS_KEY.to_owned(),
            reason,
        })?;
    }

    Ok((transactions, document.version))
}

/// Serialize and write the transaction history with a versioned write.
fn write_transactions(
    storage: &dyn StorageBackend,
    transactions: &[Transaction],
    expected: Version,
) -> Result<Version, Error> {
    let json = serde_json::to_string(transactions).map_err(|error| Error::MalformedDocument {
        key: TRANSACTIONS_KEY.to_owned(),
        reason: error.to_string(),
    })?;

    storage.write(TRANSACTIONS_KEY, &json, Some(expected))
}

/// Read and validate the category document, if present.
///
/// Seeding of the defaults is the category store's job, so an absent
/// document is reported as `None` here.
fn read_categories(
    storage: &dyn StorageBackend,
) -> Result<Option<(Categories, Version)>, Error> {
    let Some(document) = storage.read(CATEGORIES_KEY)? else {
        return Ok(None);
    };

    let categories: Categories =
        serde_json::from_str(&document.json).map_err(|error| Error::MalformedDocument {
            key: CATEGORIES_KEY.to_owned(),
            reason: error.to_string(),
        })?;

    Ok(Some((categories, document.version)))
}

/// Serialize and write the category document with a versioned write.
fn write_categories(
    storage: &dyn StorageBackend,
    categories: &Categories,
    expected: Version,
) -> Result<Version, Error> {
    let json = serde_json::to_string(categories).map_err(|error| Error::MalformedDocument {
        key: CATEGORIES_KEY.to_owned(),
        reason: error.to_string(),
    })?;

    storage.write(CATEGORIES_KEY, &json, Some(expected))
}
