//! Uangku is a small personal finance tracker: record income and expense
//! transactions, organise them into categories, and inspect balances and
//! period-based category reports.
//!
//! All state lives in two string-keyed JSON documents (`transactions` and
//! `categories`) behind the [storage::StorageBackend] trait. The
//! [stores] module layers typed, validating stores on top of that raw
//! storage, and [reports] and [dashboard] derive read-only views from the
//! transaction history.

#![warn(missing_docs)]

pub mod currency;
pub mod dashboard;
pub mod export;
pub mod history;
pub mod models;
pub mod reports;
pub mod storage;
pub mod stores;

pub use models::{Categories, CategoryName, Transaction, TransactionBuilder, TransactionType};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("a category name cannot be an empty string")]
    EmptyCategoryName,

    /// Tried to add a category name that already exists for the given
    /// transaction type.
    #[error("the {kind} category \"{name}\" already exists")]
    DuplicateCategory {
        /// The transaction type the category belongs to.
        kind: models::TransactionType,
        /// The offending category name.
        name: String,
    },

    /// Tried to delete a category that is not in the store.
    #[error("the {kind} category \"{name}\" could not be found")]
    CategoryNotFound {
        /// The transaction type the category was looked up under.
        kind: models::TransactionType,
        /// The name that was looked up.
        name: String,
    },

    /// Tried to delete a category from the default set.
    ///
    /// Default categories are seeded on first run and act as the baseline
    /// vocabulary of the app, so they can never be removed.
    #[error("the {kind} category \"{name}\" is a default category and cannot be deleted")]
    DefaultCategory {
        /// The transaction type the category belongs to.
        kind: models::TransactionType,
        /// The protected category name.
        name: String,
    },

    /// Tried to delete a category that is still referenced by at least one
    /// transaction.
    #[error("the {kind} category \"{name}\" is used by {count} transaction(s) and cannot be deleted")]
    CategoryInUse {
        /// The transaction type the category belongs to.
        kind: models::TransactionType,
        /// The referenced category name.
        name: String,
        /// How many transactions reference it.
        count: usize,
    },

    /// A transaction was created with an amount that is negative, NaN or
    /// infinite.
    #[error("{0} is not a valid transaction amount, amounts must be finite and non-negative")]
    InvalidAmount(f64),

    /// A stored document could not be parsed into the expected shape.
    ///
    /// This covers documents that are not valid JSON as well as documents
    /// with the wrong top-level type, e.g. a `transactions` document that is
    /// not an array.
    #[error("the stored document \"{key}\" is malformed: {reason}")]
    MalformedDocument {
        /// The storage key the document was read from.
        key: String,
        /// A human-readable description of the parse failure.
        reason: String,
    },

    /// A stored transaction record failed validation.
    ///
    /// Rather than letting a corrupt record propagate `NaN` or garbage into
    /// balances and reports, reads reject the whole document.
    #[error("the stored document \"{key}\" contains an invalid record: {reason}")]
    InvalidRecord {
        /// The storage key the record was read from.
        key: String,
        /// A human-readable description of the rejected record.
        reason: String,
    },

    /// A backup snapshot could not be parsed during import.
    #[error("the snapshot could not be parsed: {0}")]
    InvalidSnapshot(String),

    /// A versioned write found a different version than the caller expected.
    ///
    /// The caller should re-read the document and retry its change on top of
    /// the current version.
    #[error("version conflict on \"{key}\": expected version {expected}, found {actual}")]
    VersionConflict {
        /// The storage key that was written to.
        key: String,
        /// The version the caller based its write on.
        expected: u64,
        /// The version actually stored.
        actual: u64,
    },

    /// An unexpected I/O error from the storage backend.
    #[error("storage I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}
