//! Defines the transaction store trait.

use crate::{
    Error,
    models::{Transaction, TransactionBuilder},
};

/// Records and retrieves transactions.
///
/// The transaction history is append-only: records are immutable once
/// created and there is no per-transaction delete, only clearing the whole
/// store via [crate::export::clear].
pub trait TransactionStore {
    /// Assign an ID to the transaction described by `builder` and append it
    /// to the store.
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Get the full transaction history in insertion order.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;
}
