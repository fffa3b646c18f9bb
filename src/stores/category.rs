//! Defines the category store trait.

use crate::{
    Error,
    models::{Categories, CategoryName, TransactionType},
};

/// Maintains the income and expense category lists.
pub trait CategoryStore {
    /// Get the category set, seeding the defaults on first use.
    fn get_all(&self) -> Result<Categories, Error>;

    /// Append `name` to the list for `kind`.
    ///
    /// # Errors
    /// Returns [Error::DuplicateCategory] if the name is already in the list.
    fn add(&self, kind: TransactionType, name: CategoryName) -> Result<(), Error>;

    /// Remove `name` from the list for `kind`.
    ///
    /// The operation is refused if `name` is part of the default set, or if
    /// any transaction with the same type still references it. On success
    /// exactly one entry is removed.
    fn delete(&self, kind: TransactionType, name: &CategoryName) -> Result<(), Error>;

    /// How many transactions of type `kind` reference the category `name`.
    fn usage_count(&self, kind: TransactionType, name: &CategoryName) -> Result<usize, Error>;
}
