//! Implements a JSON document backed category store.

use std::sync::Arc;

use crate::{
    Error,
    models::{Categories, CategoryName, TransactionType, default_categories},
    storage::{StorageBackend, Version},
    stores::{
        CategoryStore,
        json::{read_categories, read_transactions, write_categories},
    },
};

/// Maintains the category lists in the `categories` JSON document.
///
/// The store also reads the `transactions` document: deleting a category
/// requires a referential integrity check, which is a linear scan over the
/// transaction history since the flat document has no index.
#[derive(Clone)]
pub struct JsonCategoryStore {
    storage: Arc<dyn StorageBackend>,
}

impl JsonCategoryStore {
    /// Create a category store on top of `storage`.
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Read the category set and its document version, seeding the default
    /// set when no document exists yet.
    fn get_with_version(&self) -> Result<(Categories, Version), Error> {
        if let Some((categories, version)) = read_categories(self.storage.as_ref())? {
            return Ok((categories, version));
        }

        let defaults = default_categories();
        let version = write_categories(self.storage.as_ref(), &defaults, 0)?;
        tracing::info!("seeded the default category set");

        Ok((defaults, version))
    }
}

impl CategoryStore for JsonCategoryStore {
    fn get_all(&self) -> Result<Categories, Error> {
        self.get_with_version().map(|(categories, _)| categories)
    }

    fn add(&self, kind: TransactionType, name: CategoryName) -> Result<(), Error> {
        let (mut categories, version) = self.get_with_version()?;

        if categories.contains(kind, &name) {
            return Err(Error::DuplicateCategory {
                kind,
                name: name.to_string(),
            });
        }

        categories.list_mut(kind).push(name);
        write_categories(self.storage.as_ref(), &categories, version)?;

        Ok(())
    }

    fn delete(&self, kind: TransactionType, name: &CategoryName) -> Result<(), Error> {
        let (mut categories, version) = self.get_with_version()?;

        if !categories.contains(kind, name) {
            return Err(Error::CategoryNotFound {
                kind,
                name: name.to_string(),
            });
        }

        if default_categories().contains(kind, name) {
            return Err(Error::DefaultCategory {
                kind,
                name: name.to_string(),
            });
        }

        let count = self.usage_count(kind, name)?;
        if count > 0 {
            tracing::warn!("refused to delete {kind} category \"{name}\" used by {count} transaction(s)");
            return Err(Error::CategoryInUse {
                kind,
                name: name.to_string(),
                count,
            });
        }

        categories.list_mut(kind).retain(|category| category != name);
        write_categories(self.storage.as_ref(), &categories, version)?;

        Ok(())
    }

    fn usage_count(&self, kind: TransactionType, name: &CategoryName) -> Result<usize, Error> {
        let (transactions, _) = read_transactions(self.storage.as_ref())?;

        Ok(transactions
            .iter()
            .filter(|t| t.kind == kind && t.category == name.as_ref())
            .count())
    }
}
