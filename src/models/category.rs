//! This file defines the `CategoryName` type and the `Categories` document
//! that holds the income and expense category lists.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, models::TransactionType};

/// The name of a category, e.g. 'Makanan', 'Transport', 'Gaji'.
///
/// Guaranteed to be a non-empty string, including when deserialized from a
/// stored document or an imported snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    /// This function will return an error if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.trim().is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.trim().to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty. Violating the
    /// invariant causes incorrect behaviour but is not a safety issue, hence
    /// `_unchecked` without `unsafe`.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl TryFrom<String> for CategoryName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryName::new(&value)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The category set: one ordered list of unique names per transaction type.
///
/// This is the in-memory form of the persisted `categories` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categories {
    /// Categories available for income transactions.
    pub income: Vec<CategoryName>,
    /// Categories available for expense transactions.
    pub expense: Vec<CategoryName>,
}

impl Categories {
    /// The list of category names for the given transaction type.
    pub fn list(&self, kind: TransactionType) -> &[CategoryName] {
        match kind {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expense,
        }
    }

    /// Mutable access to the list for the given transaction type.
    pub(crate) fn list_mut(&mut self, kind: TransactionType) -> &mut Vec<CategoryName> {
        match kind {
            TransactionType::Income => &mut self.income,
            TransactionType::Expense => &mut self.expense,
        }
    }

    /// Whether `name` is present in the list for `kind`.
    pub fn contains(&self, kind: TransactionType, name: &CategoryName) -> bool {
        self.list(kind).contains(name)
    }
}

impl Default for Categories {
    fn default() -> Self {
        default_categories()
    }
}

/// The category set every fresh installation starts with.
///
/// These defaults are seeded into the store on first run and can never be
/// deleted.
pub fn default_categories() -> Categories {
    Categories {
        income: ["Gaji", "Freelance", "Bisnis", "Investasi", "Bonus"]
            .map(CategoryName::new_unchecked)
            .to_vec(),
        expense: [
            "Makanan",
            "Transport",
            "Belanja",
            "Tagihan",
            "Hiburan",
            "Kesehatan",
            "Pendidikan",
        ]
        .map(CategoryName::new_unchecked)
        .to_vec(),
    }
}
