//! This file defines the `Transaction` type, the builder used to create one,
//! and the income/expense type tag.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Whether a transaction adds money to or removes money from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, e.g. wages.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are immutable once recorded: there is no edit or delete, only
/// clearing the whole store. To create a new `Transaction`, use
/// [Transaction::build] and pass the builder to a
/// [crate::stores::TransactionStore], which assigns the ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// A unique ID derived from the creation timestamp in unix milliseconds.
    pub id: String,
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The amount of money spent or earned. Always finite and non-negative,
    /// the direction comes from `kind`.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The name of the category this transaction is filed under.
    pub category: String,
    /// When the transaction happened, stored as an RFC 3339 timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        kind: TransactionType,
        amount: f64,
        description: &str,
        category: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            description: description.to_owned(),
            category: category.to_owned(),
            date: None,
        }
    }

    /// Check that a stored record holds values the aggregations can trust.
    ///
    /// # Errors
    /// Returns a human-readable reason if the amount is negative, NaN or
    /// infinite, or if the ID or category is an empty string.
    pub(crate) fn check(&self) -> Result<(), String> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(format!("transaction {:?} has amount {}", self.id, self.amount));
        }

        if self.id.is_empty() {
            return Err("transaction has an empty ID".to_owned());
        }

        if self.category.is_empty() {
            return Err(format!("transaction {:?} has an empty category", self.id));
        }

        Ok(())
    }
}

/// A builder for creating [Transaction] instances.
///
/// The date defaults to the current time if not specified, which matches how
/// transactions are recorded interactively. The ID is not part of the
/// builder: it is assigned by the store when the transaction is appended.
///
/// # Examples
///
/// ```rust
/// use time::macros::datetime;
///
/// use uangku::models::{Transaction, TransactionType};
///
/// let builder = Transaction::build(
///         TransactionType::Expense,
///         25_000.0,
///         "Nasi goreng",
///         "Makanan",
///     )
///     .date(datetime!(2025-01-15 12:30 UTC));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// Whether the transaction is income or an expense.
    pub kind: TransactionType,
    /// The monetary amount. Must be finite and non-negative, the direction
    /// is carried by `kind` rather than the sign.
    pub amount: f64,
    /// A human-readable description of the transaction.
    pub description: String,
    /// The category name the transaction is filed under.
    pub category: String,
    /// When the transaction happened. `None` means "now".
    pub date: Option<OffsetDateTime>,
}

impl TransactionBuilder {
    /// Set an explicit transaction date instead of the current time.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Turn the builder into a [Transaction] with the given ID.
    ///
    /// The category is trimmed so that the stored name always matches the
    /// listed [crate::models::CategoryName], which trims on construction.
    /// Without this, a padded name would slip past the referential scan that
    /// guards category deletion.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount is negative, NaN or
    /// infinite, and [Error::EmptyCategoryName] if the category is empty or
    /// whitespace.
    pub(crate) fn finalize(self, id: String) -> Result<Transaction, Error> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        let category = self.category.trim().to_owned();
        if category.is_empty() {
            return Err(Error::EmptyCategoryName);
        }

        let date = self.date.unwrap_or_else(OffsetDateTime::now_utc);

        Ok(Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            category,
            date,
        })
    }
}
