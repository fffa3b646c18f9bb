//! Dashboard derivations: all-time totals and the recent transaction list.
//!
//! Unlike [crate::reports], everything here runs over the entire history.
//! The dashboard balance and the windowed report net are distinct
//! computations and are kept separate on purpose.

use crate::models::{Transaction, TransactionType};

/// All-time income, expense and balance totals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// Sum of all income amounts.
    pub income: f64,
    /// Sum of all expense amounts.
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

/// Compute the all-time totals over the full transaction history.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let income: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Income)
        .map(|t| t.amount)
        .sum();
    let expense: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense)
        .map(|t| t.amount)
        .sum();

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// The `n` most recent transactions, newest first.
pub fn recent(transactions: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);

    sorted
}
