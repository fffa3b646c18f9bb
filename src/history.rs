//! Filtering and searching the transaction history view.

use crate::models::{Transaction, TransactionType};

/// Which transaction types the history view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    /// Show both income and expenses.
    #[default]
    All,
    /// Show income only.
    Income,
    /// Show expenses only.
    Expense,
}

impl TypeFilter {
    fn matches(&self, kind: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionType::Income,
            TypeFilter::Expense => kind == TransactionType::Expense,
        }
    }
}

/// Filter the history by type and a case-insensitive search term matched
/// against the description and category. The result is sorted newest first.
///
/// An empty search term matches everything.
pub fn search<'a>(
    transactions: &'a [Transaction],
    filter: TypeFilter,
    term: &str,
) -> Vec<&'a Transaction> {
    let term = term.to_lowercase();

    let mut matches: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t.kind))
        .filter(|t| {
            term.is_empty()
                || t.description.to_lowercase().contains(&term)
                || t.category.to_lowercase().contains(&term)
        })
        .collect();

    matches.sort_by(|a, b| b.date.cmp(&a.date));

    matches
}
