//! The domain models: transactions and the category set.

mod category;
mod transaction;

pub use category::{Categories, CategoryName, default_categories};
pub use transaction::{Transaction, TransactionBuilder, TransactionType};
