//! Defines the store traits and their JSON document backed implementations.

mod category;
mod json;
mod transaction;

pub use category::CategoryStore;
pub use json::{JsonCategoryStore, JsonTransactionStore};
pub use transaction::TransactionStore;
