//! Implements a JSON document backed transaction store.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::{
    Error,
    models::{Transaction, TransactionBuilder},
    storage::StorageBackend,
    stores::{
        TransactionStore,
        json::{read_transactions, write_transactions},
    },
};

/// Records and retrieves transactions in the `transactions` JSON document.
#[derive(Clone)]
pub struct JsonTransactionStore {
    storage: Arc<dyn StorageBackend>,
}

impl JsonTransactionStore {
    /// Create a transaction store on top of `storage`.
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }
}

impl TransactionStore for JsonTransactionStore {
    /// Append a transaction to the store.
    ///
    /// The ID is the creation time in unix milliseconds, bumped by one while
    /// it collides with an existing record so IDs stay unique even when two
    /// transactions are recorded within the same millisecond.
    ///
    /// # Errors
    /// Returns an error if the builder holds an invalid amount or category,
    /// if the stored document is malformed, or if another writer updated the
    /// document in between (version conflict).
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let (mut transactions, version) = read_transactions(self.storage.as_ref())?;

        let now_millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let mut candidate = now_millis;
        while transactions.iter().any(|t| t.id == candidate.to_string()) {
            candidate += 1;
        }

        let transaction = builder.finalize(candidate.to_string())?;
        transactions.push(transaction.clone());

        write_transactions(self.storage.as_ref(), &transactions, version)?;
        tracing::info!(
            "recorded {} of {} in category \"{}\"",
            transaction.kind,
            transaction.amount,
            transaction.category
        );

        Ok(transaction)
    }

    /// Get the full transaction history in insertion order.
    ///
    /// # Errors
    /// Returns [Error::MalformedDocument] if the stored document is not a
    /// JSON array of transactions, and [Error::InvalidRecord] if any record
    /// fails validation.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        read_transactions(self.storage.as_ref()).map(|(transactions, _)| transactions)
    }
}

#[cfg(test)]
mod json_transaction_store_tests {
    use std::sync::Arc;

    use time::macros::datetime;

    use crate::{
        Error,
        models::{Transaction, TransactionType},
        storage::{MemoryStorage, StorageBackend, TRANSACTIONS_KEY},
        stores::TransactionStore,
    };

    use super::JsonTransactionStore;

    fn get_test_store() -> (JsonTransactionStore, Arc<dyn StorageBackend>) {
        let storage: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());

        (JsonTransactionStore::new(storage.clone()), storage)
    }

    #[test]
    fn get_all_returns_empty_history_when_nothing_stored() {
        let (store, _) = get_test_store();

        assert_eq!(store.get_all(), Ok(Vec::new()));
    }

    #[test]
    fn create_appends_in_insertion_order() {
        let (store, _) = get_test_store();

        let first = store
            .create(Transaction::build(
                TransactionType::Income,
                5_000_000.0,
                "Gaji bulanan",
                "Gaji",
            ))
            .unwrap();
        let second = store
            .create(Transaction::build(
                TransactionType::Expense,
                25_000.0,
                "Nasi goreng",
                "Makanan",
            ))
            .unwrap();

        let transactions = store.get_all().unwrap();

        assert_eq!(transactions, vec![first, second]);
    }

    #[test]
    fn create_assigns_unique_ids() {
        let (store, _) = get_test_store();

        let mut ids = Vec::new();
        for _ in 0..10 {
            let transaction = store
                .create(Transaction::build(
                    TransactionType::Expense,
                    1_000.0,
                    "Parkir",
                    "Transport",
                ))
                .unwrap();
            ids.push(transaction.id);
        }

        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn create_rejects_invalid_amount() {
        let (store, _) = get_test_store();

        let result = store.create(Transaction::build(
            TransactionType::Expense,
            -10.0,
            "Oops",
            "Makanan",
        ));

        assert_eq!(result, Err(Error::InvalidAmount(-10.0)));
        assert_eq!(store.get_all(), Ok(Vec::new()));
    }

    #[test]
    fn get_all_rejects_document_that_is_not_an_array() {
        let (store, storage) = get_test_store();

        storage
            .write(TRANSACTIONS_KEY, "{\"not\": \"an array\"}", None)
            .unwrap();

        assert!(matches!(
            store.get_all(),
            Err(Error::MalformedDocument { .. })
        ));
    }

    #[test]
    fn get_all_rejects_record_with_negative_amount() {
        let (store, storage) = get_test_store();

        let json = r#"[{
            "id": "1",
            "type": "expense",
            "amount": -5.0,
            "description": "corrupt",
            "category": "Makanan",
            "date": "2025-01-15T12:00:00Z"
        }]"#;
        storage.write(TRANSACTIONS_KEY, json, None).unwrap();

        assert!(matches!(store.get_all(), Err(Error::InvalidRecord { .. })));
    }

    #[test]
    fn get_all_rejects_record_with_missing_field() {
        let (store, storage) = get_test_store();

        let json = r#"[{"id": "1", "type": "expense", "amount": 5.0}]"#;
        storage.write(TRANSACTIONS_KEY, json, None).unwrap();

        assert!(matches!(
            store.get_all(),
            Err(Error::MalformedDocument { .. })
        ));
    }

    #[test]
    fn get_all_rejects_record_with_unknown_type_tag() {
        let (store, storage) = get_test_store();

        let json = r#"[{
            "id": "1",
            "type": "transfer",
            "amount": 5.0,
            "description": "corrupt",
            "category": "Makanan",
            "date": "2025-01-15T12:00:00Z"
        }]"#;
        storage.write(TRANSACTIONS_KEY, json, None).unwrap();

        assert!(matches!(
            store.get_all(),
            Err(Error::MalformedDocument { .. })
        ));
    }

    #[test]
    fn stored_document_matches_browser_layout() {
        let (store, storage) = get_test_store();

        store
            .create(
                Transaction::build(TransactionType::Income, 100.0, "Gaji", "Gaji")
                    .date(datetime!(2025-01-15 12:00 UTC)),
            )
            .unwrap();

        let document = storage.read(TRANSACTIONS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&document.json).unwrap();

        let record = &value.as_array().unwrap()[0];
        assert_eq!(record["type"], "income");
        assert_eq!(record["amount"], 100.0);
        assert_eq!(record["date"], "2025-01-15T12:00:00Z");
    }
}
