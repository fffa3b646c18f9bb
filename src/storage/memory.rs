//! Implements an in-memory storage backend for tests.

use std::{collections::HashMap, sync::Mutex};

use crate::{
    Error,
    storage::{Document, StorageBackend, Subscriber, Version},
};

#[derive(Default)]
struct State {
    documents: HashMap<String, String>,
    versions: HashMap<String, Version>,
}

/// A HashMap backed storage backend.
///
/// Behaves like [FileStorage](crate::storage::FileStorage) without touching
/// the file system. Intended for tests and ad-hoc tooling.
#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<State>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn notify(&self, key: &str, version: Version) {
        let subscribers = self.subscribers.lock().unwrap_or_else(|err| err.into_inner());

        for subscriber in subscribers.iter() {
            subscriber(key, version);
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Document>, Error> {
        let state = self.state.lock().unwrap_or_else(|err| err.into_inner());

        Ok(state.documents.get(key).map(|json| Document {
            json: json.clone(),
            version: state.versions.get(key).copied().unwrap_or(1),
        }))
    }

    fn write(&self, key: &str, json: &str, expected: Option<Version>) -> Result<Version, Error> {
        let new_version = {
            let mut state = self.state.lock().unwrap_or_else(|err| err.into_inner());
            let current = state.versions.get(key).copied().unwrap_or(0);

            if let Some(expected) = expected
                && expected != current
            {
                return Err(Error::VersionConflict {
                    key: key.to_owned(),
                    expected,
                    actual: current,
                });
            }

            let new_version = current + 1;
            state.documents.insert(key.to_owned(), json.to_owned());
            state.versions.insert(key.to_owned(), new_version);
            new_version
        };

        self.notify(key, new_version);

        Ok(new_version)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let new_version = {
            let mut state = self.state.lock().unwrap_or_else(|err| err.into_inner());

            if state.documents.remove(key).is_none() {
                return Ok(());
            }

            let new_version = state.versions.get(key).copied().unwrap_or(0) + 1;
            state.versions.insert(key.to_owned(), new_version);
            new_version
        };

        self.notify(key, new_version);

        Ok(())
    }

    fn subscribe(&self, subscriber: Subscriber) {
        self.subscribers
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .push(subscriber);
    }
}
