//! Implements a file backed storage backend.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::{
    Error,
    storage::{Document, StorageBackend, Subscriber, Version},
};

/// Stores each JSON document as `<key>.json` inside a data directory.
///
/// Writes go to a temporary file in the same directory and are then renamed
/// over the target, so a crash mid-write leaves the previous document intact.
/// Versions are tracked per process; a document that already existed on disk
/// when the process started counts as version 1.
pub struct FileStorage {
    dir: PathBuf,
    versions: Mutex<HashMap<String, Version>>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl FileStorage {
    /// Open (or create) the data directory at `dir`.
    ///
    /// # Errors
    /// Returns an I/O error if the directory cannot be created.
    pub fn open(dir: &Path) -> Result<Self, Error> {
        fs::create_dir_all(dir)?;

        Ok(Self {
            dir: dir.to_owned(),
            versions: Mutex::new(HashMap::new()),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The current version of `key`, with documents left behind by a
    /// previous process counted as version 1.
    fn current_version(&self, versions: &HashMap<String, Version>, key: &str) -> Version {
        match versions.get(key) {
            Some(version) => *version,
            None if self.path(key).exists() => 1,
            None => 0,
        }
    }

    fn notify(&self, key: &str, version: Version) {
        let subscribers = self.subscribers.lock().unwrap_or_else(|err| err.into_inner());

        for subscriber in subscribers.iter() {
            subscriber(key, version);
        }
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Document>, Error> {
        let mut versions = self.versions.lock().unwrap_or_else(|err| err.into_inner());

        let json = match fs::read_to_string(self.path(key)) {
            Ok(json) => json,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        // The file exists but predates this process, so it counts as the
        // first committed version.
        let version = *versions.entry(key.to_owned()).or_insert(1);

        Ok(Some(Document { json, version }))
    }

    fn write(&self, key: &str, json: &str, expected: Option<Version>) -> Result<Version, Error> {
        let new_version = {
            let mut versions = self.versions.lock().unwrap_or_else(|err| err.into_inner());
            let current = self.current_version(&versions, key);

            if let Some(expected) = expected
                && expected != current
            {
                return Err(Error::VersionConflict {
                    key: key.to_owned(),
                    expected,
                    actual: current,
                });
            }

            let tmp_path = self.dir.join(format!(".{key}.json.tmp"));
            fs::write(&tmp_path, json)?;
            fs::rename(&tmp_path, self.path(key))?;

            let new_version = current + 1;
            versions.insert(key.to_owned(), new_version);
            new_version
        };

        tracing::debug!("wrote \"{key}\" at version {new_version}");
        self.notify(key, new_version);

        Ok(new_version)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let new_version = {
            let mut versions = self.versions.lock().unwrap_or_else(|err| err.into_inner());

            match fs::remove_file(self.path(key)) {
                Ok(()) => {}
                Err(error) if error.kind() == ErrorKind::NotFound => return Ok(()),
                Err(error) => return Err(error.into()),
            }

            let new_version = self.current_version(&versions, key) + 1;
            versions.insert(key.to_owned(), new_version);
            new_version
        };

        tracing::debug!("removed \"{key}\" at version {new_version}");
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

#[cfg(test)]
mod file_storage_tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use tempfile::TempDir;

    use crate::{Error, storage::StorageBackend};

    use super::FileStorage;

    fn get_test_storage() -> (FileStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        (storage, dir)
    }

    #[test]
    fn read_missing_key_returns_none() {
        let (storage, _dir) = get_test_storage();

        assert_eq!(storage.read("transactions"), Ok(None));
    }

    #[test]
    fn write_then_read_round_trips() {
        let (storage, _dir) = get_test_storage();

        let version = storage.write("transactions", "[]", None).unwrap();
        let document = storage.read("transactions").unwrap().unwrap();

        assert_eq!(version, 1);
        assert_eq!(document.json, "[]");
        assert_eq!(document.version, 1);
    }

    #[test]
    fn versioned_write_with_stale_version_is_refused() {
        let (storage, _dir) = get_test_storage();

        storage.write("transactions", "[]", None).unwrap();
        let document = storage.read("transactions").unwrap().unwrap();

        // A second writer gets in first.
        storage
            .write("transactions", "[1]", Some(document.version))
            .unwrap();

        let result = storage.write("transactions", "[2]", Some(document.version));

        assert_eq!(
            result,
            Err(Error::VersionConflict {
                key: "transactions".to_owned(),
                expected: 1,
                actual: 2,
            })
        );
        let current = storage.read("transactions").unwrap().unwrap();
        assert_eq!(current.json, "[1]");
    }

    #[test]
    fn versioned_write_against_absent_key_expects_zero() {
        let (storage, _dir) = get_test_storage();

        assert!(storage.write("categories", "{}", Some(0)).is_ok());
        assert_eq!(
            storage.write("categories", "{}", Some(0)),
            Err(Error::VersionConflict {
                key: "categories".to_owned(),
                expected: 0,
                actual: 1,
            })
        );
    }

    #[test]
    fn document_from_previous_process_counts_as_version_one() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("transactions.json"), "[]").unwrap();

        let storage = FileStorage::open(dir.path()).unwrap();
        let document = storage.read("transactions").unwrap().unwrap();

        assert_eq!(document.version, 1);
    }

    #[test]
    fn remove_deletes_the_document() {
        let (storage, _dir) = get_test_storage();

        storage.write("transactions", "[]", None).unwrap();
        storage.remove("transactions").unwrap();

        assert_eq!(storage.read("transactions"), Ok(None));
    }

    #[test]
    fn remove_missing_key_is_a_no_op() {
        let (storage, _dir) = get_test_storage();

        assert_eq!(storage.remove("transactions"), Ok(()));
    }

    #[test]
    fn subscribers_are_notified_on_write_and_remove() {
        let (storage, _dir) = get_test_storage();
        let notifications = Arc::new(AtomicUsize::new(0));

        let counter = notifications.clone();
        storage.subscribe(Box::new(move |key, _version| {
            assert_eq!(key, "transactions");
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        storage.write("transactions", "[]", None).unwrap();
        storage.remove("transactions").unwrap();

        assert_eq!(notifications.load(Ordering::SeqCst), 2);
    }
}
