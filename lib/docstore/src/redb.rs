use std::path::Path;
use std::sync::Arc;

use redb::{Database, TableDefinition};
use tracing::info;

use crate::error::DocStoreError;
use crate::traits::DocStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("docs");

/// RedbStore is a DocStore implementation backed by redb — a pure-Rust
/// embedded key-value database. Each call runs in its own transaction,
/// so single-document operations are atomic.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, DocStoreError> {
        let db = Database::create(path).map_err(|e| DocStoreError::Storage(e.to_string()))?;

        // Ensure the table exists by doing a write transaction.
        let write_txn = db
            .begin_write()
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        {
            let _table = write_txn
                .open_table(TABLE)
                .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;

        info!("opened document store at {}", path.display());

        Ok(Self { db: Arc::new(db) })
    }
}

impl DocStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DocStoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(DocStoreError::Storage(e.to_string())),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), DocStoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| DocStoreError::Storage(e.to_string()))?;
            table
                .insert(key, value)
                .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, DocStoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        let removed = {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| DocStoreError::Storage(e.to_string()))?;
            table
                .remove(key)
                .map_err(|e| DocStoreError::Storage(e.to_string()))?
                .is_some()
        };
        write_txn
            .commit()
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        Ok(removed)
    }

    fn exists(&self, key: &str) -> Result<bool, DocStoreError> {
        Ok(self.get(key)?.is_some())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, DocStoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        let iter = table
            .range(prefix..)
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;

        for entry in iter {
            let entry = entry.map_err(|e| DocStoreError::Storage(e.to_string()))?;
            let key = entry.0.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            let value = entry.1.value().to_vec();
            results.push((key, value));
        }

        Ok(results)
    }

    fn delete_prefix(&self, prefix: &str) -> Result<u64, DocStoreError> {
        // Collect the matching keys first; redb does not allow removing
        // while iterating the same table.
        let keys: Vec<String> = self.scan(prefix)?.into_iter().map(|(k, _)| k).collect();

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        let mut removed = 0u64;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| DocStoreError::Storage(e.to_string()))?;
            for key in &keys {
                if table
                    .remove(key.as_str())
                    .map_err(|e| DocStoreError::Storage(e.to_string()))?
                    .is_some()
                {
                    removed += 1;
                }
            }
        }
        write_txn
            .commit()
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        Ok(removed)
    }

    fn count(&self, prefix: &str) -> Result<u64, DocStoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;

        let mut count = 0u64;
        let iter = table
            .range(prefix..)
            .map_err(|e| DocStoreError::Storage(e.to_string()))?;

        for entry in iter {
            let entry = entry.map_err(|e| DocStoreError::Storage(e.to_string()))?;
            if !entry.0.value().starts_with(prefix) {
                break;
            }
            count += 1;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (RedbStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("test.redb")).unwrap();
        (store, dir)
    }

    #[test]
    fn get_missing_returns_none() {
        let (store, _dir) = open_store();
        assert!(store.get("tasks/missing").unwrap().is_none());
    }

    #[test]
    fn put_then_get() {
        let (store, _dir) = open_store();
        store.put("tasks/a", b"{\"x\":1}").unwrap();
        assert_eq!(store.get("tasks/a").unwrap().unwrap(), b"{\"x\":1}");
    }

    #[test]
    fn put_replaces_existing() {
        let (store, _dir) = open_store();
        store.put("tasks/a", b"v1").unwrap();
        store.put("tasks/a", b"v2").unwrap();
        assert_eq!(store.get("tasks/a").unwrap().unwrap(), b"v2");
        assert_eq!(store.count("tasks/").unwrap(), 1);
    }

    #[test]
    fn delete_reports_presence() {
        let (store, _dir) = open_store();
        store.put("tasks/a", b"v").unwrap();
        assert!(store.delete("tasks/a").unwrap());
        assert!(!store.delete("tasks/a").unwrap());
        assert!(store.get("tasks/a").unwrap().is_none());
    }

    #[test]
    fn exists_matches_get() {
        let (store, _dir) = open_store();
        assert!(!store.exists("tasks/a").unwrap());
        store.put("tasks/a", b"v").unwrap();
        assert!(store.exists("tasks/a").unwrap());
    }

    #[test]
    fn scan_is_prefix_bounded_and_sorted() {
        let (store, _dir) = open_store();
        store.put("tasks/b", b"2").unwrap();
        store.put("tasks/a", b"1").unwrap();
        store.put("other/c", b"3").unwrap();

        let entries = store.scan("tasks/").unwrap();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["tasks/a", "tasks/b"]);
    }

    #[test]
    fn delete_prefix_leaves_other_collections() {
        let (store, _dir) = open_store();
        store.put("tasks/a", b"1").unwrap();
        store.put("tasks/b", b"2").unwrap();
        store.put("other/c", b"3").unwrap();

        assert_eq!(store.delete_prefix("tasks/").unwrap(), 2);
        assert_eq!(store.count("tasks/").unwrap(), 0);
        assert_eq!(store.count("other/").unwrap(), 1);
    }

    #[test]
    fn delete_prefix_on_empty_is_zero() {
        let (store, _dir) = open_store();
        assert_eq!(store.delete_prefix("tasks/").unwrap(), 0);
    }

    #[test]
    fn count_tracks_puts_and_deletes() {
        let (store, _dir) = open_store();
        assert_eq!(store.count("tasks/").unwrap(), 0);
        store.put("tasks/a", b"1").unwrap();
        store.put("tasks/b", b"2").unwrap();
        assert_eq!(store.count("tasks/").unwrap(), 2);
        store.delete("tasks/a").unwrap();
        assert_eq!(store.count("tasks/").unwrap(), 1);
    }
}
