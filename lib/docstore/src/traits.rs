use crate::error::DocStoreError;

/// DocStore provides a document storage interface over keyed collections.
///
/// Keys follow a namespaced convention: `tasks/0f3a...`, `{collection}/{id}`.
/// Values are opaque document bytes (JSON in practice); the store does not
/// interpret them. Each call is atomic with respect to a single document.
pub trait DocStore: Send + Sync {
    /// Get the document for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DocStoreError>;

    /// Store a document under a key, replacing any existing document.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), DocStoreError>;

    /// Delete a document. Returns false if the key did not exist.
    fn delete(&self, key: &str) -> Result<bool, DocStoreError>;

    /// Check whether a key exists.
    fn exists(&self, key: &str) -> Result<bool, DocStoreError>;

    /// Scan all documents whose key matches a prefix.
    /// Returns (key, value) pairs sorted by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, DocStoreError>;

    /// Delete every document whose key matches a prefix.
    /// Returns the number of documents removed.
    fn delete_prefix(&self, prefix: &str) -> Result<u64, DocStoreError>;

    /// Count the documents whose key matches a prefix.
    fn count(&self, prefix: &str) -> Result<u64, DocStoreError>;
}
