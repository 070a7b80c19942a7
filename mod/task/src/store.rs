use std::sync::Arc;

use tasklist_core::{ServiceError, new_id};
use tasklist_docstore::DocStore;

use crate::model::Task;

/// Collection prefix for task documents.
const PREFIX: &str = "tasks/";

fn doc_key(id: &str) -> String {
    format!("{PREFIX}{id}")
}

/// Persistent storage for tasks, backed by a DocStore.
///
/// Tasks are stored as JSON documents under `tasks/{id}`. The id is
/// assigned here on first save, like a document database generating the
/// primary key on insert.
pub struct TaskStore {
    db: Arc<dyn DocStore>,
}

impl TaskStore {
    pub fn new(db: Arc<dyn DocStore>) -> Self {
        Self { db }
    }

    /// Insert or replace a task. Assigns a fresh id when the task has none;
    /// returns the stored record including the assigned id.
    pub fn save(&self, mut task: Task) -> Result<Task, ServiceError> {
        let id = match task.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => new_id(),
        };
        task.id = Some(id.clone());

        let data =
            serde_json::to_vec(&task).map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.db
            .put(&doc_key(&id), &data)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(task)
    }

    /// Get a task by id. Returns None if it does not exist.
    pub fn find_by_id(&self, id: &str) -> Result<Option<Task>, ServiceError> {
        let data = self
            .db
            .get(&doc_key(id))
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        match data {
            Some(bytes) => {
                let task = serde_json::from_slice(&bytes)
                    .map_err(|e| ServiceError::Internal(e.to_string()))?;
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    /// All stored tasks, in key order.
    pub fn find_all(&self) -> Result<Vec<Task>, ServiceError> {
        let entries = self
            .db
            .scan(PREFIX)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let mut tasks = Vec::with_capacity(entries.len());
        for (_, bytes) in entries {
            let task = serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Internal(e.to_string()))?;
            tasks.push(task);
        }
        Ok(tasks)
    }

    /// Delete a task by id. Returns false if it did not exist.
    pub fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        self.db
            .delete(&doc_key(id))
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }

    /// Check whether a task exists.
    pub fn exists_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        self.db
            .exists(&doc_key(id))
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }

    /// Remove every task. Returns the number removed.
    pub fn delete_all(&self) -> Result<u64, ServiceError> {
        self.db
            .delete_prefix(PREFIX)
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }

    /// Number of stored tasks.
    pub fn count(&self) -> Result<u64, ServiceError> {
        self.db
            .count(PREFIX)
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}
