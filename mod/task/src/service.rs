use tracing::{info, warn};

use tasklist_core::ServiceError;

use crate::model::Task;
use crate::store::TaskStore;

/// Business rules over the task store.
///
/// Creation rejects empty titles and always persists `completed = false`;
/// update overwrites title, description and completed wholesale and is the
/// only way to mark a task completed.
pub struct TaskService {
    store: TaskStore,
}

impl TaskService {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    /// Create a new task. The title must be non-empty; a client-supplied
    /// `completed: true` is reset to false before persisting.
    pub fn create_task(&self, mut task: Task) -> Result<Task, ServiceError> {
        info!("creating new task with title: {}", task.title);

        if task.title.trim().is_empty() {
            return Err(ServiceError::Validation("task title cannot be empty".into()));
        }

        if task.completed {
            warn!("new task cannot be completed, resetting to false");
            task.completed = false;
        }

        let saved = self.store.save(task)?;
        info!(
            "task created with id: {}",
            saved.id.as_deref().unwrap_or_default()
        );
        Ok(saved)
    }

    /// Get a task by id.
    pub fn get_task(&self, id: &str) -> Result<Option<Task>, ServiceError> {
        info!("fetching task with id: {}", id);
        self.store.find_by_id(id)
    }

    /// All tasks, unfiltered.
    pub fn list_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        info!("fetching all tasks");
        self.store.find_all()
    }

    /// Overwrite a task's title, description and completed flag, keeping
    /// its id. Returns None when the id does not exist — nothing is created.
    ///
    /// Unlike creation, update does not reset `completed`.
    pub fn update_task(&self, id: &str, new_data: Task) -> Result<Option<Task>, ServiceError> {
        info!("updating task with id: {}", id);

        let Some(mut existing) = self.store.find_by_id(id)? else {
            return Ok(None);
        };

        existing.title = new_data.title;
        existing.description = new_data.description;
        existing.completed = new_data.completed;

        let updated = self.store.save(existing)?;
        info!("task updated: {}", id);
        Ok(Some(updated))
    }

    /// Delete a task by id. Returns false (not an error) when it is missing.
    pub fn delete_task(&self, id: &str) -> Result<bool, ServiceError> {
        info!("deleting task with id: {}", id);

        let deleted = self.store.delete_by_id(id)?;
        if deleted {
            info!("task deleted: {}", id);
        } else {
            warn!("task not found: {}", id);
        }
        Ok(deleted)
    }

    /// Clear the whole collection. Idempotent.
    pub fn delete_all_tasks(&self) -> Result<(), ServiceError> {
        let removed = self.store.delete_all()?;
        info!("deleted all tasks ({} removed)", removed);
        Ok(())
    }

    /// Number of stored tasks.
    pub fn count_tasks(&self) -> Result<u64, ServiceError> {
        let count = self.store.count()?;
        info!("total tasks count: {}", count);
        Ok(count)
    }
}
