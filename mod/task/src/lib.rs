pub mod api;
pub mod model;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::Router;
use tasklist_core::Module;
use tasklist_docstore::DocStore;

use service::TaskService;
use store::TaskStore;

/// The Task module — CRUD over persisted task records.
pub struct TaskModule {
    service: Arc<TaskService>,
}

impl TaskModule {
    pub fn new(db: Arc<dyn DocStore>) -> Self {
        let store = TaskStore::new(db);
        Self {
            service: Arc::new(TaskService::new(store)),
        }
    }
}

impl Module for TaskModule {
    fn name(&self) -> &str {
        "task"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.service))
    }
}
