pub mod tasks;

use std::sync::Arc;

use axum::Router;

use crate::service::TaskService;

/// Shared application state.
pub type AppState = Arc<TaskService>;

/// Build the task API router, mounted under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new().nest("/api", tasks::routes()).with_state(state)
}
