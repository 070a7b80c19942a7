use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use tasklist_core::ServiceError;

use crate::model::Task;
use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tasks",
            get(list_tasks).post(create_task).delete(delete_all_tasks),
        )
        .route("/tasks/count", get(count_tasks))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::NotFound(format!("task '{id}' not found"))
}

// ---------------------------------------------------------------------------
// POST /tasks
// ---------------------------------------------------------------------------

async fn create_task(
    State(svc): State<AppState>,
    Json(task): Json<Task>,
) -> Result<(StatusCode, Json<Task>), ServiceError> {
    let created = svc.create_task(task)?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------------------
// GET /tasks
// ---------------------------------------------------------------------------

async fn list_tasks(State(svc): State<AppState>) -> Result<Json<Vec<Task>>, ServiceError> {
    Ok(Json(svc.list_tasks()?))
}

// ---------------------------------------------------------------------------
// GET /tasks/count
// ---------------------------------------------------------------------------

async fn count_tasks(State(svc): State<AppState>) -> Result<Json<u64>, ServiceError> {
    Ok(Json(svc.count_tasks()?))
}

// ---------------------------------------------------------------------------
// GET /tasks/:id
// ---------------------------------------------------------------------------

async fn get_task(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ServiceError> {
    svc.get_task(&id)?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

// ---------------------------------------------------------------------------
// PUT /tasks/:id
// ---------------------------------------------------------------------------

async fn update_task(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(task): Json<Task>,
) -> Result<Json<Task>, ServiceError> {
    svc.update_task(&id, task)?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

// ---------------------------------------------------------------------------
// DELETE /tasks/:id
// ---------------------------------------------------------------------------

async fn delete_task(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    if svc.delete_task(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}

// ---------------------------------------------------------------------------
// DELETE /tasks
// ---------------------------------------------------------------------------

async fn delete_all_tasks(State(svc): State<AppState>) -> Result<StatusCode, ServiceError> {
    svc.delete_all_tasks()?;
    Ok(StatusCode::NO_CONTENT)
}
