use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{routing::get, Json, Router};
use axum::http::StatusCode;

use crate::application::task_service::TaskService;
use crate::domain::error::StorageError;
use crate::domain::task::{Task, TaskId};
use crate::http::types::{ApiError, CreateTaskBody, UpdateTaskBody};

#[derive(Clone)]
pub struct AppState<S: TaskService> { pub service: S }

pub fn router<S: TaskService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks::<S>).post(create_task::<S>))
        .route("/api/tasks/:id", get(get_task::<S>).put(update_task::<S>).delete(delete_task::<S>))
        .with_state(state)
}

async fn list_tasks<S: TaskService>(State(state): State<AppState<S>>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.service.list().await.map_err(internal("Error retrieving tasks"))?;
    Ok(Json(tasks))
}

async fn get_task<S: TaskService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Task>, ApiError> {
    let task = state.service.get(&parse_id(&id)).await.map_err(internal("Error retrieving task"))?;
    task.map(Json).ok_or(ApiError::NotFound)
}

async fn create_task<S: TaskService>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(body) = payload?;
    let input = body.validate()?;
    let task = state.service.create(input).await.map_err(internal("Error creating task"))?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task<S: TaskService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(body) = payload?;
    let patch = body.validate()?;
    let updated = state.service.update(&parse_id(&id), patch).await.map_err(internal("Error updating task"))?;
    updated.map(Json).ok_or(ApiError::NotFound)
}

async fn delete_task<S: TaskService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let deleted = state.service.delete(&parse_id(&id)).await.map_err(internal("Error deleting task"))?;
    if deleted { Ok(StatusCode::NO_CONTENT) } else { Err(ApiError::NotFound) }
}

/// Every path segment names some id; adapters answer "not found" for ids
/// outside their scheme.
fn parse_id(raw: &str) -> TaskId {
    match raw.parse() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

/// Logs the backend failure and replaces it with a generic client message.
fn internal(message: &'static str) -> impl FnOnce(StorageError) -> ApiError {
    move |e| {
        tracing::error!(error = %e, "{message}");
        ApiError::Internal(message)
    }
}
