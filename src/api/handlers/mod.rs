use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::{Store, StoreError};
use crate::models::*;
use crate::views::{self, ViewType};

// ============================================================
// Error Handling
// ============================================================

/// Translate a store failure into a response.
///
/// The two classified failures map to meaningful statuses; anything else is
/// logged server-side in full and reported to the client as a generic 500 so
/// internal details never leak.
fn store_error(e: anyhow::Error) -> (StatusCode, String) {
    match e.downcast_ref::<StoreError>() {
        Some(StoreError::TaskNotFound(_)) => {
            tracing::warn!("Not found: {}", e);
            (StatusCode::NOT_FOUND, e.to_string())
        }
        Some(StoreError::MissingDefaultList) => {
            tracing::warn!("Rejected request: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        None => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Tasks
// ============================================================

/// Query parameters for listing tasks.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Date perspective to filter by. Defaults to every task.
    pub view: Option<ViewType>,
    /// When true, keep only tasks whose deadline has passed uncompleted.
    pub overdue: Option<bool>,
}

pub async fn list_tasks(
    State(store): State<Store>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    let mut tasks = store.get_tasks().map_err(store_error)?;

    if let Some(view) = query.view {
        tasks = views::tasks_for_view(tasks, view, Utc::now().date_naive());
    }
    if query.overdue.unwrap_or(false) {
        let now = Utc::now();
        tasks.retain(|task| views::is_overdue(task, now));
    }

    Ok(Json(tasks))
}

pub async fn get_task(
    State(store): State<Store>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, (StatusCode, String)> {
    store
        .get_task_by_id(id)
        .map_err(store_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))
}

pub async fn create_task(
    State(store): State<Store>,
    Json(input): Json<CreateTaskInput>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, String)> {
    store
        .create_task(input)
        .map(|t| (StatusCode::CREATED, Json(t)))
        .map_err(store_error)
}

pub async fn update_task(
    State(store): State<Store>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTaskInput>,
) -> Result<Json<Task>, (StatusCode, String)> {
    store.update_task(id, input).map(Json).map_err(store_error)
}

/// Deleting a missing id is a successful no-op, so this never 404s.
pub async fn delete_task(
    State(store): State<Store>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    store.delete_task(id).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================
// Lists
// ============================================================

pub async fn list_lists(
    State(store): State<Store>,
) -> Result<Json<Vec<List>>, (StatusCode, String)> {
    store.get_lists().map(Json).map_err(store_error)
}

pub async fn create_list(
    State(store): State<Store>,
    Json(input): Json<CreateListInput>,
) -> Result<(StatusCode, Json<List>), (StatusCode, String)> {
    store
        .create_list(input)
        .map(|l| (StatusCode::CREATED, Json(l)))
        .map_err(store_error)
}

// ============================================================
// Labels
// ============================================================

pub async fn list_labels(
    State(store): State<Store>,
) -> Result<Json<Vec<Label>>, (StatusCode, String)> {
    store.get_labels().map(Json).map_err(store_error)
}

pub async fn create_label(
    State(store): State<Store>,
    Json(input): Json<CreateLabelInput>,
) -> Result<(StatusCode, Json<Label>), (StatusCode, String)> {
    store
        .create_label(input)
        .map(|l| (StatusCode::CREATED, Json(l)))
        .map_err(store_error)
}
