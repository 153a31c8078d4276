//! Task REST routes

use crate::commands::tasks::{self, CreateTaskRequest, GenerateTasksRequest};
use crate::models::{Task, TaskChanges, TaskStats};
use crate::server::error::ApiError;
use crate::server::state::AppState;
use crate::tasks::{DateRange, SortKey, SortOrder, TaskFilter};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", post(create_task).get(list_tasks))
        .route("/api/tasks/stats", get(stats))
        .route("/api/tasks/due-today", get(due_today))
        .route("/api/tasks/overdue", get(overdue))
        .route("/api/tasks/generate", post(generate))
        .route(
            "/api/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
}

/// Query parameters for the task listing: filter fields plus sort controls
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TaskListQuery {
    status: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    ai_generated: Option<bool>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    sort_by: Option<String>,
    order: Option<String>,
}

impl TaskListQuery {
    fn into_filter_and_sort(
        self,
    ) -> Result<(TaskFilter, Option<(SortKey, SortOrder)>), ApiError> {
        let status = self
            .status
            .map(|s| s.parse().map_err(ApiError::bad_request))
            .transpose()?;
        let priority = self
            .priority
            .map(|p| p.parse().map_err(ApiError::bad_request))
            .transpose()?;

        let range = match (self.from, self.to) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            (None, None) => None,
            _ => {
                return Err(ApiError::bad_request(
                    "Both 'from' and 'to' are required for a date range",
                ))
            }
        };

        let sort = match self.sort_by {
            Some(key) => {
                let key: SortKey = key.parse().map_err(ApiError::bad_request)?;
                let order = self
                    .order
                    .map(|o| o.parse().map_err(ApiError::bad_request))
                    .transpose()?
                    .unwrap_or_default();
                Some((key, order))
            }
            None => None,
        };

        Ok((
            TaskFilter {
                status,
                priority,
                category: self.category,
                ai_generated: self.ai_generated,
                range,
            },
            sort,
        ))
    }
}

async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = tasks::create_task(&state, request)
        .await
        .map_err(ApiError::from_command)?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let (filter, sort) = query.into_filter_and_sort()?;
    let tasks = tasks::list_tasks(&state, filter, sort)
        .await
        .map_err(ApiError::from_command)?;
    Ok(Json(tasks))
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task = tasks::get_task(&state, &id)
        .await
        .map_err(ApiError::from_command)?;
    Ok(Json(task))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<TaskChanges>,
) -> Result<Json<Task>, ApiError> {
    let task = tasks::update_task(&state, &id, changes)
        .await
        .map_err(ApiError::from_command)?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    tasks::delete_task(&state, &id)
        .await
        .map_err(ApiError::from_command)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn stats(State(state): State<AppState>) -> Result<Json<TaskStats>, ApiError> {
    let stats = tasks::task_stats(&state)
        .await
        .map_err(ApiError::from_command)?;
    Ok(Json(stats))
}

async fn due_today(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = tasks::due_today_tasks(&state)
        .await
        .map_err(ApiError::from_command)?;
    Ok(Json(tasks))
}

async fn overdue(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = tasks::overdue_tasks(&state)
        .await
        .map_err(ApiError::from_command)?;
    Ok(Json(tasks))
}

async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateTasksRequest>,
) -> Result<(StatusCode, Json<Vec<Task>>), ApiError> {
    let tasks = tasks::generate_tasks(&state, request)
        .await
        .map_err(ApiError::from_command)?;
    Ok((StatusCode::CREATED, Json(tasks)))
}
