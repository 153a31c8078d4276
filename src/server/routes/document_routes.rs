//! Document REST routes

use crate::commands::documents::{self, AnalyzeDocumentResponse, UploadDocumentRequest};
use crate::models::{Document, Task};
use crate::server::error::ApiError;
use crate::server::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/documents", post(upload).get(list))
        .route("/api/documents/:id", get(get_document).delete(delete_document))
        .route("/api/documents/:id/analyze", post(analyze))
        .route("/api/documents/:id/extract-tasks", post(extract_tasks))
}

async fn upload(
    State(state): State<AppState>,
    Json(request): Json<UploadDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let document = documents::upload_document(&state, request)
        .await
        .map_err(ApiError::from_command)?;
    Ok((StatusCode::CREATED, Json(document)))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let documents = documents::list_documents(&state)
        .await
        .map_err(ApiError::from_command)?;
    Ok(Json(documents))
}

async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let document = documents::get_document(&state, &id)
        .await
        .map_err(ApiError::from_command)?;
    Ok(Json(document))
}

async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    documents::delete_document(&state, &id)
        .await
        .map_err(ApiError::from_command)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn analyze(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalyzeDocumentResponse>, ApiError> {
    let response = documents::analyze_document(&state, &id)
        .await
        .map_err(ApiError::from_command)?;
    Ok(Json(response))
}

async fn extract_tasks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Vec<Task>>), ApiError> {
    let tasks = documents::extract_tasks(&state, &id)
        .await
        .map_err(ApiError::from_command)?;
    Ok((StatusCode::CREATED, Json(tasks)))
}
