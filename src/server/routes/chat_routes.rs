//! Assistant chat route

use crate::commands::chat::{self, ChatRequest, ChatResponse};
use crate::server::error::ApiError;
use crate::server::state::AppState;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/chat", post(send_message))
}

async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = chat::send_message(&state, request)
        .await
        .map_err(ApiError::from_command)?;
    Ok(Json(response))
}
