//! Productivity insights route

use crate::commands::insights;
use crate::insights::ProductivityInsights;
use crate::server::error::ApiError;
use crate::server::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/insights", get(get_insights))
}

async fn get_insights(
    State(state): State<AppState>,
) -> Result<Json<ProductivityInsights>, ApiError> {
    let insights = insights::get_insights(&state)
        .await
        .map_err(ApiError::from_command)?;
    Ok(Json(insights))
}
