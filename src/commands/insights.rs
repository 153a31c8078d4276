// Productivity insights command

use crate::insights::{productivity_insights, ProductivityInsights};
use crate::server::state::AppState;
use chrono::Utc;

/// Build the productivity report over the current collections
pub async fn get_insights(state: &AppState) -> Result<ProductivityInsights, String> {
    let tasks = state.tasks.lock().map_err(|e| e.to_string())?.clone();
    let documents = state.documents.lock().map_err(|e| e.to_string())?.clone();
    Ok(productivity_insights(&tasks, &documents, Utc::now()))
}
