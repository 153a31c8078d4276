// Task commands: CRUD, derived views, and AI-backed generation

use crate::ai::prompts;
use crate::file_storage::tasks_ops;
use crate::models::{Task, TaskChanges, TaskPriority, TaskStats, TaskStatus, DEFAULT_CATEGORY};
use crate::parsers;
use crate::server::state::AppState;
use crate::tasks::{
    apply_task_update, compute_stats, due_today, filter_tasks, overdue, reconcile_draft_tasks,
    sort_tasks, SortKey, SortOrder, TaskFilter,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for direct task creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Request body for natural-language task generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTasksRequest {
    pub text: String,
}

/// Create a task from direct user input.
/// Unlike AI drafts, a direct creation with no usable title is rejected.
pub async fn create_task(state: &AppState, request: CreateTaskRequest) -> Result<Task, String> {
    let title = request.title.trim().to_string();
    if title.is_empty() {
        return Err("Task title must not be empty".to_string());
    }

    let now = Utc::now();
    let task = Task {
        id: Uuid::new_v4().to_string(),
        title,
        description: request.description.filter(|d| !d.trim().is_empty()),
        priority: request.priority.unwrap_or_default(),
        status: TaskStatus::Todo,
        category: request
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        tags: request.tags.unwrap_or_default(),
        due_date: request.due_date,
        created_at: now,
        updated_at: now,
        ai_generated: false,
        source_document: None,
    };

    let mut tasks = state.tasks.lock().map_err(|e| e.to_string())?;
    tasks.push(task.clone());
    tasks_ops::save_tasks(&state.config.storage.data_dir, &tasks)?;

    Ok(task)
}

/// List tasks, filtered and sorted on demand
pub async fn list_tasks(
    state: &AppState,
    filter: TaskFilter,
    sort: Option<(SortKey, SortOrder)>,
) -> Result<Vec<Task>, String> {
    let tasks = state.tasks.lock().map_err(|e| e.to_string())?;
    let mut result = filter_tasks(&tasks, &filter);
    if let Some((key, order)) = sort {
        result = sort_tasks(&result, key, order);
    }
    Ok(result)
}

/// Get a single task by id
pub async fn get_task(state: &AppState, task_id: &str) -> Result<Task, String> {
    let tasks = state.tasks.lock().map_err(|e| e.to_string())?;
    tasks
        .iter()
        .find(|task| task.id == task_id)
        .cloned()
        .ok_or_else(|| format!("Task not found: {}", task_id))
}

/// Apply a partial update to an existing task
pub async fn update_task(
    state: &AppState,
    task_id: &str,
    changes: TaskChanges,
) -> Result<Task, String> {
    let mut tasks = state.tasks.lock().map_err(|e| e.to_string())?;
    let index = tasks
        .iter()
        .position(|task| task.id == task_id)
        .ok_or_else(|| format!("Task not found: {}", task_id))?;

    let updated = apply_task_update(&tasks[index], &changes);
    tasks[index] = updated.clone();
    tasks_ops::save_tasks(&state.config.storage.data_dir, &tasks)?;

    Ok(updated)
}

/// Remove a task from the collection
pub async fn delete_task(state: &AppState, task_id: &str) -> Result<(), String> {
    let mut tasks = state.tasks.lock().map_err(|e| e.to_string())?;
    let before = tasks.len();
    tasks.retain(|task| task.id != task_id);
    if tasks.len() == before {
        return Err(format!("Task not found: {}", task_id));
    }
    tasks_ops::save_tasks(&state.config.storage.data_dir, &tasks)?;
    Ok(())
}

/// Aggregate counts over the current collection
pub async fn task_stats(state: &AppState) -> Result<TaskStats, String> {
    let tasks = state.tasks.lock().map_err(|e| e.to_string())?;
    Ok(compute_stats(&tasks, Utc::now()))
}

/// Tasks due within the current local day
pub async fn due_today_tasks(state: &AppState) -> Result<Vec<Task>, String> {
    let tasks = state.tasks.lock().map_err(|e| e.to_string())?;
    Ok(due_today(&tasks, Utc::now()))
}

/// Tasks past their due date and still open
pub async fn overdue_tasks(state: &AppState) -> Result<Vec<Task>, String> {
    let tasks = state.tasks.lock().map_err(|e| e.to_string())?;
    Ok(overdue(&tasks, Utc::now()))
}

/// Turn free text into tasks via the AI endpoint.
/// Reconciled tasks are appended to the collection as-is; repeated calls with
/// the same text will append again.
pub async fn generate_tasks(
    state: &AppState,
    request: GenerateTasksRequest,
) -> Result<Vec<Task>, String> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err("Text to generate tasks from must not be empty".to_string());
    }

    // The AI round trip happens before any lock is taken
    let turns = prompts::task_generation_messages(text);
    let raw = state.ai.complete(&turns).await.map_err(|e| e.to_string())?;
    let drafts = parsers::draft_tasks(&raw);
    let generated = reconcile_draft_tasks(drafts);

    log::info!("Generated {} tasks from free text", generated.len());

    let mut tasks = state.tasks.lock().map_err(|e| e.to_string())?;
    tasks.extend(generated.iter().cloned());
    tasks_ops::save_tasks(&state.config.storage.data_dir, &tasks)?;

    Ok(generated)
}
