// Assistant chat command
//
// A chat turn can carry tasks the user asked the assistant to create; those
// are reconciled and appended in the same turn.

use crate::ai::prompts;
use crate::file_storage::tasks_ops;
use crate::models::{ChatTurn, Task};
use crate::parsers;
use crate::server::state::AppState;
use crate::tasks::reconcile_draft_tasks;
use serde::{Deserialize, Serialize};

/// Request body for one chat exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns, oldest first; the client owns the conversation history
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// The assistant's reply plus any tasks created during the turn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub suggestions: Vec<String>,
    pub created_tasks: Vec<Task>,
}

/// Run one chat exchange with the assistant
pub async fn send_message(state: &AppState, request: ChatRequest) -> Result<ChatResponse, String> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err("Chat message must not be empty".to_string());
    }

    let turns = prompts::chat_messages(&request.history, message);
    let raw = state.ai.complete(&turns).await.map_err(|e| e.to_string())?;
    let reply = parsers::chat_reply(&raw);

    let created_tasks = reconcile_draft_tasks(reply.tasks);
    if !created_tasks.is_empty() {
        log::info!("Chat turn created {} tasks", created_tasks.len());
        let mut tasks = state.tasks.lock().map_err(|e| e.to_string())?;
        tasks.extend(created_tasks.iter().cloned());
        tasks_ops::save_tasks(&state.config.storage.data_dir, &tasks)?;
    }

    Ok(ChatResponse {
        response: reply.response,
        suggestions: reply.suggestions,
        created_tasks,
    })
}
