// Prompt builders for the completion endpoint
//
// Each builder asks the model for a JSON payload matching one of the
// normalizer shapes. The model ignoring the format is expected and handled
// downstream; the prompts just raise the odds.

use crate::models::{ChatTurn, Document, MessageRole};

/// Upper bound on document text interpolated into a prompt
const MAX_DOCUMENT_CHARS: usize = 12_000;

const CHAT_SYSTEM_PROMPT: &str = "You are TaskMind, a personal productivity assistant. \
You help the user manage tasks, understand their workload, and plan their day. \
Reply with a JSON object: {\"response\": \"<your answer>\", \
\"suggestions\": [\"<optional follow-up actions>\"], \
\"tasks\": [<tasks the user asked you to create, as objects with \
title, description, priority (low|medium|high|urgent), category, tags, dueDate>]}. \
Only include tasks the user explicitly wants created.";

const TASK_FIELDS_NOTE: &str = "Each task object may have: title (required), description, \
priority (low|medium|high|urgent), category, tags (array of strings), \
dueDate (ISO 8601 date or datetime).";

/// Messages for an assistant chat exchange
pub fn chat_messages(history: &[ChatTurn], message: &str) -> Vec<ChatTurn> {
    let mut turns = Vec::with_capacity(history.len() + 2);
    turns.push(ChatTurn::new(MessageRole::System, CHAT_SYSTEM_PROMPT));
    turns.extend(history.iter().cloned());
    turns.push(ChatTurn::new(MessageRole::User, message));
    turns
}

/// Messages asking the model to turn free text into a task list
pub fn task_generation_messages(text: &str) -> Vec<ChatTurn> {
    vec![
        ChatTurn::new(
            MessageRole::System,
            format!(
                "You convert free-form notes into actionable tasks. \
Reply with a JSON array of task objects and nothing else. {}",
                TASK_FIELDS_NOTE
            ),
        ),
        ChatTurn::new(
            MessageRole::User,
            format!("Create tasks from the following:\n\n{}", text),
        ),
    ]
}

/// Messages asking the model to analyze a document
pub fn document_analysis_messages(document: &Document) -> Vec<ChatTurn> {
    vec![
        ChatTurn::new(
            MessageRole::System,
            format!(
                "You analyze documents for a productivity assistant. \
Reply with a JSON object: {{\"summary\": \"...\", \"insights\": [\"...\"], \
\"keyTopics\": [\"...\"], \"actionItems\": [\"...\"], \
\"extractedTasks\": [<task objects>]}}. {}",
                TASK_FIELDS_NOTE
            ),
        ),
        ChatTurn::new(
            MessageRole::User,
            format!(
                "Analyze the document \"{}\":\n\n{}",
                document.name,
                clipped_content(document)
            ),
        ),
    ]
}

/// Messages asking the model to extract actionable tasks from a document
pub fn task_extraction_messages(document: &Document) -> Vec<ChatTurn> {
    vec![
        ChatTurn::new(
            MessageRole::System,
            format!(
                "You extract actionable tasks from documents. \
Reply with a JSON array of task objects and nothing else; an empty array \
is a valid answer. {}",
                TASK_FIELDS_NOTE
            ),
        ),
        ChatTurn::new(
            MessageRole::User,
            format!(
                "Extract every actionable task from the document \"{}\":\n\n{}",
                document.name,
                clipped_content(document)
            ),
        ),
    ]
}

fn clipped_content(document: &Document) -> &str {
    match document.content.char_indices().nth(MAX_DOCUMENT_CHARS) {
        Some((idx, _)) => &document.content[..idx],
        None => &document.content,
    }
}
