// TaskMind server library
//
// The reconciliation core (parsers, tasks) is pure and synchronous; the
// commands and server modules wrap it with state, persistence and HTTP.

pub mod ai;
pub mod commands;
pub mod config;
pub mod file_storage;
pub mod insights;
pub mod models;
pub mod parsers;
pub mod server;
pub mod tasks;

// Re-export models for use in commands and tests
pub use models::{
    ChatReply, ChatTurn, Document, DocumentAnalysis, DraftTask, MessageRole, PriorityBreakdown,
    Task, TaskChanges, TaskPriority, TaskStats, TaskStatus, BINARY_CONTENT_PLACEHOLDER,
    DEFAULT_CATEGORY, UNTITLED_TASK_TITLE,
};
