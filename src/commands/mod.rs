// Command handlers between HTTP routing and the core
//
// Each function takes the shared state, does its work inside a single lock
// scope, and persists through the file_storage module before returning. AI
// calls are always awaited outside lock scopes.

pub mod chat;
pub mod documents;
pub mod insights;
pub mod tasks;
