//! Shared application state
//!
//! Each collection is owned by exactly one logical writer at a time; handlers
//! take the mutex for the duration of one synchronous mutation and never hold
//! it across an await.

use crate::ai::AiClient;
use crate::config::AppConfig;
use crate::models::{Document, Task};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,

    /// Client for the remote chat-completion endpoint
    pub ai: AiClient,

    /// The task collection, persisted through file_storage on every mutation
    pub tasks: Arc<Mutex<Vec<Task>>>,

    /// The document collection, persisted the same way
    pub documents: Arc<Mutex<Vec<Document>>>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        ai: AiClient,
        tasks: Vec<Task>,
        documents: Vec<Document>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            ai,
            tasks: Arc::new(Mutex::new(tasks)),
            documents: Arc::new(Mutex::new(documents)),
        }
    }
}
