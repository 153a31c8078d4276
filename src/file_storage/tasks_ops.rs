//! Task collection storage
//!
//! The whole collection lives in `tasks.json` wrapped in a versioned
//! envelope. Loading a missing file yields an empty collection.

use super::{atomic_write, ensure_dir, read_json, FileResult};
use crate::models::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version of the tasks file format
const TASKS_FILE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksFile {
    /// File format version
    pub version: u32,
    /// When this file was last written
    pub updated_at: DateTime<Utc>,
    pub tasks: Vec<Task>,
}

/// Path of the tasks file inside the data directory
pub fn tasks_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join("tasks.json")
}

/// Load the task collection, or an empty one if nothing was saved yet
pub fn load_tasks(data_dir: &Path) -> FileResult<Vec<Task>> {
    let path = tasks_file_path(data_dir);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file: TasksFile = read_json(&path)?;
    Ok(file.tasks)
}

/// Persist the full task collection
pub fn save_tasks(data_dir: &Path, tasks: &[Task]) -> FileResult<()> {
    ensure_dir(data_dir)?;

    let file = TasksFile {
        version: TASKS_FILE_VERSION,
        updated_at: Utc::now(),
        tasks: tasks.to_vec(),
    };

    let content = serde_json::to_string_pretty(&file)
        .map_err(|e| format!("Failed to serialize tasks: {}", e))?;

    atomic_write(&tasks_file_path(data_dir), &content)?;
    log::debug!("Saved {} tasks to {:?}", tasks.len(), data_dir);
    Ok(())
}
