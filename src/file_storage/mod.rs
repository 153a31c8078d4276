//! File-based persistence
//!
//! Collections are serialized as pretty JSON under the data directory, one
//! versioned file per collection. Writes go through a temp-file-then-rename
//! so a crash mid-write never leaves a torn file behind.

pub mod documents_ops;
pub mod tasks_ops;

use std::fs;
use std::path::{Path, PathBuf};

/// Result type for file storage operations
pub type FileResult<T> = Result<T, String>;

/// Default data directory: the platform-local data dir, or the working
/// directory as a last resort
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskmind")
}

/// Create a directory (and parents) if it doesn't exist
pub fn ensure_dir(path: &Path) -> FileResult<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| format!("Failed to create directory {:?}: {}", path, e))?;
    }
    Ok(())
}

/// Write content atomically: write to a sibling temp file, then rename
pub fn atomic_write(path: &Path, content: &str) -> FileResult<()> {
    let temp_path = path.with_extension("tmp");

    fs::write(&temp_path, content)
        .map_err(|e| format!("Failed to write temp file {:?}: {}", temp_path, e))?;

    fs::rename(&temp_path, path)
        .map_err(|e| format!("Failed to rename {:?} to {:?}: {}", temp_path, path, e))?;

    Ok(())
}

/// Read and deserialize a JSON file
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> FileResult<T> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {:?}: {}", path, e))?;

    serde_json::from_str(&content).map_err(|e| format!("Failed to parse {:?}: {}", path, e))
}
