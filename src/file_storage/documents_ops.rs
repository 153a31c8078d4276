//! Document collection storage in `documents.json`

use super::{atomic_write, ensure_dir, read_json, FileResult};
use crate::models::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version of the documents file format
const DOCUMENTS_FILE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsFile {
    /// File format version
    pub version: u32,
    /// When this file was last written
    pub updated_at: DateTime<Utc>,
    pub documents: Vec<Document>,
}

/// Path of the documents file inside the data directory
pub fn documents_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join("documents.json")
}

/// Load the document collection, or an empty one if nothing was saved yet
pub fn load_documents(data_dir: &Path) -> FileResult<Vec<Document>> {
    let path = documents_file_path(data_dir);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file: DocumentsFile = read_json(&path)?;
    Ok(file.documents)
}

/// Persist the full document collection
pub fn save_documents(data_dir: &Path, documents: &[Document]) -> FileResult<()> {
    ensure_dir(data_dir)?;

    let file = DocumentsFile {
        version: DOCUMENTS_FILE_VERSION,
        updated_at: Utc::now(),
        documents: documents.to_vec(),
    };

    let content = serde_json::to_string_pretty(&file)
        .map_err(|e| format!("Failed to serialize documents: {}", e))?;

    atomic_write(&documents_file_path(data_dir), &content)?;
    log::debug!("Saved {} documents to {:?}", documents.len(), data_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn doc(name: &str) -> Document {
        Document {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            mime_type: "text/plain".to_string(),
            size: 42,
            uploaded_at: Utc::now(),
            content: "some text".to_string(),
            summary: Some("a summary".to_string()),
            insights: vec!["insight".to_string()],
            extracted_tasks: Vec::new(),
            analysis_complete: true,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_documents(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let documents = vec![doc("a.txt"), doc("b.md")];

        save_documents(temp_dir.path(), &documents).unwrap();
        let loaded = load_documents(temp_dir.path()).unwrap();

        assert_eq!(loaded, documents);
    }
}
