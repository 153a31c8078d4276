// Document commands: upload, analysis, and task extraction

use crate::ai::prompts;
use crate::file_storage::{documents_ops, tasks_ops};
use crate::models::{Document, Task, BINARY_CONTENT_PLACEHOLDER};
use crate::parsers;
use crate::server::state::AppState;
use crate::tasks::reconcile_draft_tasks;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for a document upload. `data` is the base64-encoded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDocumentRequest {
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub data: String,
}

/// An analysis result: the updated document plus the payload fields that are
/// shown to the user but not stored on the document itself
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeDocumentResponse {
    pub document: Document,
    pub key_topics: Vec<String>,
    pub action_items: Vec<String>,
}

/// MIME types whose payloads are decoded to text on upload
fn is_text_mime(mime: &str) -> bool {
    mime.starts_with("text/")
        || matches!(
            mime,
            "application/json"
                | "application/xml"
                | "application/javascript"
                | "application/x-yaml"
                | "application/markdown"
        )
}

/// Store an uploaded document.
/// Text-like uploads keep their decoded content; everything else gets a
/// placeholder and is refused analysis later.
pub async fn upload_document(
    state: &AppState,
    request: UploadDocumentRequest,
) -> Result<Document, String> {
    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err("Document name must not be empty".to_string());
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(request.data.trim())
        .map_err(|e| format!("Invalid base64 document data: {}", e))?;

    let mime_type = request
        .mime_type
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| mime_guess::from_path(&name).first_or_octet_stream().to_string());

    let content = if is_text_mime(&mime_type) {
        String::from_utf8_lossy(&bytes).into_owned()
    } else {
        BINARY_CONTENT_PLACEHOLDER.to_string()
    };

    let document = Document {
        id: Uuid::new_v4().to_string(),
        name,
        mime_type,
        size: bytes.len() as u64,
        uploaded_at: Utc::now(),
        content,
        summary: None,
        insights: Vec::new(),
        extracted_tasks: Vec::new(),
        analysis_complete: false,
    };

    let mut documents = state.documents.lock().map_err(|e| e.to_string())?;
    documents.push(document.clone());
    documents_ops::save_documents(&state.config.storage.data_dir, &documents)?;

    log::info!(
        "Stored document '{}' ({}, {} bytes)",
        document.name,
        document.mime_type,
        document.size
    );
    Ok(document)
}

/// List all uploaded documents
pub async fn list_documents(state: &AppState) -> Result<Vec<Document>, String> {
    let documents = state.documents.lock().map_err(|e| e.to_string())?;
    Ok(documents.clone())
}

/// Get a single document by id
pub async fn get_document(state: &AppState, document_id: &str) -> Result<Document, String> {
    let documents = state.documents.lock().map_err(|e| e.to_string())?;
    documents
        .iter()
        .find(|doc| doc.id == document_id)
        .cloned()
        .ok_or_else(|| format!("Document not found: {}", document_id))
}

/// Remove a document. Tasks extracted from it keep their back-reference.
pub async fn delete_document(state: &AppState, document_id: &str) -> Result<(), String> {
    let mut documents = state.documents.lock().map_err(|e| e.to_string())?;
    let before = documents.len();
    documents.retain(|doc| doc.id != document_id);
    if documents.len() == before {
        return Err(format!("Document not found: {}", document_id));
    }
    documents_ops::save_documents(&state.config.storage.data_dir, &documents)?;
    Ok(())
}

/// Analyze a document's content via the AI endpoint and merge the result in.
/// `analysis_complete` flips true only after a successful merge.
pub async fn analyze_document(
    state: &AppState,
    document_id: &str,
) -> Result<AnalyzeDocumentResponse, String> {
    // Snapshot the document so the AI call happens outside the lock
    let document = get_document(state, document_id).await?;
    if !document.has_text_content() {
        return Err(format!(
            "Document '{}' has no analyzable text content",
            document.name
        ));
    }

    let turns = prompts::document_analysis_messages(&document);
    let raw = state.ai.complete(&turns).await.map_err(|e| e.to_string())?;
    let mut analysis = parsers::document_analysis(&raw);

    // Drafts keep a back-reference to the document they came from
    for draft in &mut analysis.extracted_tasks {
        draft.source_document = Some(document.id.clone());
    }

    let mut documents = state.documents.lock().map_err(|e| e.to_string())?;
    let stored = documents
        .iter_mut()
        .find(|doc| doc.id == document_id)
        .ok_or_else(|| format!("Document not found: {}", document_id))?;

    stored.summary = Some(analysis.summary);
    stored.insights = analysis.insights;
    stored.extracted_tasks = analysis.extracted_tasks;
    stored.analysis_complete = true;
    let updated = stored.clone();
    documents_ops::save_documents(&state.config.storage.data_dir, &documents)?;

    Ok(AnalyzeDocumentResponse {
        document: updated,
        key_topics: analysis.key_topics,
        action_items: analysis.action_items,
    })
}

/// Extract actionable tasks from a document and append them to the task
/// collection. Repeated extraction appends again; curation is the user's.
pub async fn extract_tasks(state: &AppState, document_id: &str) -> Result<Vec<Task>, String> {
    let document = get_document(state, document_id).await?;
    if !document.has_text_content() {
        return Err(format!(
            "Document '{}' has no analyzable text content",
            document.name
        ));
    }

    let turns = prompts::task_extraction_messages(&document);
    let raw = state.ai.complete(&turns).await.map_err(|e| e.to_string())?;
    let mut drafts = parsers::draft_tasks(&raw);
    for draft in &mut drafts {
        draft.source_document = Some(document.id.clone());
    }

    {
        let mut documents = state.documents.lock().map_err(|e| e.to_string())?;
        if let Some(stored) = documents.iter_mut().find(|doc| doc.id == document_id) {
            stored.extracted_tasks = drafts.clone();
            documents_ops::save_documents(&state.config.storage.data_dir, &documents)?;
        }
    }

    let extracted = reconcile_draft_tasks(drafts);
    log::info!(
        "Extracted {} tasks from document '{}'",
        extracted.len(),
        document.name
    );

    let mut tasks = state.tasks.lock().map_err(|e| e.to_string())?;
    tasks.extend(extracted.iter().cloned());
    tasks_ops::save_tasks(&state.config.storage.data_dir, &tasks)?;

    Ok(extracted)
}
