// AI response normalizer - extracts JSON payloads from model replies
//
// The remote model's output format is not contractually guaranteed, so every
// function here is total: parse failures degrade to a typed fallback instead
// of an error.

use crate::models::{ChatReply, DocumentAnalysis, DraftTask};

/// Which JSON literal a shape expects at the top level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Object,
    Array,
}

/// Caller-supplied hint for which fallback structure to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Chat,
    TaskList,
    DocumentAnalysis,
}

/// Result of normalizing one raw response
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResponse {
    Chat(ChatReply),
    Tasks(Vec<DraftTask>),
    Analysis(DocumentAnalysis),
}

/// Slice the first opening bracket through the last matching close bracket.
///
/// Only this one greedy span is ever tried; nested structure inside it is the
/// JSON parser's problem, not ours. Returns None when the text holds no
/// plausible literal.
fn find_json_span(raw: &str, kind: SpanKind) -> Option<&str> {
    let (open, close) = match kind {
        SpanKind::Object => ('{', '}'),
        SpanKind::Array => ('[', ']'),
    };
    let start = raw.find(open)?;
    let end = raw.rfind(close)?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Normalize a raw response according to the caller's shape hint
pub fn normalize(raw: &str, shape: ResponseShape) -> NormalizedResponse {
    match shape {
        ResponseShape::Chat => NormalizedResponse::Chat(chat_reply(raw)),
        ResponseShape::TaskList => NormalizedResponse::Tasks(draft_tasks(raw)),
        ResponseShape::DocumentAnalysis => NormalizedResponse::Analysis(document_analysis(raw)),
    }
}

/// Normalize a chat reply.
///
/// Fallback: the raw trimmed text becomes the response body, with empty
/// suggestion and task lists. A parsed payload with a blank `response` field
/// also falls back to the raw text so the assistant never answers with
/// nothing.
pub fn chat_reply(raw: &str) -> ChatReply {
    if let Some(span) = find_json_span(raw, SpanKind::Object) {
        if let Ok(mut reply) = serde_json::from_str::<ChatReply>(span) {
            if reply.response.trim().is_empty() {
                reply.response = raw.trim().to_string();
            }
            return reply;
        }
    }
    ChatReply {
        response: raw.trim().to_string(),
        ..Default::default()
    }
}

/// Normalize a task-list reply. Fallback: empty list.
pub fn draft_tasks(raw: &str) -> Vec<DraftTask> {
    find_json_span(raw, SpanKind::Array)
        .and_then(|span| serde_json::from_str(span).ok())
        .unwrap_or_default()
}

/// Normalize a document-analysis reply.
///
/// Fallback: the raw trimmed text becomes the summary, with empty
/// insight/task/topic/action lists.
pub fn document_analysis(raw: &str) -> DocumentAnalysis {
    if let Some(span) = find_json_span(raw, SpanKind::Object) {
        if let Ok(analysis) = serde_json::from_str::<DocumentAnalysis>(span) {
            return analysis;
        }
    }
    DocumentAnalysis {
        summary: raw.trim().to_string(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_fallback_on_plain_text() {
        let raw = "Sure! Here's your answer without JSON.";
        let reply = chat_reply(raw);
        assert_eq!(reply.response, raw);
        assert!(reply.suggestions.is_empty());
        assert!(reply.tasks.is_empty());
    }

    #[test]
    fn test_chat_parses_embedded_object() {
        let raw = r#"Here you go:
{"response":"You have 3 open tasks.","suggestions":["Review the urgent one"],"tasks":[]}
Let me know if you need more."#;
        let reply = chat_reply(raw);
        assert_eq!(reply.response, "You have 3 open tasks.");
        assert_eq!(reply.suggestions, vec!["Review the urgent one"]);
        assert!(reply.tasks.is_empty());
    }

    #[test]
    fn test_chat_blank_response_field_falls_back_to_raw() {
        let raw = r#"{"suggestions":["Plan your week"]}"#;
        let reply = chat_reply(raw);
        assert_eq!(reply.response, raw.trim());
        assert_eq!(reply.suggestions, vec!["Plan your week"]);
    }

    #[test]
    fn test_chat_trims_surrounding_whitespace_in_fallback() {
        let reply = chat_reply("  just words  \n");
        assert_eq!(reply.response, "just words");
    }

    #[test]
    fn test_greedy_span_covers_markdown_fences() {
        let raw = "```json\n{\"response\":\"hi\"}\n```";
        let reply = chat_reply(raw);
        assert_eq!(reply.response, "hi");
    }

    #[test]
    fn test_no_second_span_is_tried() {
        // The greedy span runs from the first '{' to the last '}', swallowing
        // both objects; the combined slice is invalid JSON, and there is no
        // retry with a narrower span.
        let raw = r#"{"broken": } and then {"response":"valid"}"#;
        let reply = chat_reply(raw);
        assert_eq!(reply.response, raw.trim());
        assert!(reply.suggestions.is_empty());
    }

    #[test]
    fn test_close_before_open_is_no_span() {
        let reply = chat_reply("} oops {");
        assert_eq!(reply.response, "} oops {");
    }

    #[test]
    fn test_draft_tasks_parses_embedded_array() {
        let raw = r#"Extracted the following:
[{"title":"Email Dana","priority":"high"},{"title":"Book flights","dueDate":"2026-09-01"}]
Done."#;
        let tasks = draft_tasks(raw);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title.as_deref(), Some("Email Dana"));
        assert_eq!(tasks[0].priority.as_deref(), Some("high"));
        assert_eq!(tasks[1].due_date.as_deref(), Some("2026-09-01"));
    }

    #[test]
    fn test_draft_tasks_fallback_is_empty() {
        assert!(draft_tasks("no list in here").is_empty());
        assert!(draft_tasks("[1, 2, oops").is_empty());
    }

    #[test]
    fn test_draft_tasks_nested_arrays_survive_the_greedy_span() {
        let raw = r#"[{"title":"Tag things","tags":["home","errand"]}]"#;
        let tasks = draft_tasks(raw);
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks[0].tags.as_ref().unwrap(),
            &vec!["home".to_string(), "errand".to_string()]
        );
    }

    #[test]
    fn test_document_analysis_with_preamble_and_trailer() {
        let raw = r#"Some preamble {"summary":"ok","insights":["a","b"]} trailing text"#;
        let analysis = document_analysis(raw);
        assert_eq!(analysis.summary, "ok");
        assert_eq!(analysis.insights, vec!["a", "b"]);
        assert!(analysis.extracted_tasks.is_empty());
        assert!(analysis.key_topics.is_empty());
        assert!(analysis.action_items.is_empty());
    }

    #[test]
    fn test_document_analysis_fallback_uses_raw_as_summary() {
        let raw = "  The document appears to be meeting notes.  ";
        let analysis = document_analysis(raw);
        assert_eq!(analysis.summary, "The document appears to be meeting notes.");
        assert!(analysis.insights.is_empty());
    }

    #[test]
    fn test_normalize_dispatches_by_shape() {
        let chat = normalize("plain", ResponseShape::Chat);
        assert!(matches!(chat, NormalizedResponse::Chat(_)));

        let tasks = normalize("[]", ResponseShape::TaskList);
        assert_eq!(tasks, NormalizedResponse::Tasks(Vec::new()));

        let analysis = normalize("notes", ResponseShape::DocumentAnalysis);
        assert!(matches!(analysis, NormalizedResponse::Analysis(_)));
    }
}
