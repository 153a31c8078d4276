// Reconciliation of AI-produced partial records into full task entities

use crate::models::{
    DraftTask, Task, TaskChanges, TaskStatus, DEFAULT_CATEGORY, UNTITLED_TASK_TITLE,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

/// Turn an ordered sequence of drafts into fully-formed tasks, same order.
///
/// The reconciler never rejects a record; every missing or malformed field is
/// defaulted. Appending the result to an existing collection is a pure append,
/// with no de-duplication against what is already there.
pub fn reconcile_draft_tasks(drafts: Vec<DraftTask>) -> Vec<Task> {
    let now = Utc::now();
    drafts
        .into_iter()
        .map(|draft| reconcile_draft(draft, now))
        .collect()
}

fn reconcile_draft(draft: DraftTask, now: DateTime<Utc>) -> Task {
    let title = draft
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED_TASK_TITLE.to_string());

    // Unknown priority strings coerce to the default rather than erroring
    let priority = draft
        .priority
        .as_deref()
        .and_then(|p| p.parse().ok())
        .unwrap_or_default();

    let category = draft
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    // Unparseable due dates are dropped, not stored
    let due_date = draft.due_date.as_deref().and_then(parse_due_date);

    Task {
        id: Uuid::new_v4().to_string(),
        title,
        description: draft.description.filter(|d| !d.trim().is_empty()),
        priority,
        status: TaskStatus::Todo,
        category,
        tags: draft.tags.unwrap_or_default(),
        due_date,
        created_at: now,
        updated_at: now,
        ai_generated: true,
        source_document: draft.source_document,
    }
}

/// Parse a due-date string from a draft.
///
/// Accepts RFC 3339, the common bare datetime forms, and plain dates
/// (midnight UTC). Anything else is None.
pub fn parse_due_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// Apply a partial set of field changes to an existing task.
///
/// `id` and `created_at` are immutable. `updated_at` always moves forward,
/// never backward. Any status-to-status transition is accepted; the
/// enumerated value set is the only validation.
pub fn apply_task_update(task: &Task, changes: &TaskChanges) -> Task {
    let mut updated = task.clone();

    if let Some(title) = &changes.title {
        let trimmed = title.trim();
        if !trimmed.is_empty() {
            updated.title = trimmed.to_string();
        }
    }
    if let Some(description) = &changes.description {
        updated.description = Some(description.clone());
    }
    if let Some(priority) = changes.priority {
        updated.priority = priority;
    }
    if let Some(status) = changes.status {
        updated.status = status;
    }
    if let Some(category) = &changes.category {
        let trimmed = category.trim();
        if !trimmed.is_empty() {
            updated.category = trimmed.to_string();
        }
    }
    if let Some(tags) = &changes.tags {
        updated.tags = tags.clone();
    }
    if let Some(due_date) = changes.due_date {
        updated.due_date = Some(due_date);
    }

    updated.updated_at = Utc::now().max(task.updated_at);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;
    use chrono::TimeZone;

    #[test]
    fn test_reconcile_title_only_draft() {
        let tasks = reconcile_draft_tasks(vec![DraftTask {
            title: Some("Buy milk".to_string()),
            ..Default::default()
        }]);

        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.category, "general");
        assert!(task.tags.is_empty());
        assert!(task.due_date.is_none());
        assert!(task.ai_generated);
        assert!(!task.id.is_empty());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_reconcile_generates_distinct_ids() {
        let first = reconcile_draft_tasks(vec![DraftTask::default()]);
        let second = reconcile_draft_tasks(vec![DraftTask::default()]);
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_reconcile_blank_title_becomes_untitled() {
        let tasks = reconcile_draft_tasks(vec![
            DraftTask {
                title: Some("   ".to_string()),
                ..Default::default()
            },
            DraftTask::default(),
        ]);
        assert_eq!(tasks[0].title, UNTITLED_TASK_TITLE);
        assert_eq!(tasks[1].title, UNTITLED_TASK_TITLE);
    }

    #[test]
    fn test_reconcile_coerces_unknown_priority() {
        let tasks = reconcile_draft_tasks(vec![DraftTask {
            title: Some("t".to_string()),
            priority: Some("sky-high".to_string()),
            ..Default::default()
        }]);
        assert_eq!(tasks[0].priority, TaskPriority::Medium);
    }

    #[test]
    fn test_reconcile_keeps_valid_priority() {
        let tasks = reconcile_draft_tasks(vec![DraftTask {
            priority: Some("Urgent".to_string()),
            ..Default::default()
        }]);
        assert_eq!(tasks[0].priority, TaskPriority::Urgent);
    }

    #[test]
    fn test_reconcile_drops_invalid_due_date() {
        let tasks = reconcile_draft_tasks(vec![DraftTask {
            due_date: Some("next Tuesday-ish".to_string()),
            ..Default::default()
        }]);
        assert!(tasks[0].due_date.is_none());
    }

    #[test]
    fn test_reconcile_preserves_input_order() {
        let drafts: Vec<DraftTask> = (0..5)
            .map(|i| DraftTask {
                title: Some(format!("task {}", i)),
                ..Default::default()
            })
            .collect();
        let tasks = reconcile_draft_tasks(drafts);
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["task 0", "task 1", "task 2", "task 3", "task 4"]);
    }

    #[test]
    fn test_reconcile_carries_source_document() {
        let tasks = reconcile_draft_tasks(vec![DraftTask {
            source_document: Some("doc-42".to_string()),
            ..Default::default()
        }]);
        assert_eq!(tasks[0].source_document.as_deref(), Some("doc-42"));
    }

    #[test]
    fn test_parse_due_date_formats() {
        assert_eq!(
            parse_due_date("2026-08-05T10:30:00Z"),
            Some(Utc.with_ymd_and_hms(2026, 8, 5, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_due_date("2026-08-05T10:30:00"),
            Some(Utc.with_ymd_and_hms(2026, 8, 5, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_due_date("2026-08-05 10:30:00"),
            Some(Utc.with_ymd_and_hms(2026, 8, 5, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_due_date("2026-08-05"),
            Some(Utc.with_ymd_and_hms(2026, 8, 5, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_due_date("soon"), None);
        assert_eq!(parse_due_date(""), None);
    }

    fn sample_task() -> Task {
        reconcile_draft_tasks(vec![DraftTask {
            title: Some("Original".to_string()),
            ..Default::default()
        }])
        .remove(0)
    }

    #[test]
    fn test_update_preserves_id_and_created_at() {
        let task = sample_task();
        let updated = apply_task_update(
            &task,
            &TaskChanges {
                title: Some("Renamed".to_string()),
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        );

        assert_eq!(updated.id, task.id);
        assert_eq!(updated.created_at, task.created_at);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.status, TaskStatus::Completed);
    }

    #[test]
    fn test_update_never_moves_updated_at_backwards() {
        let mut task = sample_task();
        // Simulate a clock skew where the stored timestamp is in the future
        task.updated_at = Utc::now() + chrono::Duration::hours(1);

        let updated = apply_task_update(&task, &TaskChanges::default());
        assert!(updated.updated_at >= task.updated_at);
    }

    #[test]
    fn test_update_absent_fields_leave_task_unchanged() {
        let task = sample_task();
        let updated = apply_task_update(&task, &TaskChanges::default());

        assert_eq!(updated.title, task.title);
        assert_eq!(updated.priority, task.priority);
        assert_eq!(updated.status, task.status);
        assert_eq!(updated.category, task.category);
        assert_eq!(updated.tags, task.tags);
        assert_eq!(updated.due_date, task.due_date);
    }

    #[test]
    fn test_update_ignores_blank_title() {
        let task = sample_task();
        let updated = apply_task_update(
            &task,
            &TaskChanges {
                title: Some("  ".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(updated.title, "Original");
    }

    #[test]
    fn test_any_status_transition_is_accepted() {
        let task = sample_task();
        let done = apply_task_update(
            &task,
            &TaskChanges {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        );
        // Reopening a completed task is allowed; no transition validation
        let reopened = apply_task_update(
            &done,
            &TaskChanges {
                status: Some(TaskStatus::Todo),
                ..Default::default()
            },
        );
        assert_eq!(reopened.status, TaskStatus::Todo);
    }
}
