// Integration tests for the AI-response reconciliation pipeline
// These exercise the public lib surface: raw model text -> normalizer ->
// reconciler -> derived views

#[cfg(test)]
mod reconciliation_integration_tests {
    use chrono::{Duration, Utc};
    use taskmind_lib::parsers;
    use taskmind_lib::tasks::{
        apply_task_update, compute_stats, overdue, reconcile_draft_tasks, sort_tasks, SortKey,
        SortOrder,
    };
    use taskmind_lib::{TaskChanges, TaskPriority, TaskStatus};

    #[test]
    fn test_extraction_reply_becomes_tasks() {
        let raw = r#"I found these action items in your document:
[
  {"title": "Send the Q3 report", "priority": "high", "category": "work", "dueDate": "2026-08-10"},
  {"title": "Schedule the retro", "priority": "someday", "tags": ["meeting"]},
  {"description": "follow up with vendor"}
]
Let me know if you want more detail."#;

        let drafts = parsers::draft_tasks(raw);
        assert_eq!(drafts.len(), 3);

        let tasks = reconcile_draft_tasks(drafts);
        assert_eq!(tasks.len(), 3);

        // Valid fields carried through
        assert_eq!(tasks[0].title, "Send the Q3 report");
        assert_eq!(tasks[0].priority, TaskPriority::High);
        assert_eq!(tasks[0].category, "work");
        assert!(tasks[0].due_date.is_some());

        // Unknown priority coerced, missing category defaulted
        assert_eq!(tasks[1].priority, TaskPriority::Medium);
        assert_eq!(tasks[1].category, "general");
        assert_eq!(tasks[1].tags, vec!["meeting"]);

        // Title-less draft still becomes a task
        assert_eq!(tasks[2].title, "Untitled Task");
        assert_eq!(tasks[2].description.as_deref(), Some("follow up with vendor"));

        // Every task is AI-flagged and freshly identified
        for task in &tasks {
            assert!(task.ai_generated);
            assert_eq!(task.status, TaskStatus::Todo);
        }
        assert_ne!(tasks[0].id, tasks[1].id);
        assert_ne!(tasks[1].id, tasks[2].id);
    }

    #[test]
    fn test_chat_reply_with_tasks_round_trips() {
        let raw = r#"{"response": "Added it to your list.",
"suggestions": ["Set a reminder"],
"tasks": [{"title": "Water the plants", "dueDate": "not a date"}]}"#;

        let reply = parsers::chat_reply(raw);
        assert_eq!(reply.response, "Added it to your list.");

        let tasks = reconcile_draft_tasks(reply.tasks);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Water the plants");
        // Unparseable due date is dropped, not stored
        assert!(tasks[0].due_date.is_none());
    }

    #[test]
    fn test_malformed_model_output_never_panics() {
        for garbage in [
            "",
            "no json here",
            "{{{{",
            "]][[",
            "{\"summary\": unterminated",
            "\u{0}\u{1}binary-ish",
        ] {
            let _ = parsers::chat_reply(garbage);
            let _ = parsers::draft_tasks(garbage);
            let _ = parsers::document_analysis(garbage);
        }
    }

    #[test]
    fn test_generated_tasks_feed_the_views() {
        let now = Utc::now();
        let raw = format!(
            r#"[{{"title": "Late", "dueDate": "{}"}}, {{"title": "Future", "dueDate": "{}"}}]"#,
            (now - Duration::days(1)).to_rfc3339(),
            (now + Duration::days(1)).to_rfc3339(),
        );

        let tasks = reconcile_draft_tasks(parsers::draft_tasks(&raw));
        assert_eq!(tasks.len(), 2);

        let stats = compute_stats(&tasks, now);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.overdue, 1);

        let late = overdue(&tasks, now);
        assert_eq!(late.len(), 1);
        assert_eq!(late[0].title, "Late");

        let by_due = sort_tasks(&tasks, SortKey::DueDate, SortOrder::Ascending);
        assert_eq!(by_due[0].title, "Late");
    }

    #[test]
    fn test_completing_an_overdue_task_clears_it() {
        let now = Utc::now();
        let raw = format!(
            r#"[{{"title": "Late", "dueDate": "{}"}}]"#,
            (now - Duration::days(1)).to_rfc3339()
        );
        let tasks = reconcile_draft_tasks(parsers::draft_tasks(&raw));
        assert_eq!(overdue(&tasks, now).len(), 1);

        let done = apply_task_update(
            &tasks[0],
            &TaskChanges {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        );
        assert!(overdue(&[done.clone()], now).is_empty());
        assert_eq!(done.id, tasks[0].id);
        assert_eq!(done.created_at, tasks[0].created_at);
        assert!(done.updated_at >= tasks[0].updated_at);
    }
}
