// Integration tests for collection persistence
// Collections must round-trip through the versioned JSON files with
// timestamps intact

#[cfg(test)]
mod storage_integration_tests {
    use taskmind_lib::file_storage::{documents_ops, tasks_ops};
    use taskmind_lib::parsers;
    use taskmind_lib::tasks::{apply_task_update, reconcile_draft_tasks};
    use taskmind_lib::{Document, DraftTask, TaskChanges, TaskPriority};
    use tempfile::TempDir;

    #[test]
    fn test_task_collection_round_trip() {
        let temp_dir = TempDir::new().unwrap();

        let tasks = reconcile_draft_tasks(vec![
            DraftTask {
                title: Some("Persisted".to_string()),
                priority: Some("urgent".to_string()),
                due_date: Some("2026-08-20T09:00:00Z".to_string()),
                tags: Some(vec!["keep".to_string()]),
                ..Default::default()
            },
            DraftTask {
                title: Some("Second".to_string()),
                ..Default::default()
            },
        ]);

        tasks_ops::save_tasks(temp_dir.path(), &tasks).unwrap();
        let loaded = tasks_ops::load_tasks(temp_dir.path()).unwrap();

        assert_eq!(loaded, tasks);
        assert_eq!(loaded[0].priority, TaskPriority::Urgent);
        assert_eq!(loaded[0].created_at, tasks[0].created_at);
    }

    #[test]
    fn test_update_then_reload_keeps_new_state() {
        let temp_dir = TempDir::new().unwrap();

        let mut tasks = reconcile_draft_tasks(vec![DraftTask {
            title: Some("Original".to_string()),
            ..Default::default()
        }]);
        tasks_ops::save_tasks(temp_dir.path(), &tasks).unwrap();

        tasks[0] = apply_task_update(
            &tasks[0],
            &TaskChanges {
                title: Some("Renamed".to_string()),
                ..Default::default()
            },
        );
        tasks_ops::save_tasks(temp_dir.path(), &tasks).unwrap();

        let loaded = tasks_ops::load_tasks(temp_dir.path()).unwrap();
        assert_eq!(loaded[0].title, "Renamed");
        assert_eq!(loaded[0].id, tasks[0].id);
    }

    #[test]
    fn test_document_with_analysis_round_trips() {
        let temp_dir = TempDir::new().unwrap();

        // A document that has been through a full analysis pass
        let raw = r#"{"summary": "Weekly plan", "insights": ["Busy Tuesday"],
"extractedTasks": [{"title": "Prep slides"}]}"#;
        let analysis = parsers::document_analysis(raw);

        let document = Document {
            id: "doc-1".to_string(),
            name: "plan.md".to_string(),
            mime_type: "text/markdown".to_string(),
            size: 420,
            uploaded_at: chrono::Utc::now(),
            content: "# Weekly plan\n- prep slides".to_string(),
            summary: Some(analysis.summary.clone()),
            insights: analysis.insights.clone(),
            extracted_tasks: analysis.extracted_tasks.clone(),
            analysis_complete: true,
        };

        documents_ops::save_documents(temp_dir.path(), &[document.clone()]).unwrap();
        let loaded = documents_ops::load_documents(temp_dir.path()).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], document);
        assert_eq!(loaded[0].summary.as_deref(), Some("Weekly plan"));
        assert_eq!(loaded[0].extracted_tasks[0].title.as_deref(), Some("Prep slides"));
    }

    #[test]
    fn test_missing_files_load_as_empty_collections() {
        let temp_dir = TempDir::new().unwrap();
        assert!(tasks_ops::load_tasks(temp_dir.path()).unwrap().is_empty());
        assert!(documents_ops::load_documents(temp_dir.path())
            .unwrap()
            .is_empty());
    }
}
