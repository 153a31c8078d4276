// Integration tests for the productivity insights report

#[cfg(test)]
mod insights_integration_tests {
    use chrono::{Duration, Utc};
    use taskmind_lib::insights::productivity_insights;
    use taskmind_lib::tasks::reconcile_draft_tasks;
    use taskmind_lib::{Document, DraftTask, TaskChanges, TaskStatus};

    fn analyzed_doc(id: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            name: format!("{}.txt", id),
            mime_type: "text/plain".to_string(),
            size: content.len() as u64,
            uploaded_at: Utc::now(),
            content: content.to_string(),
            summary: Some("summary".to_string()),
            insights: Vec::new(),
            extracted_tasks: Vec::new(),
            analysis_complete: true,
        }
    }

    #[test]
    fn test_report_over_reconciled_tasks() {
        let now = Utc::now();
        let mut tasks = reconcile_draft_tasks(vec![
            DraftTask {
                title: Some("Ship release".to_string()),
                category: Some("work".to_string()),
                due_date: Some((now - Duration::days(1)).to_rfc3339()),
                ..Default::default()
            },
            DraftTask {
                title: Some("Plan sprint".to_string()),
                category: Some("work".to_string()),
                ..Default::default()
            },
            DraftTask {
                title: Some("Buy groceries".to_string()),
                category: Some("home".to_string()),
                ..Default::default()
            },
        ]);
        tasks[1] = taskmind_lib::tasks::apply_task_update(
            &tasks[1],
            &TaskChanges {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        );

        let documents = vec![
            analyzed_doc("d1", "release checklist release notes release branch"),
            analyzed_doc("d2", "groceries list"),
        ];

        let report = productivity_insights(&tasks, &documents, now);

        assert_eq!(report.total_tasks, 3);
        assert_eq!(report.completed_tasks, 1);
        assert_eq!(report.open_tasks, 2);
        assert_eq!(report.overdue_tasks, 1);
        assert!((report.completion_rate - 1.0 / 3.0).abs() < 1e-6);

        assert_eq!(report.busiest_categories[0].category, "work");
        assert_eq!(report.busiest_categories[0].count, 2);

        assert_eq!(report.top_keywords[0].keyword, "release");
        assert_eq!(report.top_keywords[0].count, 3);
    }

    #[test]
    fn test_unanalyzed_documents_contribute_no_keywords() {
        let mut doc = analyzed_doc("d1", "secret secret secret");
        doc.analysis_complete = false;
        let report = productivity_insights(&[], &[doc], Utc::now());
        assert!(report.top_keywords.is_empty());
    }
}
