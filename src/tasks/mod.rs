// Task domain logic: draft reconciliation and derived views

pub mod reconciler;
pub mod views;

pub use reconciler::{apply_task_update, parse_due_date, reconcile_draft_tasks};
pub use views::{
    compute_stats, due_today, filter_tasks, overdue, sort_tasks, DateRange, SortKey, SortOrder,
    TaskFilter,
};
