// Derived views over a task collection
//
// Every function here is pure and total: no mutation of the input, no
// failure modes. Callers supply `now` so the views stay deterministic under
// test.

use crate::models::{Task, TaskPriority, TaskStats, TaskStatus};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive date range criterion; matches dueDate, or createdAt for tasks
/// without one
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Conjunctive filter criteria; absent fields impose no constraint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category: Option<String>,
    pub ai_generated: Option<bool>,
    pub range: Option<DateRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Priority,
    DueDate,
    CreatedAt,
    Title,
    Status,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Priority => "priority",
            SortKey::DueDate => "dueDate",
            SortKey::CreatedAt => "createdAt",
            SortKey::Title => "title",
            SortKey::Status => "status",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "priority" => Ok(SortKey::Priority),
            "duedate" | "due" => Ok(SortKey::DueDate),
            "createdat" | "created" => Ok(SortKey::CreatedAt),
            "title" => Ok(SortKey::Title),
            "status" => Ok(SortKey::Status),
            _ => Err(format!(
                "Unknown sort key: '{}'. Expected one of: priority, dueDate, createdAt, title, status",
                s
            )),
        }
    }
}

/// Most urgent / most recent first unless ascending is explicitly requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Descending
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(format!("Unknown sort order: '{}'. Expected 'asc' or 'desc'", s)),
        }
    }
}

fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    match task.due_date {
        Some(due) => due < now && !task.status.is_terminal(),
        None => false,
    }
}

/// Aggregate counts over the collection
pub fn compute_stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..Default::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Completed => stats.completed += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            _ => {}
        }
        if is_overdue(task, now) {
            stats.overdue += 1;
        }
        stats.by_priority.bump(task.priority);
        *stats.by_category.entry(task.category.clone()).or_insert(0) += 1;
    }

    stats
}

/// Tasks with a dueDate strictly before now, excluding completed/cancelled
pub fn overdue(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| is_overdue(task, now))
        .cloned()
        .collect()
}

/// Tasks whose dueDate falls within [start of current local day, start of
/// next local day). Tasks without a dueDate are excluded.
pub fn due_today(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    let Some((start, end)) = local_day_bounds(now) else {
        return Vec::new();
    };
    tasks
        .iter()
        .filter(|task| task.due_date.map_or(false, |due| due >= start && due < end))
        .cloned()
        .collect()
}

fn local_day_bounds(now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let today = now.with_timezone(&Local).date_naive();
    let start = Local
        .from_local_datetime(&today.and_hms_opt(0, 0, 0)?)
        .earliest()?;
    let next = Local
        .from_local_datetime(&today.succ_opt()?.and_hms_opt(0, 0, 0)?)
        .earliest()?;
    Some((start.with_timezone(&Utc), next.with_timezone(&Utc)))
}

/// Keep tasks satisfying every supplied criterion
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| {
            filter.status.map_or(true, |s| task.status == s)
                && filter.priority.map_or(true, |p| task.priority == p)
                && filter
                    .category
                    .as_ref()
                    .map_or(true, |c| task.category == *c)
                && filter.ai_generated.map_or(true, |a| task.ai_generated == a)
                && filter.range.map_or(true, |range| {
                    let anchor = task.due_date.unwrap_or(task.created_at);
                    anchor >= range.start && anchor <= range.end
                })
        })
        .cloned()
        .collect()
}

/// Stable sort by one key. Missing due dates sort as the maximum value: last
/// ascending, first descending.
pub fn sort_tasks(tasks: &[Task], key: SortKey, order: SortOrder) -> Vec<Task> {
    let mut sorted: Vec<Task> = tasks.to_vec();

    sorted.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortKey::DueDate => due_or_max(a).cmp(&due_or_max(b)),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Status => a.status.order_rank().cmp(&b.status.order_rank()),
        };
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    sorted
}

fn due_or_max(task: &Task) -> DateTime<Utc> {
    task.due_date.unwrap_or(DateTime::<Utc>::MAX_UTC)
}
