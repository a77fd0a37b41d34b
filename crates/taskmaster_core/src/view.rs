//! Stateless view projections.
//!
//! # Responsibility
//! - Project task/notification snapshots into display representations.
//!
//! # Invariants
//! - Pure functions only; no owned state, no side effects.
//! - Re-run by the display layer after every mutating operation.

use crate::model::notification::Notification;
use crate::model::task::{Priority, Task, TaskId};
use chrono::{DateTime, Local, Utc};

/// Maximum entries in the recent-tasks dashboard panel.
pub const RECENT_TASK_LIMIT: usize = 5;

/// Dashboard counters derived from the current task sequence.
///
/// `pending` counts open tasks that are not overdue; overdue open tasks are
/// counted separately, so the three buckets partition the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardCounts {
    pub pending: usize,
    pub completed: usize,
    pub overdue: usize,
}

/// Display shape for one task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_label: String,
    pub completed: bool,
}

/// Display shape for one notification entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub title: String,
    pub message: String,
    pub time_label: String,
    pub unread: bool,
}

/// Pending task rows, insertion-ordered.
pub fn pending_tasks(tasks: &[Task]) -> Vec<TaskView> {
    tasks
        .iter()
        .filter(|task| !task.completed)
        .map(task_view)
        .collect()
}

/// Completed task rows, insertion-ordered.
pub fn completed_tasks(tasks: &[Task]) -> Vec<TaskView> {
    tasks
        .iter()
        .filter(|task| task.completed)
        .map(task_view)
        .collect()
}

/// The five most recently created pending tasks, newest first.
pub fn recent_tasks(tasks: &[Task]) -> Vec<TaskView> {
    let mut pending: Vec<&Task> = tasks.iter().filter(|task| !task.completed).collect();
    pending.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    pending
        .into_iter()
        .take(RECENT_TASK_LIMIT)
        .map(task_view)
        .collect()
}

/// Notification feed entries, newest first (the stored order).
pub fn notification_feed(feed: &[Notification]) -> Vec<NotificationView> {
    feed.iter()
        .map(|notification| NotificationView {
            title: notification.title.clone(),
            message: notification.message.clone(),
            time_label: time_label(notification.timestamp),
            unread: !notification.read,
        })
        .collect()
}

/// Dashboard counters for the given snapshot at `now`.
pub fn dashboard_counts(tasks: &[Task], now: DateTime<Utc>) -> DashboardCounts {
    DashboardCounts {
        pending: tasks
            .iter()
            .filter(|task| !task.completed && !task.is_overdue(now))
            .count(),
        completed: tasks.iter().filter(|task| task.completed).count(),
        overdue: tasks.iter().filter(|task| task.is_overdue(now)).count(),
    }
}

fn task_view(task: &Task) -> TaskView {
    TaskView {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority,
        due_label: due_label(task.due_date),
        completed: task.completed,
    }
}

fn due_label(due_date: Option<DateTime<Utc>>) -> String {
    match due_date {
        Some(due) => due
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "No due date".to_string(),
    }
}

fn time_label(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}
