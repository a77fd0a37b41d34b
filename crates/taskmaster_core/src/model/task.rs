//! Task domain model.
//!
//! # Responsibility
//! - Define the task record persisted per user.
//! - Provide lifecycle helpers for completion and overdue checks.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `completed == true` if and only if `completed_at` is set.
//! - `notified` flips to `true` at most once, when the overdue poll has
//!   already announced this task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Task urgency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Named task-list filters applied to non-completed tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    /// Every pending task.
    All,
    /// Due within the current local day.
    Today,
    /// Due within the current local week (Sunday start).
    Week,
    /// High priority only.
    Important,
}

/// Validation failures for task state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `title` must be non-empty.
    EmptyTitle,
    /// `completed` and `completed_at` disagree.
    CompletionMismatch(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::CompletionMismatch(id) => {
                write!(f, "task {id} has inconsistent completion state")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// A single task owned by the active user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    /// Whether a pre-due reminder should be scheduled for this task.
    pub reminder: bool,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Set once an overdue notification has fired, to suppress repeats.
    #[serde(default)]
    pub notified: bool,
}

impl Task {
    /// Creates a pending task with a generated stable ID.
    pub fn new(title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            due_date: None,
            priority: Priority::default(),
            reminder: false,
            completed: false,
            completed_at: None,
            created_at,
            notified: false,
        }
    }

    /// Marks this task completed at `now`.
    ///
    /// The only write path for `completed`/`completed_at`, which keeps the
    /// completion invariant true by construction.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(now);
    }

    /// Returns whether this task has a due date in the past and is still open.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => !self.completed && due < now,
            None => false,
        }
    }

    /// Checks structural invariants on create and on load from the store.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.completed != self.completed_at.is_some() {
            return Err(TaskValidationError::CompletionMismatch(self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskValidationError};
    use chrono::{Duration, Utc};

    #[test]
    fn complete_sets_timestamp_with_state() {
        let now = Utc::now();
        let mut task = Task::new("pay rent", now);
        assert!(!task.completed);
        assert!(task.completed_at.is_none());

        task.complete(now);
        assert!(task.completed);
        assert_eq!(task.completed_at, Some(now));
        task.validate().unwrap();
    }

    #[test]
    fn overdue_requires_past_due_date_and_open_state() {
        let now = Utc::now();
        let mut task = Task::new("water plants", now);
        assert!(!task.is_overdue(now), "no due date is never overdue");

        task.due_date = Some(now - Duration::minutes(1));
        assert!(task.is_overdue(now));

        task.complete(now);
        assert!(!task.is_overdue(now), "completed tasks are never overdue");
    }

    #[test]
    fn validate_rejects_empty_title_and_mismatched_completion() {
        let now = Utc::now();
        let task = Task::new("", now);
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyTitle));

        let mut task = Task::new("ok", now);
        task.completed = true;
        assert!(matches!(
            task.validate(),
            Err(TaskValidationError::CompletionMismatch(id)) if id == task.id
        ));
    }
}
