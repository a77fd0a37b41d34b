//! Task repository over the key-value store.
//!
//! # Responsibility
//! - Own the active user's task sequence and persist it on every mutation.
//! - Apply the named filters and derive the dashboard counts.
//!
//! # Invariants
//! - Persisted order is insertion order (creation order).
//! - Write paths call `Task::validate()` before persistence; read paths
//!   reject invalid persisted state instead of masking it.
//! - `complete`/`remove` with an unknown id are silent no-ops. The display
//!   layer never offers an id that does not exist, so a missing id is not an
//!   error condition here.

use crate::model::task::{Priority, Task, TaskFilter, TaskId, TaskValidationError};
use crate::model::user::UserId;
use crate::store::{keys, Store, StoreError};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type TaskRepoResult<T> = Result<T, TaskRepoError>;

/// Errors from task persistence and mutation operations.
#[derive(Debug)]
pub enum TaskRepoError {
    Validation(TaskValidationError),
    Store(StoreError),
    /// Persisted payload could not be decoded into a task sequence.
    InvalidData(String),
}

impl Display for TaskRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for TaskRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for TaskRepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for TaskRepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Request model for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    /// Whether a pre-due reminder should be scheduled.
    pub reminder: bool,
}

impl NewTask {
    /// Convenience constructor with default priority and no extras.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            priority: Priority::default(),
            reminder: false,
        }
    }
}

/// Owns the in-memory task sequence for the active user.
pub struct TaskRepository {
    store: Rc<dyn Store>,
    user_id: Option<UserId>,
    tasks: Vec<Task>,
}

impl TaskRepository {
    pub fn new(store: Rc<dyn Store>) -> Self {
        Self {
            store,
            user_id: None,
            tasks: Vec::new(),
        }
    }

    /// Replaces the in-memory sequence with `user_id`'s persisted tasks.
    ///
    /// An absent key yields an empty sequence (fresh account).
    pub fn load(&mut self, user_id: UserId) -> TaskRepoResult<()> {
        let tasks = match self.store.get(&keys::tasks(user_id))? {
            Some(payload) => serde_json::from_str::<Vec<Task>>(&payload)
                .map_err(|err| TaskRepoError::InvalidData(err.to_string()))?,
            None => Vec::new(),
        };
        for task in &tasks {
            task.validate()?;
        }
        info!(
            "event=tasks_load module=task_repo status=ok user_id={} count={}",
            user_id,
            tasks.len()
        );
        self.user_id = Some(user_id);
        self.tasks = tasks;
        Ok(())
    }

    /// Drops the in-memory sequence on sign-out; persisted data stays.
    pub fn unload(&mut self) {
        self.user_id = None;
        self.tasks.clear();
    }

    /// Creates a task and appends it to the sequence.
    ///
    /// # Errors
    /// - `Validation(EmptyTitle)` when `title` is empty.
    pub fn add(&mut self, new: NewTask, now: DateTime<Utc>) -> TaskRepoResult<Task> {
        let mut task = Task::new(new.title, now);
        task.description = new.description;
        task.due_date = new.due_date;
        task.priority = new.priority;
        task.reminder = new.reminder;
        task.validate()?;

        self.tasks.push(task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Marks a task completed; returns the updated task, or `None` when the
    /// id is unknown (silent no-op by policy).
    pub fn complete(&mut self, id: TaskId, now: DateTime<Utc>) -> TaskRepoResult<Option<Task>> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };
        task.complete(now);
        let completed = task.clone();
        self.persist()?;
        Ok(Some(completed))
    }

    /// Removes a task; returns whether anything was removed.
    ///
    /// Caller is responsible for user confirmation before invoking this.
    pub fn remove(&mut self, id: TaskId) -> TaskRepoResult<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        self.persist()?;
        Ok(removed)
    }

    /// Current task sequence, insertion-ordered.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Applies a named filter over non-completed tasks.
    pub fn filtered(&self, filter: TaskFilter, now: DateTime<Utc>) -> Vec<&Task> {
        let pending = self.tasks.iter().filter(|task| !task.completed);
        match filter {
            TaskFilter::All => pending.collect(),
            TaskFilter::Today => {
                let (start, end) = local_day_window(now);
                pending.filter(|task| due_within(task, start, end)).collect()
            }
            TaskFilter::Week => {
                let (start, end) = local_week_window(now);
                pending.filter(|task| due_within(task, start, end)).collect()
            }
            TaskFilter::Important => pending
                .filter(|task| task.priority == Priority::High)
                .collect(),
        }
    }

    /// Flags every overdue, not-yet-notified task and returns them.
    ///
    /// Persists once, and only when something changed, which makes repeat
    /// polls with no intervening change free of duplicate announcements.
    pub fn mark_overdue_notified(&mut self, now: DateTime<Utc>) -> TaskRepoResult<Vec<Task>> {
        let mut flagged = Vec::new();
        for task in &mut self.tasks {
            if task.is_overdue(now) && !task.notified {
                task.notified = true;
                flagged.push(task.clone());
            }
        }
        if !flagged.is_empty() {
            self.persist()?;
        }
        Ok(flagged)
    }

    /// Open tasks that are not overdue. Recomputed on every call.
    pub fn pending_count(&self, now: DateTime<Utc>) -> usize {
        self.tasks
            .iter()
            .filter(|task| !task.completed && !task.is_overdue(now))
            .count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn overdue_count(&self, now: DateTime<Utc>) -> usize {
        self.tasks.iter().filter(|task| task.is_overdue(now)).count()
    }

    fn persist(&self) -> TaskRepoResult<()> {
        // No active user means nothing to persist against (mirrors the
        // signed-out guard around every save in the product).
        let Some(user_id) = self.user_id else {
            return Ok(());
        };
        let payload = serde_json::to_string(&self.tasks)
            .map_err(|err| TaskRepoError::InvalidData(err.to_string()))?;
        self.store.set(&keys::tasks(user_id), &payload)?;
        Ok(())
    }
}

fn due_within(task: &Task, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    match task.due_date {
        Some(due) => due >= start && due < end,
        None => false,
    }
}

/// `[start of current local day, start of next local day)`.
fn local_day_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.with_timezone(&Local).date_naive();
    (local_midnight(today), local_midnight(today + Duration::days(1)))
}

/// `[most recent local Sunday 00:00, +7 days)`.
fn local_week_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.with_timezone(&Local).date_naive();
    let sunday = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    (local_midnight(sunday), local_midnight(sunday + Duration::days(7)))
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
    // DST shifts can make local midnight ambiguous or nonexistent; take the
    // earliest valid instant, falling back to the naive reading as UTC.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
