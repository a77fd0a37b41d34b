//! Application façade: the capability set the display layer talks to.
//!
//! # Responsibility
//! - Compose session, tasks, notifications, and reminders over one store.
//! - Run the product control flow: mutate owned state, persist, emit the
//!   matching notification, keep reminder timers in sync.
//!
//! # Invariants
//! - Signing out cancels every pending reminder and drops in-memory data;
//!   persisted per-user data stays.
//! - Task deletion goes through the confirmation prompt and proceeds only
//!   on an affirmative answer.

use crate::model::notification::Notification;
use crate::model::task::{Task, TaskFilter, TaskId};
use crate::model::user::{Session, UserId};
use crate::repo::notification_repo::{NotificationCenter, NotificationRepoError, ToastSink};
use crate::repo::task_repo::{NewTask, TaskRepoError, TaskRepository};
use crate::service::reminder_scheduler::{
    overdue_message, reminder_message, ReminderScheduler,
};
use crate::service::session_service::{
    welcome_back_notification, welcome_notification, SessionError, SessionManager,
};
use crate::store::Store;
use crate::view::{dashboard_counts, DashboardCounts};
use chrono::Utc;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Message shown by the confirmation prompt before deleting a task.
pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this task?";

pub type AppResult<T> = Result<T, AppError>;

/// Top-level error for façade operations.
#[derive(Debug)]
pub enum AppError {
    Session(SessionError),
    Tasks(TaskRepoError),
    Notifications(NotificationRepoError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{err}"),
            Self::Tasks(err) => write!(f, "{err}"),
            Self::Notifications(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            Self::Tasks(err) => Some(err),
            Self::Notifications(err) => Some(err),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<TaskRepoError> for AppError {
    fn from(value: TaskRepoError) -> Self {
        Self::Tasks(value)
    }
}

impl From<NotificationRepoError> for AppError {
    fn from(value: NotificationRepoError) -> Self {
        Self::Notifications(value)
    }
}

/// Blocking yes/no prompt shown before destructive actions.
///
/// Owned by the display layer; the core only consults it.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Answers yes to everything. Default for headless hosts and tests.
#[derive(Debug, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// The assembled single-user task-management application.
pub struct TaskMasterApp {
    session: SessionManager,
    tasks: TaskRepository,
    notifications: NotificationCenter,
    reminders: ReminderScheduler,
    toast: Rc<dyn ToastSink>,
    confirm: Rc<dyn ConfirmPrompt>,
}

impl TaskMasterApp {
    pub fn new(
        store: Rc<dyn Store>,
        toast: Rc<dyn ToastSink>,
        confirm: Rc<dyn ConfirmPrompt>,
    ) -> Self {
        Self {
            session: SessionManager::new(Rc::clone(&store)),
            tasks: TaskRepository::new(Rc::clone(&store)),
            notifications: NotificationCenter::new(store, Rc::clone(&toast)),
            reminders: ReminderScheduler::new(),
            toast,
            confirm,
        }
    }

    /// Restores a persisted session on process start and loads its data.
    ///
    /// Leaves the app signed out when no session was persisted.
    pub fn restore_session(&mut self) -> AppResult<Option<Session>> {
        let Some(session) = self.session.restore()? else {
            return Ok(None);
        };
        self.load_user_data(session.id)?;
        Ok(Some(session))
    }

    /// Registers a new account, signs it in, and emits the welcome note.
    pub fn sign_up(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> AppResult<Session> {
        let session = self
            .session
            .sign_up(name, email, password, confirm_password)?;
        self.load_user_data(session.id)?;
        let (title, message) = welcome_notification(&session.name);
        self.notifications.push(title, message, Utc::now())?;
        Ok(session)
    }

    /// Signs in an existing account and emits the welcome-back note.
    pub fn sign_in(&mut self, email: &str, password: &str) -> AppResult<Session> {
        let session = self.session.sign_in(email, password)?;
        self.load_user_data(session.id)?;
        let (title, message) = welcome_back_notification(&session.name);
        self.notifications.push(title, message, Utc::now())?;
        Ok(session)
    }

    /// Signs out: clears the session, cancels reminders, drops loaded data.
    pub fn sign_out(&mut self) -> AppResult<()> {
        self.session.sign_out()?;
        self.reminders.cancel_all();
        self.tasks.unload();
        self.notifications.unload();
        Ok(())
    }

    /// Creates a task, schedules its reminder if requested, and notifies.
    pub fn add_task(&mut self, new: NewTask) -> AppResult<Task> {
        let now = Utc::now();
        let task = self.tasks.add(new, now)?;
        self.reminders.schedule(&task, now);
        self.notifications.push(
            "Task Added",
            format!("\"{}\" has been added to your tasks.", task.title),
            now,
        )?;
        Ok(task)
    }

    /// Completes a task; unknown ids are a silent no-op by policy.
    pub fn complete_task(&mut self, id: TaskId) -> AppResult<()> {
        let now = Utc::now();
        if let Some(task) = self.tasks.complete(id, now)? {
            self.notifications.push(
                "Task Completed",
                format!("\"{}\" has been marked as completed.", task.title),
                now,
            )?;
        }
        Ok(())
    }

    /// Deletes a task after confirmation; returns whether the user agreed.
    ///
    /// An unknown id after an affirmative answer is a silent no-op; the
    /// deletion notification is still emitted, matching the product flow.
    pub fn delete_task(&mut self, id: TaskId) -> AppResult<bool> {
        if !self.confirm.confirm(DELETE_CONFIRM_MESSAGE) {
            return Ok(false);
        }
        self.tasks.remove(id)?;
        self.notifications.push(
            "Task Deleted",
            "The task has been deleted.",
            Utc::now(),
        )?;
        Ok(true)
    }

    /// Applies a named filter over non-completed tasks.
    pub fn filtered_tasks(&self, filter: TaskFilter) -> Vec<Task> {
        self.tasks
            .filtered(filter, Utc::now())
            .into_iter()
            .cloned()
            .collect()
    }

    /// Dashboard counters, recomputed from the live sequence.
    pub fn dashboard(&self) -> DashboardCounts {
        dashboard_counts(self.tasks.tasks(), Utc::now())
    }

    /// Fires every reminder whose time has arrived.
    ///
    /// Driven by the host's one-shot timer (see `next_fire_at`). Each fired
    /// reminder lands in the feed (which also toasts it).
    pub fn fire_due_reminders(&mut self) -> AppResult<usize> {
        let now = Utc::now();
        let due = self.reminders.due_reminders(now);
        for reminder in &due {
            self.notifications.push(
                "Task Reminder",
                reminder_message(&reminder.title),
                now,
            )?;
        }
        Ok(due.len())
    }

    /// Announces newly overdue tasks, at most once per task.
    ///
    /// Driven by the host on `OVERDUE_POLL_INTERVAL`. Overdue announcements
    /// are toast-only; they do not enter the persisted feed.
    pub fn poll_overdue(&mut self) -> AppResult<usize> {
        let now = Utc::now();
        let flagged = self.tasks.mark_overdue_notified(now)?;
        for task in &flagged {
            self.toast
                .show_toast("Task Overdue", &overdue_message(&task.title));
        }
        Ok(flagged.len())
    }

    /// Opens the notification panel: marks everything read, returns the feed.
    pub fn open_notifications(&mut self) -> AppResult<Vec<Notification>> {
        self.notifications.mark_all_read()?;
        Ok(self.notifications.feed().to_vec())
    }

    /// Empties the notification feed.
    pub fn clear_notifications(&mut self) -> AppResult<()> {
        self.notifications.clear()?;
        Ok(())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.current()
    }

    pub fn task_list(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn notification_feed(&self) -> &[Notification] {
        self.notifications.feed()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.unread_count()
    }

    /// Scheduler state, exposed for the host's timer wiring.
    pub fn reminders(&self) -> &ReminderScheduler {
        &self.reminders
    }

    fn load_user_data(&mut self, user_id: UserId) -> AppResult<()> {
        self.tasks.load(user_id)?;
        self.notifications.load(user_id)?;
        self.reminders.reschedule_all(self.tasks.tasks(), Utc::now());
        Ok(())
    }
}
