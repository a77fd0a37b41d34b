//! Core domain logic for TaskMaster, a single-user task-management client.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging};
pub use model::notification::{Notification, NotificationId};
pub use model::task::{Priority, Task, TaskFilter, TaskId, TaskValidationError};
pub use model::user::{Session, User, UserId};
pub use repo::notification_repo::{
    NotificationCenter, NotificationRepoError, NullToast, RecordingToast, ToastSink,
    TOAST_DURATION,
};
pub use repo::task_repo::{NewTask, TaskRepoError, TaskRepoResult, TaskRepository};
pub use service::app::{
    AlwaysConfirm, AppError, AppResult, ConfirmPrompt, TaskMasterApp, DELETE_CONFIRM_MESSAGE,
};
pub use service::reminder_scheduler::{
    overdue_message, reminder_lead, reminder_message, ReminderScheduler, ScheduledReminder,
    OVERDUE_POLL_INTERVAL, REMINDER_LEAD_MINUTES,
};
pub use service::session_service::{SessionError, SessionManager, SessionResult};
pub use store::{keys, MemoryStore, SqliteStore, Store, StoreError, StoreResult};
pub use view::{
    completed_tasks, dashboard_counts, notification_feed, pending_tasks, recent_tasks,
    DashboardCounts, NotificationView, TaskView, RECENT_TASK_LIMIT,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
