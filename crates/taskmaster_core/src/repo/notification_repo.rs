//! Notification center: persisted feed plus the transient toast surface.
//!
//! # Responsibility
//! - Own the active user's notification feed, newest-first.
//! - Forward every pushed notification to the toast collaborator.
//!
//! # Invariants
//! - `push` prepends; persisted order equals display order.
//! - New notifications start unread; opening the panel marks all read.

use crate::model::notification::Notification;
use crate::model::user::UserId;
use crate::store::{keys, Store, StoreError};
use chrono::{DateTime, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::time::Duration;

/// How long the display surface keeps a toast visible before auto-dismiss.
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

pub type NotificationRepoResult<T> = Result<T, NotificationRepoError>;

/// Errors from notification feed persistence.
#[derive(Debug)]
pub enum NotificationRepoError {
    Store(StoreError),
    /// Persisted payload could not be decoded into a feed.
    InvalidData(String),
}

impl Display for NotificationRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted notification data: {message}")
            }
        }
    }
}

impl Error for NotificationRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StoreError> for NotificationRepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Transient toast surface, owned by the display layer.
///
/// The core only triggers it; rendering and the auto-dismiss timer
/// (`TOAST_DURATION`) live outside.
pub trait ToastSink {
    fn show_toast(&self, title: &str, message: &str);
}

/// Discards every toast. Default for headless hosts.
#[derive(Debug, Default)]
pub struct NullToast;

impl ToastSink for NullToast {
    fn show_toast(&self, _title: &str, _message: &str) {}
}

/// Records toasts for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingToast {
    shown: std::cell::RefCell<Vec<(String, String)>>,
}

impl RecordingToast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<(String, String)> {
        self.shown.borrow().clone()
    }
}

impl ToastSink for RecordingToast {
    fn show_toast(&self, title: &str, message: &str) {
        self.shown
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
    }
}

/// Owns the in-memory notification feed for the active user.
pub struct NotificationCenter {
    store: Rc<dyn Store>,
    toast: Rc<dyn ToastSink>,
    user_id: Option<UserId>,
    feed: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(store: Rc<dyn Store>, toast: Rc<dyn ToastSink>) -> Self {
        Self {
            store,
            toast,
            user_id: None,
            feed: Vec::new(),
        }
    }

    /// Replaces the in-memory feed with `user_id`'s persisted feed.
    pub fn load(&mut self, user_id: UserId) -> NotificationRepoResult<()> {
        let feed = match self.store.get(&keys::notifications(user_id))? {
            Some(payload) => serde_json::from_str::<Vec<Notification>>(&payload)
                .map_err(|err| NotificationRepoError::InvalidData(err.to_string()))?,
            None => Vec::new(),
        };
        info!(
            "event=notifications_load module=notification_repo status=ok user_id={} count={}",
            user_id,
            feed.len()
        );
        self.user_id = Some(user_id);
        self.feed = feed;
        Ok(())
    }

    /// Drops the in-memory feed on sign-out; persisted data stays.
    pub fn unload(&mut self) {
        self.user_id = None;
        self.feed.clear();
    }

    /// Prepends an unread notification, persists, and shows a toast.
    pub fn push(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> NotificationRepoResult<()> {
        let notification = Notification::new(title, message, now);
        self.toast
            .show_toast(&notification.title, &notification.message);
        self.feed.insert(0, notification);
        self.persist()
    }

    /// Marks the whole feed read, as done when the panel is opened.
    pub fn mark_all_read(&mut self) -> NotificationRepoResult<()> {
        for notification in &mut self.feed {
            notification.read = true;
        }
        self.persist()
    }

    /// Empties the feed.
    pub fn clear(&mut self) -> NotificationRepoResult<()> {
        self.feed.clear();
        self.persist()
    }

    /// Newest-first feed snapshot.
    pub fn feed(&self) -> &[Notification] {
        &self.feed
    }

    /// Badge count: notifications not yet seen in the panel.
    pub fn unread_count(&self) -> usize {
        self.feed.iter().filter(|n| !n.read).count()
    }

    fn persist(&self) -> NotificationRepoResult<()> {
        let Some(user_id) = self.user_id else {
            return Ok(());
        };
        let payload = serde_json::to_string(&self.feed)
            .map_err(|err| NotificationRepoError::InvalidData(err.to_string()))?;
        self.store.set(&keys::notifications(user_id), &payload)?;
        Ok(())
    }
}
