//! Notification feed model.
//!
//! # Invariants
//! - The feed is ordered newest-first; new entries are prepended.
//! - New notifications start unread.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a notification.
pub type NotificationId = Uuid;

/// A persisted entry in the per-user notification feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    /// Creates an unread notification stamped at `now`.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            timestamp: now,
            read: false,
        }
    }
}
