//! Reminder scheduler: pre-due one-shot reminders over a pending-fire heap.
//!
//! # Responsibility
//! - Derive per-task fire times (`due_date` minus the 20-minute lead).
//! - Track every pending reminder in one cancellable collection.
//!
//! # Invariants
//! - `reschedule_all` starts from an empty heap; stale entries from a
//!   since-replaced task list can never fire.
//! - Fire times already in the past are silently skipped, never fired
//!   retroactively.
//!
//! The heap replaces per-task timer handles: the host event loop asks
//! `next_fire_at()` for its one-shot timer and drains `due_reminders(now)`
//! when it fires, so cancel-all and reschedule-all stay O(n log n) and no
//! handles leak across user switches.

use crate::model::task::{Task, TaskId};
use chrono::{DateTime, Duration, Utc};
use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Minutes before the due date at which a reminder fires.
pub const REMINDER_LEAD_MINUTES: i64 = 20;

/// How often the host should run the overdue poll while signed in.
pub const OVERDUE_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// Lead time between a reminder firing and the task's due date.
pub fn reminder_lead() -> Duration {
    Duration::minutes(REMINDER_LEAD_MINUTES)
}

/// Feed/toast copy for a fired reminder.
pub fn reminder_message(title: &str) -> String {
    format!("\"{title}\" is due in {REMINDER_LEAD_MINUTES} minutes!")
}

/// Toast copy for an overdue task.
pub fn overdue_message(title: &str) -> String {
    format!("\"{title}\" is overdue!")
}

/// A pending one-shot reminder, ordered by fire time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScheduledReminder {
    pub fire_at: DateTime<Utc>,
    pub task_id: TaskId,
    pub title: String,
}

/// Owns every pending reminder for the active user.
#[derive(Default)]
pub struct ReminderScheduler {
    queue: BinaryHeap<Reverse<ScheduledReminder>>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a reminder for one task, if it qualifies.
    ///
    /// Qualifying tasks want a reminder, have a due date, are not completed,
    /// and their fire time is strictly in the future.
    pub fn schedule(&mut self, task: &Task, now: DateTime<Utc>) {
        if !task.reminder || task.completed {
            return;
        }
        let Some(due) = task.due_date else {
            return;
        };
        let fire_at = due - reminder_lead();
        if fire_at <= now {
            return;
        }
        debug!(
            "event=reminder_schedule module=reminder status=ok task_id={} fire_at={}",
            task.id, fire_at
        );
        self.queue.push(Reverse(ScheduledReminder {
            fire_at,
            task_id: task.id,
            title: task.title.clone(),
        }));
    }

    /// Cancels everything, then schedules reminders for the given tasks.
    pub fn reschedule_all(&mut self, tasks: &[Task], now: DateTime<Utc>) {
        self.cancel_all();
        for task in tasks {
            self.schedule(task, now);
        }
    }

    /// Cancels every outstanding reminder as a batch.
    pub fn cancel_all(&mut self) {
        self.queue.clear();
    }

    /// Number of reminders still pending.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// When the host's one-shot timer should next wake, if at all.
    pub fn next_fire_at(&self) -> Option<DateTime<Utc>> {
        self.queue.peek().map(|Reverse(reminder)| reminder.fire_at)
    }

    /// Pops every reminder whose fire time has arrived, in fire order.
    pub fn due_reminders(&mut self, now: DateTime<Utc>) -> Vec<ScheduledReminder> {
        let mut due = Vec::new();
        while matches!(self.queue.peek(), Some(Reverse(head)) if head.fire_at <= now) {
            if let Some(Reverse(reminder)) = self.queue.pop() {
                due.push(reminder);
            }
        }
        due
    }
}
