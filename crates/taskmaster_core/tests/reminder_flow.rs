use chrono::{Duration, Utc};
use std::rc::Rc;
use taskmaster_core::{
    reminder_lead, AlwaysConfirm, MemoryStore, NewTask, Priority, RecordingToast,
    ReminderScheduler, Task, TaskMasterApp, TaskRepository,
};
use uuid::Uuid;

fn reminder_task(title: &str, due_in: Duration) -> Task {
    let now = Utc::now();
    let mut task = Task::new(title, now);
    task.reminder = true;
    task.due_date = Some(now + due_in);
    task
}

#[test]
fn reschedule_then_cancel_leaves_zero_pending() {
    let now = Utc::now();
    let tasks = vec![
        reminder_task("a", Duration::hours(1)),
        reminder_task("b", Duration::hours(2)),
    ];

    let mut scheduler = ReminderScheduler::new();
    scheduler.reschedule_all(&tasks, now);
    assert_eq!(scheduler.pending_count(), 2);

    scheduler.cancel_all();
    assert_eq!(scheduler.pending_count(), 0);
    assert_eq!(scheduler.next_fire_at(), None);
}

#[test]
fn reschedule_skips_completed_reminderless_and_past_due() {
    let now = Utc::now();
    let mut completed = reminder_task("completed", Duration::hours(1));
    completed.complete(now);
    let mut no_reminder = Task::new("no reminder", now);
    no_reminder.due_date = Some(now + Duration::hours(1));
    let mut no_due = Task::new("no due", now);
    no_due.reminder = true;
    // Fire time would be 15 minutes in the past.
    let too_close = reminder_task("too close", Duration::minutes(5));
    let eligible = reminder_task("eligible", Duration::hours(1));

    let mut scheduler = ReminderScheduler::new();
    scheduler.reschedule_all(
        &[completed, no_reminder, no_due, too_close, eligible.clone()],
        now,
    );
    assert_eq!(scheduler.pending_count(), 1);
    assert_eq!(
        scheduler.next_fire_at(),
        Some(eligible.due_date.unwrap() - reminder_lead())
    );
}

#[test]
fn nothing_fires_before_the_reminder_time() {
    let mut app = TaskMasterApp::new(
        Rc::new(MemoryStore::new()),
        Rc::new(taskmaster_core::NullToast),
        Rc::new(AlwaysConfirm),
    );
    app.sign_up("Ana", "a@x.com", "pw1", "pw1").unwrap();

    let due = Utc::now() + reminder_lead() + Duration::minutes(30);
    app.add_task(NewTask {
        due_date: Some(due),
        reminder: true,
        ..NewTask::titled("Pay rent")
    })
    .unwrap();
    assert_eq!(app.reminders().pending_count(), 1);

    assert_eq!(app.fire_due_reminders().unwrap(), 0);
    assert_eq!(app.reminders().pending_count(), 1);
}

#[test]
fn due_reminders_fire_once_with_reminder_copy() {
    // Scheduled in the past relative to the poll instant, so the fire time
    // has already arrived when the host drains the scheduler.
    let scheduled_at = Utc::now() - Duration::minutes(30);
    let mut task = Task::new("Pay rent", scheduled_at);
    task.reminder = true;
    task.due_date = Some(scheduled_at + reminder_lead() + Duration::minutes(1));

    let mut scheduler = ReminderScheduler::new();
    scheduler.reschedule_all(std::slice::from_ref(&task), scheduled_at);
    assert_eq!(scheduler.pending_count(), 1);

    let fired = scheduler.due_reminders(Utc::now());
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].task_id, task.id);
    assert_eq!(
        taskmaster_core::reminder_message(&fired[0].title),
        "\"Pay rent\" is due in 20 minutes!"
    );

    // One-shot: a second drain finds nothing.
    assert!(scheduler.due_reminders(Utc::now()).is_empty());
}

#[test]
fn poll_overdue_announces_each_task_exactly_once() {
    let toast = Rc::new(RecordingToast::new());
    let mut app = TaskMasterApp::new(
        Rc::new(MemoryStore::new()),
        Rc::clone(&toast) as Rc<dyn taskmaster_core::ToastSink>,
        Rc::new(AlwaysConfirm),
    );
    app.sign_up("Ana", "a@x.com", "pw1", "pw1").unwrap();

    app.add_task(NewTask {
        due_date: Some(Utc::now() - Duration::minutes(1)),
        ..NewTask::titled("Pay rent")
    })
    .unwrap();

    assert_eq!(app.poll_overdue().unwrap(), 1);
    let overdue_toasts: Vec<_> = toast
        .shown()
        .into_iter()
        .filter(|(title, _)| title == "Task Overdue")
        .collect();
    assert_eq!(overdue_toasts.len(), 1);
    assert_eq!(overdue_toasts[0].1, "\"Pay rent\" is overdue!");
    assert!(app.task_list()[0].notified);

    // Idempotent: a second poll with no time/task change announces nothing.
    assert_eq!(app.poll_overdue().unwrap(), 0);
    let repeat: Vec<_> = toast
        .shown()
        .into_iter()
        .filter(|(title, _)| title == "Task Overdue")
        .collect();
    assert_eq!(repeat.len(), 1);
}

#[test]
fn notified_flag_survives_reload() {
    let store = Rc::new(MemoryStore::new());
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let mut repo = TaskRepository::new(Rc::clone(&store) as _);
    repo.load(user_id).unwrap();
    repo.add(
        NewTask {
            due_date: Some(now - Duration::minutes(1)),
            priority: Priority::High,
            ..NewTask::titled("late")
        },
        now,
    )
    .unwrap();
    assert_eq!(repo.mark_overdue_notified(now).unwrap().len(), 1);

    let mut reloaded = TaskRepository::new(store);
    reloaded.load(user_id).unwrap();
    assert!(reloaded.tasks()[0].notified);
    assert!(reloaded.mark_overdue_notified(now).unwrap().is_empty());
}
