use std::rc::Rc;
use taskmaster_core::{
    AlwaysConfirm, MemoryStore, NewTask, NullToast, SessionError, Store, TaskMasterApp,
};

fn app_over(store: Rc<MemoryStore>) -> TaskMasterApp {
    TaskMasterApp::new(store, Rc::new(NullToast), Rc::new(AlwaysConfirm))
}

#[test]
fn sign_up_sets_session_and_initializes_empty_data() {
    let mut app = app_over(Rc::new(MemoryStore::new()));

    let session = app.sign_up("Ana", "a@x.com", "pw1", "pw1").unwrap();
    assert_eq!(session.name, "Ana");
    assert_eq!(session.email, "a@x.com");
    assert_eq!(app.session().map(|s| s.id), Some(session.id));

    assert!(app.task_list().is_empty());
    let feed = app.notification_feed();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].title, "Welcome to TaskMaster!");
    assert_eq!(feed[0].message, "Hello Ana, let's get things done!");
    assert!(!feed[0].read);
}

#[test]
fn sign_up_rejects_mismatched_passwords() {
    let mut app = app_over(Rc::new(MemoryStore::new()));
    let err = app.sign_up("Ana", "a@x.com", "pw1", "pw2").unwrap_err();
    assert!(err.to_string().contains("do not match"));
    assert!(app.session().is_none());
}

#[test]
fn duplicate_email_rejected_without_new_record() {
    let store = Rc::new(MemoryStore::new());
    let mut app = app_over(Rc::clone(&store));

    app.sign_up("Ana", "a@x.com", "pw1", "pw1").unwrap();
    app.sign_out().unwrap();

    let err = app.sign_up("Ana Clone", "a@x.com", "pw2", "pw2").unwrap_err();
    assert!(matches!(
        err,
        taskmaster_core::AppError::Session(SessionError::DuplicateEmail(email)) if email == "a@x.com"
    ));

    let users: serde_json::Value =
        serde_json::from_str(&store.get("users").unwrap().unwrap()).unwrap();
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[test]
fn sign_in_requires_exact_credentials() {
    let mut app = app_over(Rc::new(MemoryStore::new()));
    app.sign_up("Ana", "a@x.com", "pw1", "pw1").unwrap();
    app.sign_out().unwrap();

    let err = app.sign_in("a@x.com", "PW1").unwrap_err();
    assert!(matches!(
        err,
        taskmaster_core::AppError::Session(SessionError::InvalidCredentials)
    ));

    let session = app.sign_in("a@x.com", "pw1").unwrap();
    assert_eq!(session.name, "Ana");
    assert_eq!(
        app.notification_feed()[0].title,
        "Welcome Back!",
        "sign-in prepends the welcome-back notification"
    );
}

#[test]
fn sign_out_keeps_persisted_data_and_clears_session() {
    let store = Rc::new(MemoryStore::new());
    let mut app = app_over(Rc::clone(&store));

    let session = app.sign_up("Ana", "a@x.com", "pw1", "pw1").unwrap();
    app.add_task(NewTask::titled("Pay rent")).unwrap();
    app.sign_out().unwrap();

    assert!(app.session().is_none());
    assert!(app.task_list().is_empty());
    assert_eq!(app.reminders().pending_count(), 0);

    let tasks_key = format!("tasks_{}", session.id);
    let payload = store.get(&tasks_key).unwrap().unwrap();
    assert!(payload.contains("Pay rent"), "task data survives sign-out");
    assert!(store.get("currentUser").unwrap().is_none());
}

#[test]
fn restore_session_reloads_user_data() {
    let store = Rc::new(MemoryStore::new());

    let added = {
        let mut app = app_over(Rc::clone(&store));
        app.sign_up("Ana", "a@x.com", "pw1", "pw1").unwrap();
        app.add_task(NewTask::titled("Pay rent")).unwrap()
    };

    // A fresh process over the same store picks the session back up.
    let mut app = app_over(Rc::clone(&store));
    let restored = app.restore_session().unwrap().unwrap();
    assert_eq!(restored.name, "Ana");
    assert_eq!(app.task_list().len(), 1);
    assert_eq!(app.task_list()[0].id, added.id);
    assert_eq!(app.task_list()[0].title, "Pay rent");
}

#[test]
fn restore_without_persisted_session_stays_signed_out() {
    let mut app = app_over(Rc::new(MemoryStore::new()));
    assert!(app.restore_session().unwrap().is_none());
    assert!(app.session().is_none());
}
