use chrono::{Duration, Utc};
use std::rc::Rc;
use taskmaster_core::{MemoryStore, NotificationCenter, NullToast, RecordingToast, ToastSink};
use uuid::Uuid;

fn loaded_center(store: Rc<MemoryStore>, toast: Rc<dyn ToastSink>) -> NotificationCenter {
    let mut center = NotificationCenter::new(store, toast);
    center.load(Uuid::new_v4()).unwrap();
    center
}

#[test]
fn push_prepends_unread_and_toasts() {
    let toast = Rc::new(RecordingToast::new());
    let mut center = loaded_center(Rc::new(MemoryStore::new()), Rc::clone(&toast) as _);
    let now = Utc::now();

    center.push("First", "oldest", now).unwrap();
    center
        .push("Second", "newest", now + Duration::seconds(1))
        .unwrap();

    let feed = center.feed();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].title, "Second", "newest entry is first");
    assert_eq!(feed[1].title, "First");
    assert!(feed.iter().all(|n| !n.read));
    assert_eq!(center.unread_count(), 2);

    assert_eq!(
        toast.shown(),
        vec![
            ("First".to_string(), "oldest".to_string()),
            ("Second".to_string(), "newest".to_string()),
        ]
    );
}

#[test]
fn mark_all_read_zeroes_the_badge() {
    let mut center = loaded_center(Rc::new(MemoryStore::new()), Rc::new(NullToast));
    let now = Utc::now();
    center.push("A", "a", now).unwrap();
    center.push("B", "b", now).unwrap();

    center.mark_all_read().unwrap();
    assert_eq!(center.unread_count(), 0);
    assert!(center.feed().iter().all(|n| n.read));
}

#[test]
fn clear_empties_the_feed() {
    let mut center = loaded_center(Rc::new(MemoryStore::new()), Rc::new(NullToast));
    center.push("A", "a", Utc::now()).unwrap();
    center.clear().unwrap();
    assert!(center.feed().is_empty());
    assert_eq!(center.unread_count(), 0);
}

#[test]
fn reload_roundtrips_order_and_read_state() {
    let store = Rc::new(MemoryStore::new());
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let mut center = NotificationCenter::new(Rc::clone(&store) as _, Rc::new(NullToast));
    center.load(user_id).unwrap();
    center.push("First", "oldest", now).unwrap();
    center
        .push("Second", "newest", now + Duration::seconds(1))
        .unwrap();
    center.mark_all_read().unwrap();
    center.push("Third", "unread", now + Duration::seconds(2)).unwrap();
    let before = center.feed().to_vec();

    let mut reloaded = NotificationCenter::new(store, Rc::new(NullToast));
    reloaded.load(user_id).unwrap();
    assert_eq!(reloaded.feed(), before.as_slice());
    assert_eq!(reloaded.unread_count(), 1);
}
