//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskmaster_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use std::rc::Rc;
use taskmaster_core::{AlwaysConfirm, MemoryStore, NullToast, TaskMasterApp};

fn main() {
    println!("taskmaster_core version={}", taskmaster_core::core_version());

    // Exercise the full sign-up path against an ephemeral store.
    let mut app = TaskMasterApp::new(
        Rc::new(MemoryStore::new()),
        Rc::new(NullToast),
        Rc::new(AlwaysConfirm),
    );
    match app.sign_up("smoke", "smoke@local", "pw", "pw") {
        Ok(session) => println!("taskmaster_core smoke_user={}", session.id),
        Err(err) => eprintln!("taskmaster_core smoke_failed error={err}"),
    }
}
