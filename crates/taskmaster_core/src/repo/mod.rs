//! Per-user data repositories.
//!
//! # Responsibility
//! - Own the in-memory task and notification sequences for the active user.
//! - Persist every mutation to the key-value store as a full sequence.
//!
//! # Invariants
//! - Each repository is the sole writer of its store key.
//! - `load` replaces the in-memory sequence wholesale; switching users never
//!   merges data.

pub mod notification_repo;
pub mod task_repo;
