//! Domain model for the task-management core.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep entity shapes aligned with the persisted JSON payloads.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID.
//! - All entities are scoped to exactly one user; switching users replaces
//!   in-memory sequences wholesale.

pub mod notification;
pub mod task;
pub mod user;
