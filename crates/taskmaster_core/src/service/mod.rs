//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep display/event-binding layers decoupled from storage details.

pub mod app;
pub mod reminder_scheduler;
pub mod session_service;
