//! Export of today's selection to an external task service.
//!
//! # Responsibility
//! - Define the abstract remote capability (`TaskService`).
//! - Run best-effort, single-flight pushes with title-based deduplication.

pub mod task_service;
pub mod today_sync;
