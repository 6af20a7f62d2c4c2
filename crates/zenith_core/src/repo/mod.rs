//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable key-value contract used by `persistence`.
//! - Isolate SQLite query details from services.
//!
//! # Invariants
//! - Repositories store opaque strings; they never interpret payloads.

pub mod kv_repo;
