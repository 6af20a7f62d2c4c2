//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate mutations, persistence and derived views for callers.
//! - Keep UI layers decoupled from storage details.

pub mod tracker_service;
