//! External task-service capability contract.
//!
//! # Responsibility
//! - Describe the four remote operations the today sync needs.
//! - Keep authentication and transport outside core; hosts implement the
//!   trait over their HTTP client.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One remote task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTaskList {
    pub id: String,
    pub title: String,
}

/// One remote task inside a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTask {
    pub id: String,
    pub title: String,
}

/// Transport or remote-side failure reported by a `TaskService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for RemoteError {}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote task-list service used by `TodaySyncAdapter`.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Whether authentication has been established; checked before any call.
    fn is_authenticated(&self) -> bool;

    async fn list_task_lists(&self) -> RemoteResult<Vec<RemoteTaskList>>;

    async fn create_task_list(&self, title: &str) -> RemoteResult<RemoteTaskList>;

    async fn list_tasks(&self, task_list_id: &str) -> RemoteResult<Vec<RemoteTask>>;

    async fn create_task(&self, task_list_id: &str, title: &str) -> RemoteResult<RemoteTask>;
}
