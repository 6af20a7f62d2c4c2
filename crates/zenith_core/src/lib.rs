//! Core domain logic for the Zenith study-progress tracker.
//! This crate is the single source of truth for tracker state, its derived
//! views and its persistence contract.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod mutation;
pub mod persistence;
pub mod repo;
pub mod service;
pub mod sync;
pub mod view;

pub use config::TrackerConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::chapter::{Chapter, ChapterId, ProgressStatus, Slot, SlotTriple, Weightage};
pub use model::columns::{ColumnNames, SubjectColumnNames};
pub use model::filter::{FilterState, SessionState, StatusFilter, ViewTab, WeightageFilter};
pub use model::subject::{Subject, SubjectMap};
pub use model::SubjectState;
pub use persistence::{PersistError, Snapshot, StateStore};
pub use repo::kv_repo::{KvRepository, RepoError, RepoResult, SqliteKvRepository};
pub use service::tracker_service::TrackerService;
pub use sync::task_service::{RemoteError, RemoteTask, RemoteTaskList, TaskService};
pub use sync::today_sync::{
    today_task_titles, SyncError, SyncReport, SyncStage, SyncStatus, TodaySyncAdapter,
};
pub use view::{
    apply_filters, column_stats, current_view_data, displayed_column_names, global_stats,
    GlobalStats, TodayGroup, ViewData,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
