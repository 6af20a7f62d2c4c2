//! Host-provided runtime configuration.
//!
//! # Responsibility
//! - Derive database and log locations from one application data directory.
//! - Bootstrap logging and the storage connection for hosts.
//!
//! # Invariants
//! - `data_dir` must be absolute; logging rejects relative directories.

use crate::db::{open_db, DbResult};
use crate::logging::{default_log_level, init_logging};
use log::warn;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "zenith.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Startup configuration supplied by the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Absolute application data directory.
    pub data_dir: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
}

impl TrackerConfig {
    /// Uses the build-mode default log level.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log_level: default_log_level().to_string(),
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    /// Starts file logging under `log_dir()`.
    pub fn init_logging(&self) -> Result<(), String> {
        init_logging(&self.log_level, self.log_dir())
    }

    /// Opens (creating if needed) the tracker database with migrations applied.
    pub fn open_connection(&self) -> DbResult<Connection> {
        ensure_dir(&self.data_dir);
        open_db(self.db_path())
    }
}

// A failure here resurfaces as the `open_db` error.
fn ensure_dir(dir: &Path) {
    if let Err(err) = std::fs::create_dir_all(dir) {
        warn!(
            "event=data_dir_create module=config status=error dir={} error={err}",
            dir.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::TrackerConfig;
    use std::path::Path;

    #[test]
    fn paths_are_derived_from_data_dir() {
        let config = TrackerConfig::new("/var/lib/zenith").with_log_level("warn");
        assert_eq!(config.db_path(), Path::new("/var/lib/zenith/zenith.sqlite3"));
        assert_eq!(config.log_dir(), Path::new("/var/lib/zenith/logs"));
        assert_eq!(config.log_level, "warn");
    }
}
