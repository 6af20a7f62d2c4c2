//! Load/save of tracker state over durable key-value storage.
//!
//! # Responsibility
//! - Load subject state, column naming and the sync client id at startup.
//! - Upgrade legacy payloads once, at load, into typed values.
//! - Write whole values back after every accepted change.
//!
//! # Invariants
//! - `load` never fails: missing or malformed data falls back to the seeded
//!   catalog and default column names.
//! - A legacy state that needed repair is re-persisted exactly once, during
//!   the load that repaired it.
//! - Flat column naming is upgraded in memory at load; `Snapshot` flags it so
//!   the owner writes the per-subject shape with its next accepted change.
//! - The sync client id is stored under its own key, outside state migration.

pub mod schema;

use crate::model::catalog::{default_column_names, seed_subject_state};
use crate::model::columns::SubjectColumnNames;
use crate::model::SubjectState;
use crate::repo::kv_repo::{KvRepository, RepoError};
use log::{error, info, warn};
use schema::{decode_column_names, decode_state, encode_column_names, encode_state};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key for the full subject state.
pub const STATE_KEY: &str = "state";
/// Storage key for per-subject column naming.
pub const COLUMN_NAMES_KEY: &str = "columnNames";
/// Storage key for the external task service client identifier.
pub const SYNC_CLIENT_ID_KEY: &str = "syncClientId";

pub type PersistResult<T> = Result<T, PersistError>;

/// Write-path persistence failure.
#[derive(Debug)]
pub enum PersistError {
    Repo(RepoError),
    Encode(serde_json::Error),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode payload: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<RepoError> for PersistError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Everything restored at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: SubjectState,
    pub column_names: SubjectColumnNames,
    /// Column naming was decoded from the legacy flat record and still needs
    /// to be written in per-subject shape.
    pub column_names_need_rewrite: bool,
    pub sync_client_id: Option<String>,
}

/// Typed persistence facade over a key-value repository.
pub struct StateStore<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> StateStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads every persisted value, applying upgrades and fallbacks.
    pub fn load(&self) -> Snapshot {
        let (column_names, column_names_need_rewrite) = self.read_column_names();
        Snapshot {
            state: self.load_state(),
            column_names,
            column_names_need_rewrite,
            sync_client_id: self.load_sync_client_id(),
        }
    }

    /// Loads subject state.
    ///
    /// # Side effects
    /// - Persists the seeded catalog when storage holds no state yet.
    /// - Re-persists a repaired legacy state once.
    pub fn load_state(&self) -> SubjectState {
        let raw = match self.repo.get(STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=state_load module=persistence status=ok source=seed");
                let seeded = seed_subject_state();
                self.save_best_effort(&seeded);
                return seeded;
            }
            Err(err) => {
                error!(
                    "event=state_load module=persistence status=error error_code=storage_read_failed error={err}"
                );
                return seed_subject_state();
            }
        };

        match decode_state(&raw) {
            Ok(decoded) => {
                if decoded.needs_rewrite() {
                    info!(
                        "event=state_migrate module=persistence status=ok from_version={} repaired_chapters={}",
                        decoded.source_version, decoded.repaired_chapters
                    );
                    self.save_best_effort(&decoded.state);
                }
                info!(
                    "event=state_load module=persistence status=ok source=storage version={}",
                    decoded.source_version
                );
                decoded.state
            }
            Err(err) => {
                warn!(
                    "event=state_load module=persistence status=fallback error_code=malformed_state error={err}"
                );
                seed_subject_state()
            }
        }
    }

    /// Loads column naming; malformed or missing data yields defaults.
    pub fn load_column_names(&self) -> SubjectColumnNames {
        self.read_column_names().0
    }

    /// Loads the sync client id; blank values are treated as unset.
    pub fn load_sync_client_id(&self) -> Option<String> {
        match self.repo.get(SYNC_CLIENT_ID_KEY) {
            Ok(value) => value.filter(|id| !id.trim().is_empty()),
            Err(err) => {
                error!(
                    "event=sync_client_id_load module=persistence status=error error={err}"
                );
                None
            }
        }
    }

    /// Writes the full subject state.
    pub fn save_state(&self, state: &SubjectState) -> PersistResult<()> {
        let raw = encode_state(state)?;
        self.repo.put(STATE_KEY, &raw)?;
        Ok(())
    }

    /// Writes the full per-subject column naming.
    pub fn save_column_names(&self, names: &SubjectColumnNames) -> PersistResult<()> {
        let raw = encode_column_names(names)?;
        self.repo.put(COLUMN_NAMES_KEY, &raw)?;
        Ok(())
    }

    /// Writes or clears the sync client id (`None` or blank clears it).
    pub fn save_sync_client_id(&self, client_id: Option<&str>) -> PersistResult<()> {
        match client_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => self.repo.put(SYNC_CLIENT_ID_KEY, id)?,
            None => self.repo.remove(SYNC_CLIENT_ID_KEY)?,
        }
        Ok(())
    }

    // Returns the names and whether they came from the flat record.
    fn read_column_names(&self) -> (SubjectColumnNames, bool) {
        let raw = match self.repo.get(COLUMN_NAMES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (default_column_names(), false),
            Err(err) => {
                error!(
                    "event=columns_load module=persistence status=error error_code=storage_read_failed error={err}"
                );
                return (default_column_names(), false);
            }
        };

        match decode_column_names(&raw) {
            Ok(decoded) => {
                if decoded.broadcast_from_flat {
                    info!(
                        "event=columns_migrate module=persistence status=ok shape=flat_to_per_subject"
                    );
                }
                (decoded.names, decoded.broadcast_from_flat)
            }
            Err(err) => {
                warn!(
                    "event=columns_load module=persistence status=fallback error_code=malformed_columns error={err}"
                );
                (default_column_names(), false)
            }
        }
    }

    fn save_best_effort(&self, state: &SubjectState) {
        if let Err(err) = self.save_state(state) {
            error!(
                "event=state_save module=persistence status=error error_code=state_write_failed error={err}"
            );
        }
    }
}
