//! One-way push of today-selected items to an external task list.
//!
//! # Responsibility
//! - Compute the ordered, distinct task titles for today's selection.
//! - Find or create the target list and create only missing titles.
//! - Track single-flight state and the last sync outcome.
//!
//! # Invariants
//! - Authentication is checked before any remote call; an unauthenticated
//!   attempt never enters the in-flight state.
//! - At most one sync runs at a time per adapter; re-entrant calls fail with
//!   `SyncError::AlreadyInFlight`.
//! - Duplicates are suppressed by exact title equality only. Renaming a
//!   chapter therefore produces a new remote task on the next sync.
//! - A failed step aborts the remaining steps; tasks already created stay.

use crate::model::chapter::Slot;
use crate::model::columns::SubjectColumnNames;
use crate::model::SubjectState;
use crate::sync::task_service::{RemoteError, TaskService};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Title of the remote list receiving today's tasks.
pub const TASK_LIST_TITLE: &str = "JEE Zenith";

/// How long a successful outcome is reported before reverting to idle.
pub const SUCCESS_DISPLAY_WINDOW: Duration = Duration::from_secs(3);

/// Remote step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    ListLookup,
    ListCreate,
    TaskLookup,
    TaskCreate,
}

impl SyncStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListLookup => "list_lookup",
            Self::ListCreate => "list_create",
            Self::TaskLookup => "task_lookup",
            Self::TaskCreate => "task_create",
        }
    }
}

/// Sync failure surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Precondition failure; no remote call was attempted.
    NotAuthenticated,
    /// Another sync on this adapter has not finished yet.
    AlreadyInFlight,
    /// A remote step failed. `created` titles were kept remotely.
    Remote {
        stage: SyncStage,
        created: Vec<String>,
        source: RemoteError,
    },
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthenticated => {
                write!(f, "task service is not connected; authenticate first")
            }
            Self::AlreadyInFlight => write!(f, "a sync is already in progress"),
            Self::Remote {
                stage,
                created,
                source,
            } => write!(
                f,
                "sync failed at {} after creating {} task(s): {source}",
                stage.as_str(),
                created.len()
            ),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Remote { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

/// Result of a completed sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub task_list_id: String,
    /// Titles created in this run, in submission order.
    pub created: Vec<String>,
    /// Local titles skipped because the remote list already had them.
    pub already_present: usize,
}

/// User-visible sync status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Idle,
    Syncing,
    /// Shown for `SUCCESS_DISPLAY_WINDOW`, then reported as `Idle`.
    Succeeded,
    /// Kept until the next attempt starts.
    Failed(String),
}

#[derive(Debug, Clone)]
enum Outcome {
    Idle,
    Syncing,
    Succeeded { at: Instant },
    Failed(String),
}

/// Ordered, distinct titles `"<label>: <chapter> (<Subject>)"` for every
/// today-selected slot, by subject, then chapter, then slot.
pub fn today_task_titles(state: &SubjectState, names: &SubjectColumnNames) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut titles = Vec::new();

    for (subject, chapters) in state.iter() {
        let labels = names.get(subject);
        for chapter in chapters {
            for slot in Slot::ALL.into_iter().filter(|slot| chapter.is_today(*slot)) {
                let title = format!(
                    "{}: {} ({})",
                    labels.label(slot),
                    chapter.name,
                    subject.display_name()
                );
                if seen.insert(title.clone()) {
                    titles.push(title);
                }
            }
        }
    }

    titles
}

/// Single-flight today sync over a `TaskService`.
pub struct TodaySyncAdapter<S: TaskService> {
    service: S,
    in_flight: AtomicBool,
    outcome: Mutex<Outcome>,
}

impl<S: TaskService> TodaySyncAdapter<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            in_flight: AtomicBool::new(false),
            outcome: Mutex::new(Outcome::Idle),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Current status as of now.
    pub fn status(&self) -> SyncStatus {
        self.status_at(Instant::now())
    }

    /// Status as of `now`; success reverts to idle after the display window.
    pub fn status_at(&self, now: Instant) -> SyncStatus {
        match &*self.outcome.lock().unwrap_or_else(PoisonError::into_inner) {
            Outcome::Idle => SyncStatus::Idle,
            Outcome::Syncing => SyncStatus::Syncing,
            Outcome::Succeeded { at } => {
                if now.saturating_duration_since(*at) < SUCCESS_DISPLAY_WINDOW {
                    SyncStatus::Succeeded
                } else {
                    SyncStatus::Idle
                }
            }
            Outcome::Failed(message) => SyncStatus::Failed(message.clone()),
        }
    }

    /// Pushes today's selection to the remote list.
    ///
    /// # Errors
    /// - `NotAuthenticated` before any remote call when not connected.
    /// - `AlreadyInFlight` when another sync is running.
    /// - `Remote` when any remote step fails.
    pub async fn sync(
        &self,
        state: &SubjectState,
        names: &SubjectColumnNames,
    ) -> SyncResult<SyncReport> {
        if !self.service.is_authenticated() {
            warn!("event=sync_run module=sync status=rejected error_code=not_authenticated");
            return Err(SyncError::NotAuthenticated);
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("event=sync_run module=sync status=rejected error_code=already_in_flight");
            return Err(SyncError::AlreadyInFlight);
        };

        let started_at = Instant::now();
        self.set_outcome(Outcome::Syncing);
        info!("event=sync_run module=sync status=start");

        let titles = today_task_titles(state, names);
        let result = self.push_titles(&titles).await;

        match &result {
            Ok(report) => {
                info!(
                    "event=sync_run module=sync status=ok duration_ms={} created={} already_present={}",
                    started_at.elapsed().as_millis(),
                    report.created.len(),
                    report.already_present
                );
                self.set_outcome(Outcome::Succeeded { at: Instant::now() });
            }
            Err(err) => {
                error!(
                    "event=sync_run module=sync status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                self.set_outcome(Outcome::Failed(err.to_string()));
            }
        }

        result
    }

    async fn push_titles(&self, titles: &[String]) -> SyncResult<SyncReport> {
        let lists = self
            .service
            .list_task_lists()
            .await
            .map_err(|source| remote_failure(SyncStage::ListLookup, &[], source))?;

        let task_list_id = match lists.into_iter().find(|list| list.title == TASK_LIST_TITLE) {
            Some(list) => list.id,
            None => {
                info!("event=sync_create_list module=sync status=start");
                self.service
                    .create_task_list(TASK_LIST_TITLE)
                    .await
                    .map_err(|source| remote_failure(SyncStage::ListCreate, &[], source))?
                    .id
            }
        };

        let existing: HashSet<String> = self
            .service
            .list_tasks(&task_list_id)
            .await
            .map_err(|source| remote_failure(SyncStage::TaskLookup, &[], source))?
            .into_iter()
            .map(|task| task.title)
            .collect();

        let mut created = Vec::new();
        let mut already_present = 0;
        for title in titles {
            if existing.contains(title) {
                already_present += 1;
                continue;
            }
            self.service
                .create_task(&task_list_id, title)
                .await
                .map_err(|source| remote_failure(SyncStage::TaskCreate, &created, source))?;
            created.push(title.clone());
            debug!(
                "event=sync_create_task module=sync status=ok index={}",
                created.len()
            );
        }

        Ok(SyncReport {
            task_list_id,
            created,
            already_present,
        })
    }

    fn set_outcome(&self, outcome: Outcome) {
        *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = outcome;
    }
}

fn remote_failure(stage: SyncStage, created: &[String], source: RemoteError) -> SyncError {
    SyncError::Remote {
        stage,
        created: created.to_vec(),
        source,
    }
}

/// Clears the in-flight flag on drop, including on early error returns.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::today_task_titles;
    use crate::model::catalog::{default_column_names, seed_subject_state};

    #[test]
    fn titles_use_subject_labels_and_capitalized_subject() {
        let mut state = seed_subject_state();
        state.physics[1].todays_tasks = [true, false, true];
        let mut names = default_column_names();
        names.physics.col3 = "Mocks".to_string();

        let titles = today_task_titles(&state, &names);
        assert_eq!(
            titles,
            vec![
                "Theory: Kinematics (Physics)".to_string(),
                "Mocks: Kinematics (Physics)".to_string(),
            ]
        );
    }

    #[test]
    fn duplicate_titles_are_emitted_once() {
        let mut state = seed_subject_state();
        state.math[0].name = "Same".to_string();
        state.math[1].name = "Same".to_string();
        state.math[0].todays_tasks = [true, false, false];
        state.math[1].todays_tasks = [true, false, false];

        let titles = today_task_titles(&state, &default_column_names());
        assert_eq!(titles, vec!["Theory: Same (Math)".to_string()]);
    }
}
