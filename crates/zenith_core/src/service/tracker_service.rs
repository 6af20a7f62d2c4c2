//! Tracker use-case service.
//!
//! # Responsibility
//! - Own the in-memory tracker state restored at startup.
//! - Apply pure mutations and write the result through to persistence.
//! - Expose derived views of the latest state.
//!
//! # Invariants
//! - Mutations are the only way state changes; each accepted change is
//!   followed by a full write of the changed value.
//! - A mutation that leaves the value unchanged performs no write.
//! - Column naming upgraded from the legacy flat record is written in
//!   per-subject shape with the first accepted change.
//! - Write failures are logged and never abort or revert the in-memory
//!   update (best-effort persistence).

use crate::model::chapter::{Chapter, ChapterId, Slot, Weightage};
use crate::model::columns::{ColumnNames, SubjectColumnNames};
use crate::model::filter::{SessionState, ViewTab};
use crate::model::subject::Subject;
use crate::model::SubjectState;
use crate::mutation;
use crate::persistence::StateStore;
use crate::repo::kv_repo::KvRepository;
use crate::view::{self, GlobalStats, ViewData};
use log::{debug, error, info};

/// Owned state container for one tracker session.
pub struct TrackerService<R: KvRepository> {
    store: StateStore<R>,
    state: SubjectState,
    column_names: SubjectColumnNames,
    column_names_need_rewrite: bool,
    sync_client_id: Option<String>,
}

impl<R: KvRepository> TrackerService<R> {
    /// Restores persisted state (seeding on first run) and returns the service.
    pub fn open(repo: R) -> Self {
        let store = StateStore::new(repo);
        let snapshot = store.load();
        Self {
            store,
            state: snapshot.state,
            column_names: snapshot.column_names,
            column_names_need_rewrite: snapshot.column_names_need_rewrite,
            sync_client_id: snapshot.sync_client_id,
        }
    }

    /// Current chapters per subject.
    pub fn state(&self) -> &SubjectState {
        &self.state
    }

    /// Current per-subject column labels.
    pub fn column_names(&self) -> &SubjectColumnNames {
        &self.column_names
    }

    /// Configured task-service client id, if any.
    pub fn sync_client_id(&self) -> Option<&str> {
        self.sync_client_id.as_deref()
    }

    /// Looks up a chapter and its owning subject.
    pub fn chapter(&self, id: ChapterId) -> Option<(Subject, &Chapter)> {
        let subject = mutation::find_subject(&self.state, id)?;
        self.state
            .get(subject)
            .iter()
            .find(|chapter| chapter.id == id)
            .map(|chapter| (subject, chapter))
    }

    /// Flips a progress slot. Returns whether state changed.
    pub fn toggle_progress(&mut self, id: ChapterId, slot: Slot, subject: Subject) -> bool {
        let next = mutation::toggle_progress(&self.state, id, slot, subject);
        self.commit_state(next, "toggle_progress")
    }

    /// Flips a today-selection slot. Returns whether state changed.
    pub fn toggle_today(&mut self, id: ChapterId, slot: Slot, subject: Subject) -> bool {
        let next = mutation::toggle_today(&self.state, id, slot, subject);
        self.commit_state(next, "toggle_today")
    }

    /// Sets a chapter's weightage. Returns whether state changed.
    pub fn set_weightage(&mut self, id: ChapterId, subject: Subject, weightage: Weightage) -> bool {
        let next = mutation::set_weightage(&self.state, id, subject, weightage);
        self.commit_state(next, "set_weightage")
    }

    /// Advances weightage one step along low -> med -> high -> low.
    pub fn cycle_weightage(&mut self, id: ChapterId, subject: Subject) -> bool {
        let current = self
            .state
            .get(subject)
            .iter()
            .find(|chapter| chapter.id == id)
            .map(|chapter| chapter.weightage);
        match current {
            Some(weightage) => self.set_weightage(id, subject, weightage.next()),
            None => false,
        }
    }

    /// Renames a chapter in whichever subject owns it. Returns whether state changed.
    pub fn rename_chapter(&mut self, id: ChapterId, new_name: &str) -> bool {
        let next = mutation::rename_chapter(&self.state, id, new_name);
        self.commit_state(next, "rename_chapter")
    }

    /// Applies a manual ranking for the tab's subject. No-op on today.
    pub fn reorder(&mut self, tab: ViewTab, new_order: &[ChapterId]) -> bool {
        let next = mutation::reorder(&self.state, tab, new_order);
        self.commit_state(next, "reorder")
    }

    /// Renames one column of the tab's subject. No-op on today.
    pub fn rename_column(&mut self, tab: ViewTab, slot: Slot, new_name: &str) -> bool {
        let next = mutation::rename_column(&self.column_names, tab, slot, new_name);
        if next == self.column_names {
            return false;
        }
        self.column_names = next;
        debug!(
            "event=column_rename module=service status=ok slot={}",
            slot.column_key()
        );
        self.save_column_names("rename_column");
        true
    }

    /// Updates the persisted sync client id (`None` or blank clears it).
    pub fn set_sync_client_id(&mut self, client_id: Option<&str>) {
        let normalized = client_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        if normalized == self.sync_client_id {
            return;
        }
        self.sync_client_id = normalized;
        match self.store.save_sync_client_id(self.sync_client_id.as_deref()) {
            Ok(()) => info!(
                "event=sync_client_id_save module=service status=ok configured={}",
                self.sync_client_id.is_some()
            ),
            Err(err) => error!(
                "event=sync_client_id_save module=service status=error error={err}"
            ),
        }
    }

    /// Rows for the session's active tab and filters.
    pub fn view(&self, session: &SessionState) -> ViewData {
        view::current_view_data(&self.state, session.tab, &session.filters)
    }

    /// Completion over every slot of every subject.
    pub fn global_stats(&self) -> GlobalStats {
        view::global_stats(&self.state)
    }

    /// Per-column completion percentages for the tab; zeros on today.
    pub fn column_stats(&self, tab: ViewTab) -> [u32; 3] {
        view::column_stats(&self.state, tab)
    }

    /// Column labels shown for the tab.
    pub fn displayed_column_names(&self, tab: ViewTab) -> ColumnNames {
        view::displayed_column_names(&self.column_names, tab)
    }

    fn commit_state(&mut self, next: SubjectState, action: &'static str) -> bool {
        if next == self.state {
            debug!("event=state_save module=service status=skipped action={action} reason=unchanged");
            return false;
        }
        self.state = next;
        match self.store.save_state(&self.state) {
            Ok(()) => debug!("event=state_save module=service status=ok action={action}"),
            Err(err) => error!(
                "event=state_save module=service status=error action={action} error_code=state_write_failed error={err}"
            ),
        }
        if self.column_names_need_rewrite {
            self.save_column_names(action);
        }
        true
    }

    // The pending flat-record rewrite stays set until a write succeeds.
    fn save_column_names(&mut self, action: &'static str) {
        match self.store.save_column_names(&self.column_names) {
            Ok(()) => {
                self.column_names_need_rewrite = false;
                debug!("event=columns_save module=service status=ok action={action}");
            }
            Err(err) => error!(
                "event=columns_save module=service status=error action={action} error_code=columns_write_failed error={err}"
            ),
        }
    }
}
