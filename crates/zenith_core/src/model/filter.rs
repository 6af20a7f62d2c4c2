//! Session-only query state: filters and the active view tab.
//!
//! # Invariants
//! - Nothing in this module is persisted; state resets on reload.

use crate::model::chapter::{Chapter, ProgressStatus, Weightage};
use crate::model::subject::Subject;

/// Weightage selector of the filter bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeightageFilter {
    #[default]
    All,
    Only(Weightage),
}

impl WeightageFilter {
    pub fn matches(self, weightage: Weightage) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == weightage,
        }
    }
}

/// Status selector of the filter bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    NotStarted,
    InProgress,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, status: ProgressStatus) -> bool {
        match self {
            Self::All => true,
            Self::NotStarted => status == ProgressStatus::NotStarted,
            Self::InProgress => status == ProgressStatus::InProgress,
            Self::Completed => status == ProgressStatus::Completed,
        }
    }
}

/// Ephemeral chapter query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring matched against chapter names.
    pub search: String,
    pub weightage: WeightageFilter,
    pub status: StatusFilter,
}

impl FilterState {
    /// Whether any selector differs from its match-all default.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.weightage != WeightageFilter::All
            || self.status != StatusFilter::All
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies every selector to one chapter.
    pub fn matches(&self, chapter: &Chapter) -> bool {
        let matches_search = self.search.is_empty()
            || chapter
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());

        matches_search
            && self.weightage.matches(chapter.weightage)
            && self.status.matches(chapter.status())
    }
}

/// Active view: one concrete subject or the synthetic today aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewTab {
    Subject(Subject),
    Today,
}

impl ViewTab {
    /// Concrete subject behind this tab, `None` for today.
    pub fn subject(self) -> Option<Subject> {
        match self {
            Self::Subject(subject) => Some(subject),
            Self::Today => None,
        }
    }
}

impl Default for ViewTab {
    fn default() -> Self {
        Self::Subject(Subject::Physics)
    }
}

impl From<Subject> for ViewTab {
    fn from(value: Subject) -> Self {
        Self::Subject(value)
    }
}

/// Per-session UI selectors bundled together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub tab: ViewTab,
    pub filters: FilterState,
}
