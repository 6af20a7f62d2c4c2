//! Pure derived views over tracker state.
//!
//! # Responsibility
//! - Compute filtered chapter lists and the aggregated today view.
//! - Compute global and per-column completion statistics.
//!
//! # Invariants
//! - Every function is a pure function of its arguments; recomputing on each
//!   render is always correct.
//! - Percentages round half up; a zero denominator yields 0.

mod stats;

pub use stats::{column_stats, global_stats, percentage, GlobalStats};

use crate::model::chapter::Chapter;
use crate::model::columns::{ColumnNames, SubjectColumnNames};
use crate::model::filter::{FilterState, ViewTab};
use crate::model::subject::Subject;
use crate::model::SubjectState;

/// Chapters of one subject selected for today, after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayGroup {
    pub subject: Subject,
    /// May be empty when filters removed every today-tagged chapter.
    pub chapters: Vec<Chapter>,
}

/// Rows to render for the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewData {
    /// Filtered chapters of one subject in stored order.
    Subject {
        subject: Subject,
        chapters: Vec<Chapter>,
    },
    /// Today groups in fixed subject order.
    Today(Vec<TodayGroup>),
}

impl ViewData {
    /// Total rows across all groups.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Subject { chapters, .. } => chapters.len(),
            Self::Today(groups) => groups.iter().map(|group| group.chapters.len()).sum(),
        }
    }
}

/// Keeps chapters matching every filter selector, preserving order.
pub fn apply_filters(chapters: &[Chapter], filters: &FilterState) -> Vec<Chapter> {
    chapters
        .iter()
        .filter(|chapter| filters.matches(chapter))
        .cloned()
        .collect()
}

/// Builds the rows shown for `tab`.
///
/// For the today tab, subjects without any today-tagged chapter are omitted,
/// while a group emptied only by filtering is kept with zero chapters.
pub fn current_view_data(state: &SubjectState, tab: ViewTab, filters: &FilterState) -> ViewData {
    match tab {
        ViewTab::Subject(subject) => ViewData::Subject {
            subject,
            chapters: apply_filters(state.get(subject), filters),
        },
        ViewTab::Today => ViewData::Today(today_groups(state, filters)),
    }
}

fn today_groups(state: &SubjectState, filters: &FilterState) -> Vec<TodayGroup> {
    state
        .iter()
        .filter_map(|(subject, chapters)| {
            let tagged: Vec<Chapter> = chapters
                .iter()
                .filter(|chapter| chapter.has_today_selection())
                .cloned()
                .collect();
            if tagged.is_empty() {
                return None;
            }
            Some(TodayGroup {
                subject,
                chapters: apply_filters(&tagged, filters),
            })
        })
        .collect()
}

/// Column labels shown for `tab`; the today view uses synthetic labels.
pub fn displayed_column_names(names: &SubjectColumnNames, tab: ViewTab) -> ColumnNames {
    match tab {
        ViewTab::Subject(subject) => names.get(subject).clone(),
        ViewTab::Today => ColumnNames::today(),
    }
}
