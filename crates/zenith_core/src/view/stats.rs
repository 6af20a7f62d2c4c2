//! Completion statistics.

use crate::model::chapter::Slot;
use crate::model::filter::ViewTab;
use crate::model::SubjectState;

/// Completion across every slot of every chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalStats {
    /// `3 * chapter count` over all subjects.
    pub total: usize,
    /// Completed slots over all subjects.
    pub completed: usize,
    pub percentage: u32,
}

/// Rounds `100 * part / whole` half up; `whole == 0` yields 0.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = part as u64;
    let whole = whole as u64;
    ((200 * part + whole) / (2 * whole)) as u32
}

pub fn global_stats(state: &SubjectState) -> GlobalStats {
    let (total, completed) = state
        .iter()
        .flat_map(|(_, chapters)| chapters.iter())
        .fold((0, 0), |(total, completed), chapter| {
            (total + Slot::ALL.len(), completed + chapter.completed_slots())
        });

    GlobalStats {
        total,
        completed,
        percentage: percentage(completed, total),
    }
}

/// Per-slot completion percentage for a subject tab.
///
/// Returns `[0, 0, 0]` for the today tab or a subject without chapters.
pub fn column_stats(state: &SubjectState, tab: ViewTab) -> [u32; 3] {
    let Some(subject) = tab.subject() else {
        return [0; 3];
    };
    let chapters = state.get(subject);

    Slot::ALL.map(|slot| {
        let done = chapters.iter().filter(|chapter| chapter.is_done(slot)).count();
        percentage(done, chapters.len())
    })
}
