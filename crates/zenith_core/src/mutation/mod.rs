//! Pure state transitions.
//!
//! # Responsibility
//! - Produce a new subject state (or column naming) with exactly one change
//!   applied.
//!
//! # Invariants
//! - Every operation is total: an unknown chapter id or an operation that
//!   is undefined for the active tab returns the input unchanged.
//! - Operations never add or remove chapters.
//! - Inputs are never modified; callers replace their state wholesale.

use crate::model::chapter::{Chapter, ChapterId, Slot, Weightage};
use crate::model::columns::SubjectColumnNames;
use crate::model::filter::ViewTab;
use crate::model::subject::Subject;
use crate::model::SubjectState;
use std::collections::HashSet;

/// Flips one progress slot of a chapter.
pub fn toggle_progress(
    state: &SubjectState,
    id: ChapterId,
    slot: Slot,
    subject: Subject,
) -> SubjectState {
    update_chapter(state, subject, id, |chapter| {
        chapter.progress[slot.index()] = !chapter.progress[slot.index()];
    })
}

/// Flips one today-selection slot of a chapter, independent of progress.
pub fn toggle_today(
    state: &SubjectState,
    id: ChapterId,
    slot: Slot,
    subject: Subject,
) -> SubjectState {
    update_chapter(state, subject, id, |chapter| {
        chapter.todays_tasks[slot.index()] = !chapter.todays_tasks[slot.index()];
    })
}

/// Sets a chapter's weightage; cycling callers pass `current.next()`.
pub fn set_weightage(
    state: &SubjectState,
    id: ChapterId,
    subject: Subject,
    weightage: Weightage,
) -> SubjectState {
    update_chapter(state, subject, id, |chapter| chapter.weightage = weightage)
}

/// Renames a chapter, resolving its subject by scanning in fixed order.
///
/// Ids are unique across subjects, so the first match is the only match.
pub fn rename_chapter(state: &SubjectState, id: ChapterId, new_name: &str) -> SubjectState {
    match find_subject(state, id) {
        Some(subject) => update_chapter(state, subject, id, |chapter| {
            chapter.name = new_name.to_string();
        }),
        None => state.clone(),
    }
}

/// Replaces a subject's chapter order.
///
/// No-op on the today tab. Unknown and repeated ids are ignored; chapters
/// absent from `new_order` keep their relative order after the listed ones.
pub fn reorder(state: &SubjectState, tab: ViewTab, new_order: &[ChapterId]) -> SubjectState {
    let Some(subject) = tab.subject() else {
        return state.clone();
    };

    let current = state.get(subject);
    let mut placed: HashSet<ChapterId> = HashSet::with_capacity(current.len());
    let mut reordered: Vec<Chapter> = Vec::with_capacity(current.len());

    for id in new_order {
        if placed.contains(id) {
            continue;
        }
        if let Some(chapter) = current.iter().find(|chapter| chapter.id == *id) {
            placed.insert(*id);
            reordered.push(chapter.clone());
        }
    }
    reordered.extend(
        current
            .iter()
            .filter(|chapter| !placed.contains(&chapter.id))
            .cloned(),
    );

    let mut next = state.clone();
    *next.get_mut(subject) = reordered;
    next
}

/// Sets one column label of the tab's subject. No-op on the today tab.
pub fn rename_column(
    names: &SubjectColumnNames,
    tab: ViewTab,
    slot: Slot,
    new_name: &str,
) -> SubjectColumnNames {
    let mut next = names.clone();
    if let Some(subject) = tab.subject() {
        next.get_mut(subject).set_label(slot, new_name);
    }
    next
}

/// Subject owning `id`, scanning physics, math, chemistry in order.
pub fn find_subject(state: &SubjectState, id: ChapterId) -> Option<Subject> {
    state
        .iter()
        .find(|(_, chapters)| chapters.iter().any(|chapter| chapter.id == id))
        .map(|(subject, _)| subject)
}

fn update_chapter(
    state: &SubjectState,
    subject: Subject,
    id: ChapterId,
    apply: impl FnOnce(&mut Chapter),
) -> SubjectState {
    let mut next = state.clone();
    if let Some(chapter) = next
        .get_mut(subject)
        .iter_mut()
        .find(|chapter| chapter.id == id)
    {
        apply(chapter);
    }
    next
}
