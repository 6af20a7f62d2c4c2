//! Chapter domain model.
//!
//! # Responsibility
//! - Define the canonical syllabus unit tracked per subject.
//! - Provide slot and weightage helpers shared by views and mutations.
//!
//! # Invariants
//! - `id` is generated at creation and never user-supplied, so it is unique
//!   across all subjects.
//! - `progress` and `todays_tasks` always have exactly three slots; `Slot`
//!   is the only way to address them.

use crate::view::percentage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a chapter.
pub type ChapterId = Uuid;

/// Fixed-size completion/selection triple.
pub type SlotTriple = [bool; 3];

/// Importance tag cycled by user action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weightage {
    Low,
    #[default]
    Med,
    High,
}

impl Weightage {
    /// Next step in the low -> med -> high -> low cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Low => Self::Med,
            Self::Med => Self::High,
            Self::High => Self::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Med => "med",
            Self::High => "high",
        }
    }
}

/// One of the three sub-task positions.
///
/// Slot `i` in a triple corresponds to column `col{i+1}` of the owning
/// subject's column naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    First,
    Second,
    Third,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::First, Slot::Second, Slot::Third];

    /// Zero-based position inside a `SlotTriple`.
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }

    /// Returns the slot for a zero-based index, or `None` when out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Column key (`col1`..`col3`) paired with this slot.
    pub fn column_key(self) -> &'static str {
        match self {
            Self::First => "col1",
            Self::Second => "col2",
            Self::Third => "col3",
        }
    }
}

/// Completion bucket derived from the number of completed slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    /// No slot completed.
    NotStarted,
    /// One or two slots completed.
    InProgress,
    /// All three slots completed.
    Completed,
}

/// One trackable syllabus unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ChapterId,
    pub name: String,
    pub weightage: Weightage,
    pub progress: SlotTriple,
    pub todays_tasks: SlotTriple,
}

impl Chapter {
    /// Creates a chapter with a generated id, `med` weightage and empty triples.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a chapter with a caller-provided id.
    ///
    /// Used by persistence when identity already exists in storage.
    pub fn with_id(id: ChapterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            weightage: Weightage::default(),
            progress: [false; 3],
            todays_tasks: [false; 3],
        }
    }

    pub fn is_done(&self, slot: Slot) -> bool {
        self.progress[slot.index()]
    }

    pub fn is_today(&self, slot: Slot) -> bool {
        self.todays_tasks[slot.index()]
    }

    /// Number of completed slots (0..=3).
    pub fn completed_slots(&self) -> usize {
        self.progress.iter().filter(|done| **done).count()
    }

    /// Row completion, `completed_slots / 3` as a rounded percentage.
    pub fn completion_percentage(&self) -> u32 {
        percentage(self.completed_slots(), Slot::ALL.len())
    }

    pub fn status(&self) -> ProgressStatus {
        match self.completed_slots() {
            0 => ProgressStatus::NotStarted,
            3 => ProgressStatus::Completed,
            _ => ProgressStatus::InProgress,
        }
    }

    /// Whether any slot is selected for today's focus list.
    pub fn has_today_selection(&self) -> bool {
        self.todays_tasks.iter().any(|selected| *selected)
    }
}

#[cfg(test)]
mod tests {
    use super::{Chapter, ProgressStatus, Slot, Weightage};

    #[test]
    fn weightage_cycle_wraps_around() {
        assert_eq!(Weightage::Low.next(), Weightage::Med);
        assert_eq!(Weightage::Med.next(), Weightage::High);
        assert_eq!(Weightage::High.next(), Weightage::Low);
    }

    #[test]
    fn status_follows_completed_slot_count() {
        let mut chapter = Chapter::new("Kinematics");
        assert_eq!(chapter.status(), ProgressStatus::NotStarted);
        chapter.progress = [true, false, true];
        assert_eq!(chapter.status(), ProgressStatus::InProgress);
        chapter.progress = [true; 3];
        assert_eq!(chapter.status(), ProgressStatus::Completed);
    }

    #[test]
    fn completion_percentage_rounds_thirds() {
        let mut chapter = Chapter::new("Gravitation");
        assert_eq!(chapter.completion_percentage(), 0);
        chapter.progress = [false, true, false];
        assert_eq!(chapter.completion_percentage(), 33);
        chapter.progress = [true, false, true];
        assert_eq!(chapter.completion_percentage(), 67);
        chapter.progress = [true; 3];
        assert_eq!(chapter.completion_percentage(), 100);
    }

    #[test]
    fn slot_index_roundtrip_rejects_out_of_range() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_index(slot.index()), Some(slot));
        }
        assert_eq!(Slot::from_index(3), None);
    }

    #[test]
    fn chapter_serializes_todays_tasks_in_camel_case() {
        let chapter = Chapter::new("SHM");
        let value = serde_json::to_value(&chapter).unwrap();
        assert!(value.get("todaysTasks").is_some());
        assert_eq!(value["weightage"], "med");
    }
}
