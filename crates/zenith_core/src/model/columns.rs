//! Per-subject column naming.
//!
//! # Invariants
//! - `col1..col3` map to `Slot::First..Slot::Third` for the owning subject.
//! - Labels are edited independently per subject.

use crate::model::chapter::Slot;
use crate::model::subject::SubjectMap;
use serde::{Deserialize, Serialize};

/// Human-readable labels for the three slots of one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    pub col1: String,
    pub col2: String,
    pub col3: String,
}

/// Column naming for every subject.
pub type SubjectColumnNames = SubjectMap<ColumnNames>;

impl ColumnNames {
    pub fn new(col1: impl Into<String>, col2: impl Into<String>, col3: impl Into<String>) -> Self {
        Self {
            col1: col1.into(),
            col2: col2.into(),
            col3: col3.into(),
        }
    }

    /// Synthetic labeling shown for the aggregate today view.
    pub fn today() -> Self {
        Self::new("Task 1", "Task 2", "Task 3")
    }

    pub fn label(&self, slot: Slot) -> &str {
        match slot {
            Slot::First => &self.col1,
            Slot::Second => &self.col2,
            Slot::Third => &self.col3,
        }
    }

    pub fn set_label(&mut self, slot: Slot, label: impl Into<String>) {
        let target = match slot {
            Slot::First => &mut self.col1,
            Slot::Second => &mut self.col2,
            Slot::Third => &mut self.col3,
        };
        *target = label.into();
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self::new("Theory", "Practice", "PYQs")
    }
}
