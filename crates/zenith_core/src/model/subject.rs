//! Subject enumeration and per-subject containers.
//!
//! # Responsibility
//! - Define the closed set of subjects and their fixed scan order.
//! - Provide a typed per-subject map used by state and column naming.
//!
//! # Invariants
//! - `Subject::ALL` order (physics, math, chemistry) is the only order used
//!   for scans, today aggregation, and sync.
//! - `SubjectMap` always holds exactly one value per subject.

use serde::{Deserialize, Serialize};

/// One of the three fixed top-level groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Physics,
    Math,
    Chemistry,
}

impl Subject {
    /// Fixed scan order shared by every cross-subject operation.
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Math, Subject::Chemistry];

    /// Stable lowercase identifier used in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Physics => "physics",
            Self::Math => "math",
            Self::Chemistry => "chemistry",
        }
    }

    /// Capitalized label used in user-facing text and sync titles.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Physics => "Physics",
            Self::Math => "Math",
            Self::Chemistry => "Chemistry",
        }
    }
}

/// Value-per-subject container.
///
/// Serialized as `{ "physics": .., "math": .., "chemistry": .. }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectMap<T> {
    pub physics: T,
    pub math: T,
    pub chemistry: T,
}

impl<T> SubjectMap<T> {
    /// Builds a map by evaluating `f` once per subject in fixed order.
    pub fn from_fn(mut f: impl FnMut(Subject) -> T) -> Self {
        Self {
            physics: f(Subject::Physics),
            math: f(Subject::Math),
            chemistry: f(Subject::Chemistry),
        }
    }

    pub fn get(&self, subject: Subject) -> &T {
        match subject {
            Subject::Physics => &self.physics,
            Subject::Math => &self.math,
            Subject::Chemistry => &self.chemistry,
        }
    }

    pub fn get_mut(&mut self, subject: Subject) -> &mut T {
        match subject {
            Subject::Physics => &mut self.physics,
            Subject::Math => &mut self.math,
            Subject::Chemistry => &mut self.chemistry,
        }
    }

    /// Iterates `(subject, value)` pairs in `Subject::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Subject, &T)> {
        Subject::ALL
            .into_iter()
            .map(move |subject| (subject, self.get(subject)))
    }

    /// Converts every value while keeping subject positions.
    pub fn map<U>(self, mut f: impl FnMut(Subject, T) -> U) -> SubjectMap<U> {
        SubjectMap {
            physics: f(Subject::Physics, self.physics),
            math: f(Subject::Math, self.math),
            chemistry: f(Subject::Chemistry, self.chemistry),
        }
    }
}

impl<T: Clone> SubjectMap<T> {
    /// Replicates one value across all subjects.
    pub fn broadcast(value: T) -> Self {
        Self {
            physics: value.clone(),
            math: value.clone(),
            chemistry: value,
        }
    }
}
