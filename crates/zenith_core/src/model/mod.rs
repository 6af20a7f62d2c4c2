//! Domain model for study-progress tracking.
//!
//! # Responsibility
//! - Define chapters, subjects, column naming and session query state.
//! - Provide the seeded first-run catalog.
//!
//! # Invariants
//! - Chapter ids are generated, never user-supplied, and unique across all
//!   subjects.
//! - Slot `i` of `progress`/`todays_tasks` always pairs with `col{i+1}` of the
//!   same subject's column naming.

pub mod catalog;
pub mod chapter;
pub mod columns;
pub mod filter;
pub mod quotes;
pub mod subject;

use chapter::Chapter;
use subject::SubjectMap;

/// Ordered chapters per subject; order is the user's manual ranking.
pub type SubjectState = SubjectMap<Vec<Chapter>>;
