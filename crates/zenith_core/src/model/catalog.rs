//! Built-in syllabus catalog used on first run.
//!
//! # Invariants
//! - Seeded chapters start with `med` weightage and all-false triples.
//! - Every call generates fresh chapter ids.

use crate::model::chapter::Chapter;
use crate::model::columns::{ColumnNames, SubjectColumnNames};
use crate::model::subject::{Subject, SubjectMap};
use crate::model::SubjectState;

const PHYSICS_CHAPTERS: &[&str] = &[
    "Units & Dimensions",
    "Kinematics",
    "Laws of Motion",
    "WPE & Circular",
    "COM & Collision",
    "Rotational Motion",
    "Gravitation",
    "SHM",
    "Solids & Fluids",
    "Thermodynamics",
    "KTG",
    "Waves",
    "Electrostatics",
    "Capacitors",
    "Current Electricity",
    "Magnetism",
    "EMI & AC",
    "Ray Optics",
    "Wave Optics",
    "Modern Physics",
    "Semiconductors",
];

const MATH_CHAPTERS: &[&str] = &[
    "3D Geometry",
    "Vectors",
    "Matrices & Det",
    "Sequences",
    "Functions",
    "Limits & Continuity",
    "Differentiation",
    "AOD",
    "Indefinite Integration",
    "Definite Integration",
    "Area Under Curve",
    "Differential Eq",
    "Straight Lines",
    "Circles",
    "Conic Sections",
    "P & C",
    "Probability",
    "Complex Numbers",
    "Binomial Theorem",
    "Sets & Relations",
    "Trigonometry",
    "Statistics",
];

const CHEMISTRY_CHAPTERS: &[&str] = &[
    "GOC",
    "Hydrocarbons",
    "Haloalkanes",
    "Alcohol & Phenol",
    "Aldehydes & Ketones",
    "Amines",
    "Biomolecules",
    "Coordination Comp",
    "d & f Block",
    "p Block",
    "Chemical Bonding",
    "Periodic Table",
    "Atomic Structure",
    "Mole Concept",
    "Thermodynamics",
    "Equilibrium",
    "Electrochemistry",
    "Redox",
    "Solutions",
    "Practical Chem",
];

/// Chapter names seeded for one subject, in initial ranking order.
pub fn seed_chapter_names(subject: Subject) -> &'static [&'static str] {
    match subject {
        Subject::Physics => PHYSICS_CHAPTERS,
        Subject::Math => MATH_CHAPTERS,
        Subject::Chemistry => CHEMISTRY_CHAPTERS,
    }
}

/// Builds the first-run subject state.
pub fn seed_subject_state() -> SubjectState {
    SubjectMap::from_fn(|subject| {
        seed_chapter_names(subject)
            .iter()
            .map(|name| Chapter::new(*name))
            .collect()
    })
}

/// Builds the first-run column naming.
pub fn default_column_names() -> SubjectColumnNames {
    SubjectMap::broadcast(ColumnNames::default())
}
