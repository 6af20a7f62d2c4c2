//! Stored payload shapes and their upgrade into typed domain values.
//!
//! # Responsibility
//! - Encode subject state and column naming into JSON payloads.
//! - Detect legacy payload shapes with one structural check at decode time
//!   and upgrade them into fully populated domain values.
//!
//! # Invariants
//! - Nothing outside this module sees a legacy or partially populated shape.
//! - State payloads written by this crate always carry `schemaVersion`.
//! - Version 1 payloads are bare subject maps whose chapters may lack
//!   `todaysTasks`; such chapters decode with all-false selection.

use crate::model::chapter::{Chapter, ChapterId, SlotTriple, Weightage};
use crate::model::columns::{ColumnNames, SubjectColumnNames};
use crate::model::subject::SubjectMap;
use crate::model::SubjectState;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Current state payload version written by `encode_state`.
pub const STATE_SCHEMA_VERSION: u32 = 2;

const LEGACY_STATE_SCHEMA_VERSION: u32 = 1;
const SCHEMA_VERSION_FIELD: &str = "schemaVersion";
const FLAT_COLUMNS_MARKER_FIELD: &str = "col1";

/// Payload decode failure. Callers treat every variant as "no usable data".
#[derive(Debug)]
pub enum DecodeError {
    Json(serde_json::Error),
    UnsupportedVersion { found: u32, supported: u32 },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed payload: {err}"),
            Self::UnsupportedVersion { found, supported } => write!(
                f,
                "payload schema version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::UnsupportedVersion { .. } => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Typed state produced by `decode_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedState {
    pub state: SubjectState,
    /// Payload version found in storage.
    pub source_version: u32,
    /// Chapters that were missing `todaysTasks` and got an all-false triple.
    pub repaired_chapters: usize,
}

impl DecodedState {
    /// Whether the upgraded state differs from what storage holds.
    pub fn needs_rewrite(&self) -> bool {
        self.repaired_chapters > 0
    }
}

/// Typed column naming produced by `decode_column_names`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedColumnNames {
    pub names: SubjectColumnNames,
    /// `true` when a flat single-record payload was broadcast to all subjects.
    pub broadcast_from_flat: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateEnvelopeRef<'a> {
    schema_version: u32,
    subjects: &'a SubjectState,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateEnvelope {
    schema_version: u32,
    subjects: SubjectMap<Vec<StoredChapter>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredChapter {
    id: ChapterId,
    name: String,
    weightage: Weightage,
    progress: SlotTriple,
    todays_tasks: Option<SlotTriple>,
}

impl StoredChapter {
    fn upgrade(self, repaired: &mut usize) -> Chapter {
        let todays_tasks = self.todays_tasks.unwrap_or_else(|| {
            *repaired += 1;
            [false; 3]
        });
        Chapter {
            id: self.id,
            name: self.name,
            weightage: self.weightage,
            progress: self.progress,
            todays_tasks,
        }
    }
}

/// Serializes state inside the current versioned envelope.
pub fn encode_state(state: &SubjectState) -> serde_json::Result<String> {
    serde_json::to_string(&StateEnvelopeRef {
        schema_version: STATE_SCHEMA_VERSION,
        subjects: state,
    })
}

/// Decodes a stored state payload of any supported version.
///
/// # Errors
/// - `DecodeError::Json` for invalid JSON, wrong triple length, unknown
///   weightage, missing subject, or unparseable chapter id.
/// - `DecodeError::UnsupportedVersion` for payloads from a newer binary.
pub fn decode_state(raw: &str) -> Result<DecodedState, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;

    let (source_version, stored) = if value.get(SCHEMA_VERSION_FIELD).is_some() {
        let envelope: StateEnvelope = serde_json::from_value(value)?;
        if envelope.schema_version > STATE_SCHEMA_VERSION {
            return Err(DecodeError::UnsupportedVersion {
                found: envelope.schema_version,
                supported: STATE_SCHEMA_VERSION,
            });
        }
        (envelope.schema_version, envelope.subjects)
    } else {
        let subjects: SubjectMap<Vec<StoredChapter>> = serde_json::from_value(value)?;
        (LEGACY_STATE_SCHEMA_VERSION, subjects)
    };

    let mut repaired_chapters = 0;
    let state = stored.map(|_, chapters| {
        chapters
            .into_iter()
            .map(|chapter| chapter.upgrade(&mut repaired_chapters))
            .collect()
    });

    Ok(DecodedState {
        state,
        source_version,
        repaired_chapters,
    })
}

/// Serializes per-subject column naming.
pub fn encode_column_names(names: &SubjectColumnNames) -> serde_json::Result<String> {
    serde_json::to_string(names)
}

/// Decodes column naming, broadcasting a flat `{col1,col2,col3}` record to
/// every subject.
pub fn decode_column_names(raw: &str) -> Result<DecodedColumnNames, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;

    if value.get(FLAT_COLUMNS_MARKER_FIELD).is_some() {
        let flat: ColumnNames = serde_json::from_value(value)?;
        return Ok(DecodedColumnNames {
            names: SubjectMap::broadcast(flat),
            broadcast_from_flat: true,
        });
    }

    Ok(DecodedColumnNames {
        names: serde_json::from_value(value)?,
        broadcast_from_flat: false,
    })
}
