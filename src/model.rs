//! Core data model for replog.
//!
//! The persisted types: exercises, trainings, the rotation, log records, and
//! the seed marker. Everything serializes camelCase so the on-disk documents
//! match the historical export shape.

mod exercise;
mod log;
mod rotation;
mod training;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

pub use exercise::{Exercise, ExerciseClass, ExerciseMode};
pub use log::{Difficulty, LogEntry, load_magnitude};
pub use rotation::Rotation;
pub use training::Training;

/// The document schema version written by the current seed.
pub const SCHEMA_VERSION: u32 = 1;

/// One-time seed marker.
///
/// Presence of the expected version suppresses reseeding of defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub version: u32,
    pub created_at: Timestamp,
}
