//! Local persistence: five JSON documents under one directory.
//!
//! ```text
//! <root>/
//!   exercises.json   # catalog (list)
//!   trainings.json   # plans (list)
//!   rotation.json    # the active 4-slot rotation (single object)
//!   logs.json        # append-only history (list)
//!   meta.json        # seed marker (single object)
//! ```
//!
//! Documents are read and written whole; there are no partial-field updates
//! at this layer. A missing or corrupt document reads as its fallback value
//! and never fails, so a bad single document degrades that feature rather
//! than the whole app. Writes propagate real errors.

mod seed;
mod transfer;

use std::{fs, io, path::PathBuf};

use jiff::Timestamp;
use serde::{Serialize, de::DeserializeOwned};

use crate::model::{Difficulty, Exercise, LogEntry, Meta, Rotation, Training};

pub use transfer::Backup;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed import: {0}")]
    MalformedImport(#[source] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StoreError>;

const EXERCISES: &str = "exercises.json";
const TRAININGS: &str = "trainings.json";
const ROTATION: &str = "rotation.json";
const LOGS: &str = "logs.json";
const META: &str = "meta.json";

/// File-backed document store.
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default store root: `~/.replog/data/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".replog").join("data"))
    }

    // ── Documents ──

    pub fn exercises(&self) -> Vec<Exercise> {
        self.read_doc(EXERCISES, Vec::new())
    }

    pub fn save_exercises(&self, exercises: &[Exercise]) -> Result<()> {
        self.write_doc(EXERCISES, &exercises)
    }

    pub fn trainings(&self) -> Vec<Training> {
        self.read_doc(TRAININGS, Vec::new())
    }

    pub fn save_trainings(&self, trainings: &[Training]) -> Result<()> {
        self.write_doc(TRAININGS, &trainings)
    }

    /// The active rotation, if one has been saved.
    pub fn rotation(&self) -> Option<Rotation> {
        self.read_doc(ROTATION, None)
    }

    pub fn save_rotation(&self, rotation: &Rotation) -> Result<()> {
        self.write_doc(ROTATION, rotation)
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.read_doc(LOGS, Vec::new())
    }

    pub fn save_logs(&self, logs: &[LogEntry]) -> Result<()> {
        self.write_doc(LOGS, &logs)
    }

    pub fn meta(&self) -> Option<Meta> {
        self.read_doc(META, None)
    }

    pub fn save_meta(&self, meta: &Meta) -> Result<()> {
        self.write_doc(META, meta)
    }

    // ── Lookups ──

    pub fn exercise(&self, id: &str) -> Option<Exercise> {
        self.exercises().into_iter().find(|e| e.id == id)
    }

    pub fn training(&self, id: &str) -> Option<Training> {
        self.trainings().into_iter().find(|t| t.id == id)
    }

    // ── Log accessor ──

    /// Appends a log record with a time-derived id and returns it.
    ///
    /// Ids derive from the creation timestamp; a numeric suffix is bumped
    /// when two appends land in the same millisecond.
    pub fn append_log(
        &self,
        training_id: &str,
        exercise_id: &str,
        load: &str,
        difficulty: Difficulty,
        now: Timestamp,
    ) -> Result<LogEntry> {
        let mut logs = self.logs();

        let base = format!("log_{}", now.as_millisecond());
        let mut id = base.clone();
        let mut bump = 1;
        while logs.iter().any(|l| l.id == id) {
            id = format!("{base}-{bump}");
            bump += 1;
        }

        let entry = LogEntry {
            id,
            date: now,
            training_id: training_id.to_string(),
            exercise_id: exercise_id.to_string(),
            load: load.to_string(),
            difficulty,
        };
        logs.push(entry.clone());
        self.save_logs(&logs)?;
        Ok(entry)
    }

    /// The most recent record for an exercise, by append order.
    ///
    /// Used to prefill load and difficulty when reopening an exercise.
    pub fn last_log_for(&self, exercise_id: &str) -> Option<LogEntry> {
        self.logs()
            .into_iter()
            .rev()
            .find(|l| l.exercise_id == exercise_id)
    }

    /// Full history for an exercise, in append order.
    pub fn logs_for(&self, exercise_id: &str) -> Vec<LogEntry> {
        self.logs()
            .into_iter()
            .filter(|l| l.exercise_id == exercise_id)
            .collect()
    }

    // ── Document plumbing ──

    fn read_doc<T: DeserializeOwned>(&self, name: &str, fallback: T) -> T {
        match fs::read_to_string(self.root.join(name)) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or(fallback),
            Err(_) => fallback,
        }
    }

    fn write_doc<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.root.join(name), json)?;
        Ok(())
    }
}
