//! A workout session: the transient state of one visit to the gym.
//!
//! A session is derived from a plan and never persisted. Ending one is
//! dropping it: partial sessions are abandoned with no penalty and no log
//! side effects for unfinished exercises.

use jiff::Timestamp;

use crate::model::Difficulty;
use crate::store::{self, Store};

/// Errors that can occur when starting a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The rotation or an override references a training that doesn't
    /// exist. The session is refused and nothing is mutated.
    #[error("training not found: {0}")]
    PlanNotFound(String),
}

/// What became of a completion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The exercise was logged and removed from the queue.
    Logged,

    /// The exercise was no longer queued. Nothing happened; navigation
    /// races are expected and benign, never an error.
    Stale,
}

/// One completed exercise, kept for the end-of-session summary.
#[derive(Debug, Clone)]
pub struct ExerciseResult {
    pub name: String,
    pub load: String,
    pub difficulty: Difficulty,
}

/// One in-progress workout.
///
/// Invariant: `exercise_queue` plus the ids completed this session equal the
/// plan's exercise ids, with no duplicates and no id in both. Completeness
/// is the queue being empty, recomputed on every check and never stored.
#[derive(Debug)]
pub struct Session {
    pub training_id: String,
    pub exercise_queue: Vec<String>,
    pub results: Vec<ExerciseResult>,
    pub started_at: Timestamp,
}

impl Session {
    /// Starts a session from a plan. The queue is a copy of the plan's
    /// exercise ids, order preserved.
    pub fn start(store: &Store, training_id: &str, now: Timestamp) -> Result<Self, SessionError> {
        let training = store
            .training(training_id)
            .ok_or_else(|| SessionError::PlanNotFound(training_id.to_string()))?;

        Ok(Self {
            training_id: training.id,
            exercise_queue: training.exercise_ids,
            results: Vec::new(),
            started_at: now,
        })
    }

    /// Records a finished exercise: appends a log, removes the id from the
    /// queue, and keeps a result row for the summary.
    ///
    /// A `None` difficulty saves as `OK`, a deliberate default rather than
    /// an error. An id that is no longer queued is a silent no-op.
    pub fn complete_exercise(
        &mut self,
        store: &Store,
        exercise_id: &str,
        load: &str,
        difficulty: Option<Difficulty>,
        now: Timestamp,
    ) -> store::Result<CompletionOutcome> {
        let Some(position) = self.exercise_queue.iter().position(|id| id == exercise_id) else {
            return Ok(CompletionOutcome::Stale);
        };

        let difficulty = difficulty.unwrap_or_default();
        store.append_log(&self.training_id, exercise_id, load, difficulty, now)?;
        self.exercise_queue.remove(position);

        let name = store
            .exercise(exercise_id)
            .map_or_else(|| exercise_id.to_string(), |e| e.name);
        self.results.push(ExerciseResult {
            name,
            load: load.to_string(),
            difficulty,
        });

        Ok(CompletionOutcome::Logged)
    }

    /// Whether every queued exercise has been completed.
    pub fn is_complete(&self) -> bool {
        self.exercise_queue.is_empty()
    }
}
