//! Exercise types: the catalog of movements that plans draw from.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single movement in the catalog.
///
/// Exercises are never physically deleted: archiving hides one from the
/// pickers while keeping it a valid target for historical logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,

    pub name: String,

    /// Which movement family this trains.
    pub class: ExerciseClass,

    /// How the exercise is loaded.
    pub mode: ExerciseMode,

    /// Hidden from pickers, still valid in history.
    pub archived: bool,
}

impl Exercise {
    /// Creates a user-defined exercise with a generated id and `custom` mode.
    pub fn custom(name: impl Into<String>, class: ExerciseClass) -> Self {
        Self {
            id: format!("ex_{}", Uuid::new_v4().simple()),
            name: name.into(),
            class,
            mode: ExerciseMode::Custom,
            archived: false,
        }
    }
}

/// The movement family an exercise belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseClass {
    Push,
    Pull,
    Legs,
    Core,
}

impl ExerciseClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Legs => "Legs",
            Self::Core => "Core",
        }
    }
}

/// How the exercise is loaded. Serialized lowercase in the documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseMode {
    Machine,
    Bodyweight,
    Band,
    Custom,
}

impl ExerciseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Machine => "machine",
            Self::Bodyweight => "bodyweight",
            Self::Band => "band",
            Self::Custom => "custom",
        }
    }
}
