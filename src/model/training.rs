//! Training plans: named, ordered sets of exercises.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One workout plan.
///
/// `exercise_ids` defines picker display order, not a mandatory completion
/// order; any queued exercise may be chosen next. Duplicates are disallowed
/// by convention, not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: String,
    pub title: String,
    pub exercise_ids: Vec<String>,
}

impl Training {
    /// Creates an empty plan with a generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: format!("tr_{}", Uuid::new_v4().simple()),
            title: title.into(),
            exercise_ids: Vec::new(),
        }
    }
}
