//! The rotation: a fixed 4-slot calendar-to-plan assignment.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Which plan runs in which stretch of the month.
///
/// Exactly one rotation is active; saving replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rotation {
    pub t1: String,
    pub t2: String,
    pub t3: String,
    pub t4: String,
}

impl Rotation {
    /// Resolves the plan slot for a day of the month.
    ///
    /// Bands are fixed: 1–7 → t1, 8–14 → t2, 15–21 → t3, everything else →
    /// t4. The last band deliberately has no upper bound, so it covers day
    /// 22 through the end of the month whatever the month's length.
    pub fn slot_for_day(&self, day: i8) -> &str {
        match day {
            1..=7 => &self.t1,
            8..=14 => &self.t2,
            15..=21 => &self.t3,
            _ => &self.t4,
        }
    }

    /// Resolves the plan for a calendar date. Year and month are irrelevant;
    /// only the day of the month decides.
    pub fn training_for_date(&self, date: Date) -> &str {
        self.slot_for_day(date.day())
    }
}
