//! Log records: immutable history of what was lifted, and how it felt.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// One historical record of load and difficulty for an exercise.
///
/// Append-only. Records are never mutated in place; history queries filter
/// by exercise and keep append order, which is chronological.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Unique, time-derived id (`log_<unix-ms>`, suffixed on collision).
    pub id: String,

    /// When the record was created.
    pub date: Timestamp,

    pub training_id: String,

    pub exercise_id: String,

    /// Free text. May embed a leading numeric magnitude ("40kg", "level 7").
    pub load: String,

    pub difficulty: Difficulty,
}

/// How a completed exercise felt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    /// The default when the user saves without choosing.
    #[default]
    #[serde(rename = "OK")]
    Ok,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Ok => "OK",
            Self::Hard => "Hard",
        }
    }
}

/// Extracts the first signed decimal magnitude embedded in a load string.
///
/// "40kg" → 40.0, "level 7" → 7.0, "-2.5 holes" → -2.5, "bodyweight" →
/// none. Used when tabulating history; the free text stays authoritative.
pub fn load_magnitude(load: &str) -> Option<f64> {
    let bytes = load.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    // A '-' immediately before the first digit belongs to the number.
    let start = if start > 0 && bytes[start - 1] == b'-' {
        start - 1
    } else {
        start
    };

    let mut end = start;
    if bytes[end] == b'-' {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
        }
    }
    load[start..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_of_plain_weight() {
        assert_eq!(load_magnitude("40kg"), Some(40.0));
    }

    #[test]
    fn magnitude_with_fraction_and_sign() {
        assert_eq!(load_magnitude("-2.5 holes"), Some(-2.5));
        assert_eq!(load_magnitude("12.5 kg"), Some(12.5));
    }

    #[test]
    fn magnitude_absent() {
        assert_eq!(load_magnitude("bodyweight"), None);
        assert_eq!(load_magnitude(""), None);
        assert_eq!(load_magnitude("-"), None);
    }

    #[test]
    fn magnitude_found_mid_string() {
        assert_eq!(load_magnitude("level 7"), Some(7.0));
        assert_eq!(load_magnitude("  40 kg"), Some(40.0));
    }

    #[test]
    fn difficulty_serializes_as_display_labels() {
        let json = serde_json::to_string(&Difficulty::Ok).unwrap();
        assert_eq!(json, "\"OK\"");
        let back: Difficulty = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(back, Difficulty::Hard);
    }

    #[test]
    fn difficulty_defaults_to_ok() {
        assert_eq!(Difficulty::default(), Difficulty::Ok);
    }
}
