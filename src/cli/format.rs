//! Output formatting for CLI display.

use crate::model::{Exercise, LogEntry, Training, load_magnitude};

/// Format the exercise catalog, one line per exercise.
pub(super) fn format_exercises(exercises: &[Exercise]) -> String {
    let id_width = column_width(exercises.iter().map(|e| e.id.len()));
    let name_width = column_width(exercises.iter().map(|e| e.name.len()));

    exercises
        .iter()
        .map(|e| {
            let archived = if e.archived { "  [archived]" } else { "" };
            format!(
                "{:<id_width$}  {:<name_width$}  {:<4}  {}{archived}",
                e.id,
                e.name,
                e.class.as_str(),
                e.mode.as_str(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format training plans with their exercise names resolved.
pub(super) fn format_trainings(trainings: &[Training], exercises: &[Exercise]) -> String {
    trainings
        .iter()
        .map(|t| {
            let names: Vec<&str> = t
                .exercise_ids
                .iter()
                .map(|id| {
                    exercises
                        .iter()
                        .find(|e| &e.id == id)
                        .map_or(id.as_str(), |e| e.name.as_str())
                })
                .collect();
            let list = if names.is_empty() {
                "(no exercises)".to_string()
            } else {
                names.join(", ")
            };
            format!("{}  {}\n    {list}", t.id, t.title)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format an exercise's log history, one line per record, append order.
pub(super) fn format_history(logs: &[LogEntry]) -> String {
    let load_width = column_width(logs.iter().map(|l| l.load.len()));

    logs.iter()
        .map(|l| {
            let magnitude = load_magnitude(&l.load)
                .map_or_else(|| "-".to_string(), |m| format!("{m}"));
            format!(
                "{}  {:<load_width$}  {:>6}  {}",
                l.date.strftime("%Y-%m-%d %H:%M"),
                l.load,
                magnitude,
                l.difficulty.as_str(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn column_width(lengths: impl Iterator<Item = usize>) -> usize {
    lengths.max().unwrap_or(0)
}
