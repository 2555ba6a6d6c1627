//! CLI interface for replog.
//!
//! The workout flow itself lives in the TUI (run with no subcommand); the
//! CLI carries the management surfaces. Each subcommand is non-interactive:
//! arguments in, structured output out.
//!
//! Exercises and trainings are addressed by id, exact name, or unambiguous
//! prefix of either.

mod format;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use jiff::Zoned;

use crate::model::{Exercise, ExerciseClass, Rotation, Training};
use crate::store::Store;

use format::{format_exercises, format_history, format_trainings};

/// replog — a cadence-guided workout log.
#[derive(Debug, Parser)]
#[command(name = "replog", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

const WORKFLOW_HELP: &str = r#"Workflow: a gym day
  1. replog today
     → prints the plan the rotation resolves for today's date
  2. replog
     → opens the workout TUI: pick an exercise, run the cadence, save
  3. replog history chest-press
     → tabulates what you lifted last time

Management:
  replog exercise add "Cable Fly" --class push
  replog training add-exercise gym1 cable-fly
  replog rotation set --t1 tr_gym1 --t2 tr_bbw1 --t3 tr_gym2 --t4 tr_bbw2
  replog export --out backup.json"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show which training the rotation resolves for today's date.
    Today,

    /// Manage the exercise catalog.
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommand,
    },

    /// Manage training plans.
    Training {
        #[command(subcommand)]
        command: TrainingCommand,
    },

    /// Show or replace the 4-slot calendar rotation.
    Rotation {
        #[command(subcommand)]
        command: RotationCommand,
    },

    /// Tabulate the log history of one exercise, oldest first.
    History {
        /// Exercise id, name, or unambiguous prefix.
        exercise: String,

        /// Only the most recent N records.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Export all five documents as one JSON backup.
    Export {
        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import a backup. Every key present in the document replaces the
    /// stored collection wholesale; absent keys are left untouched.
    Import {
        /// Backup file produced by `export`.
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExerciseCommand {
    /// List the catalog. Archived exercises are hidden unless --all.
    List {
        #[arg(long)]
        all: bool,
    },

    /// Add a custom exercise. Prints the new id.
    Add {
        name: String,

        #[arg(long, value_enum)]
        class: ClassArg,
    },

    /// Rename an exercise.
    Rename { exercise: String, name: String },

    /// Change an exercise's movement class.
    SetClass {
        exercise: String,

        #[arg(value_enum)]
        class: ClassArg,
    },

    /// Hide an exercise from pickers. History is kept; nothing is deleted.
    Archive { exercise: String },

    /// Bring an archived exercise back.
    Unarchive { exercise: String },
}

#[derive(Debug, Subcommand)]
pub enum TrainingCommand {
    /// List plans with their exercises.
    List,

    /// Add an empty plan. Prints the new id.
    Add { title: String },

    /// Change a plan's title.
    Retitle { training: String, title: String },

    /// Append an exercise to a plan. Already-present ids are left alone.
    AddExercise { training: String, exercise: String },

    /// Remove an exercise from a plan.
    RemoveExercise { training: String, exercise: String },

    /// Delete a plan. Logs that reference it are kept.
    Delete { training: String },
}

#[derive(Debug, Subcommand)]
pub enum RotationCommand {
    /// Show the active rotation with its day bands.
    Show,

    /// Replace the rotation wholesale. All four slots are required.
    Set {
        /// Plan for days 1–7.
        #[arg(long)]
        t1: String,

        /// Plan for days 8–14.
        #[arg(long)]
        t2: String,

        /// Plan for days 15–21.
        #[arg(long)]
        t3: String,

        /// Plan for day 22 to the end of the month.
        #[arg(long)]
        t4: String,
    },
}

/// CLI-facing movement class, mapped to the domain `ExerciseClass`.
#[derive(Debug, Clone, ValueEnum)]
pub enum ClassArg {
    Push,
    Pull,
    Legs,
    Core,
}

impl ClassArg {
    fn to_domain(&self) -> ExerciseClass {
        match self {
            Self::Push => ExerciseClass::Push,
            Self::Pull => ExerciseClass::Pull,
            Self::Legs => ExerciseClass::Legs,
            Self::Core => ExerciseClass::Core,
        }
    }
}

/// Run one CLI command, returning an error message on failure.
pub fn run(store: &Store, command: Command) -> Result<(), String> {
    match command {
        Command::Today => cmd_today(store),
        Command::Exercise { command } => match command {
            ExerciseCommand::List { all } => cmd_exercise_list(store, all),
            ExerciseCommand::Add { name, class } => {
                cmd_exercise_add(store, &name, class.to_domain())
            }
            ExerciseCommand::Rename { exercise, name } => {
                cmd_exercise_edit(store, &exercise, |e| e.name = name.clone())
            }
            ExerciseCommand::SetClass { exercise, class } => {
                cmd_exercise_edit(store, &exercise, |e| e.class = class.to_domain())
            }
            ExerciseCommand::Archive { exercise } => {
                cmd_exercise_edit(store, &exercise, |e| e.archived = true)
            }
            ExerciseCommand::Unarchive { exercise } => {
                cmd_exercise_edit(store, &exercise, |e| e.archived = false)
            }
        },
        Command::Training { command } => match command {
            TrainingCommand::List => cmd_training_list(store),
            TrainingCommand::Add { title } => cmd_training_add(store, &title),
            TrainingCommand::Retitle { training, title } => {
                cmd_training_edit(store, &training, |t| t.title = title.clone())
            }
            TrainingCommand::AddExercise { training, exercise } => {
                cmd_training_add_exercise(store, &training, &exercise)
            }
            TrainingCommand::RemoveExercise { training, exercise } => {
                cmd_training_remove_exercise(store, &training, &exercise)
            }
            TrainingCommand::Delete { training } => cmd_training_delete(store, &training),
        },
        Command::Rotation { command } => match command {
            RotationCommand::Show => cmd_rotation_show(store),
            RotationCommand::Set { t1, t2, t3, t4 } => cmd_rotation_set(store, [t1, t2, t3, t4]),
        },
        Command::History { exercise, limit } => cmd_history(store, &exercise, limit),
        Command::Export { out } => cmd_export(store, out),
        Command::Import { file } => cmd_import(store, &file),
    }
}

fn cmd_today(store: &Store) -> Result<(), String> {
    let rotation = store
        .rotation()
        .ok_or("no rotation configured — set one with `replog rotation set`")?;

    let today = Zoned::now().date();
    let training_id = rotation.training_for_date(today).to_string();
    let training = store
        .training(&training_id)
        .ok_or_else(|| format!("rotation points at unknown training '{training_id}'"))?;

    println!("{}  {}", training.id, training.title);
    Ok(())
}

fn cmd_exercise_list(store: &Store, all: bool) -> Result<(), String> {
    let exercises: Vec<Exercise> = store
        .exercises()
        .into_iter()
        .filter(|e| all || !e.archived)
        .collect();

    if exercises.is_empty() {
        println!("No exercises");
        return Ok(());
    }
    println!("{}", format_exercises(&exercises));
    Ok(())
}

fn cmd_exercise_add(store: &Store, name: &str, class: ExerciseClass) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("exercise name must not be empty".to_string());
    }

    let exercise = Exercise::custom(name.trim(), class);
    let mut exercises = store.exercises();
    exercises.push(exercise.clone());
    store
        .save_exercises(&exercises)
        .map_err(|e| format!("failed to save exercises: {e}"))?;

    println!("{}", exercise.id);
    Ok(())
}

fn cmd_exercise_edit(
    store: &Store,
    reference: &str,
    edit: impl Fn(&mut Exercise),
) -> Result<(), String> {
    let target = resolve_exercise(store, reference)?;
    let mut exercises = store.exercises();
    let exercise = exercises
        .iter_mut()
        .find(|e| e.id == target.id)
        .ok_or("exercise disappeared during edit")?;

    edit(exercise);
    let name = exercise.name.clone();
    store
        .save_exercises(&exercises)
        .map_err(|e| format!("failed to save exercises: {e}"))?;

    eprintln!("Updated {name}");
    Ok(())
}

fn cmd_training_list(store: &Store) -> Result<(), String> {
    let trainings = store.trainings();
    if trainings.is_empty() {
        println!("No trainings");
        return Ok(());
    }
    println!("{}", format_trainings(&trainings, &store.exercises()));
    Ok(())
}

fn cmd_training_add(store: &Store, title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("training title must not be empty".to_string());
    }

    let training = Training::new(title.trim());
    let mut trainings = store.trainings();
    trainings.push(training.clone());
    store
        .save_trainings(&trainings)
        .map_err(|e| format!("failed to save trainings: {e}"))?;

    println!("{}", training.id);
    Ok(())
}

fn cmd_training_edit(
    store: &Store,
    reference: &str,
    edit: impl Fn(&mut Training),
) -> Result<(), String> {
    let target = resolve_training(store, reference)?;
    let mut trainings = store.trainings();
    let training = trainings
        .iter_mut()
        .find(|t| t.id == target.id)
        .ok_or("training disappeared during edit")?;

    edit(training);
    let title = training.title.clone();
    store
        .save_trainings(&trainings)
        .map_err(|e| format!("failed to save trainings: {e}"))?;

    eprintln!("Updated {title}");
    Ok(())
}

fn cmd_training_add_exercise(
    store: &Store,
    training_ref: &str,
    exercise_ref: &str,
) -> Result<(), String> {
    let exercise = resolve_exercise(store, exercise_ref)?;
    if exercise.archived {
        return Err(format!(
            "'{}' is archived — unarchive it before adding it to a plan",
            exercise.name
        ));
    }

    cmd_training_edit(store, training_ref, |t| {
        if !t.exercise_ids.contains(&exercise.id) {
            t.exercise_ids.push(exercise.id.clone());
        }
    })
}

fn cmd_training_remove_exercise(
    store: &Store,
    training_ref: &str,
    exercise_ref: &str,
) -> Result<(), String> {
    let exercise = resolve_exercise(store, exercise_ref)?;
    cmd_training_edit(store, training_ref, |t| {
        t.exercise_ids.retain(|id| id != &exercise.id);
    })
}

fn cmd_training_delete(store: &Store, reference: &str) -> Result<(), String> {
    let target = resolve_training(store, reference)?;
    let mut trainings = store.trainings();
    trainings.retain(|t| t.id != target.id);
    store
        .save_trainings(&trainings)
        .map_err(|e| format!("failed to save trainings: {e}"))?;

    eprintln!("Deleted {}", target.title);
    Ok(())
}

fn cmd_rotation_show(store: &Store) -> Result<(), String> {
    let rotation = store.rotation().ok_or("no rotation configured")?;
    let title = |id: &str| {
        store
            .training(id)
            .map_or_else(|| format!("{id} (unknown)"), |t| t.title)
    };

    println!("days  1–7   {}", title(&rotation.t1));
    println!("days  8–14  {}", title(&rotation.t2));
    println!("days 15–21  {}", title(&rotation.t3));
    println!("days 22–end {}", title(&rotation.t4));
    Ok(())
}

fn cmd_rotation_set(store: &Store, slots: [String; 4]) -> Result<(), String> {
    // Resolve every slot before writing so a typo replaces nothing.
    let resolved: Vec<Training> = slots
        .iter()
        .map(|reference| resolve_training(store, reference))
        .collect::<Result<_, _>>()?;

    let [t1, t2, t3, t4]: [Training; 4] = resolved
        .try_into()
        .map_err(|_| "expected exactly four slots".to_string())?;
    let rotation = Rotation {
        t1: t1.id,
        t2: t2.id,
        t3: t3.id,
        t4: t4.id,
    };
    store
        .save_rotation(&rotation)
        .map_err(|e| format!("failed to save rotation: {e}"))?;

    eprintln!("Rotation saved");
    Ok(())
}

fn cmd_history(store: &Store, reference: &str, limit: Option<usize>) -> Result<(), String> {
    let exercise = resolve_exercise(store, reference)?;
    let mut logs = store.logs_for(&exercise.id);
    if let Some(limit) = limit
        && logs.len() > limit
    {
        logs.drain(..logs.len() - limit);
    }

    if logs.is_empty() {
        println!("No logs for {}", exercise.name);
        return Ok(());
    }

    eprintln!("{} — {} record(s)", exercise.name, logs.len());
    println!("{}", format_history(&logs));
    Ok(())
}

fn cmd_export(store: &Store, out: Option<PathBuf>) -> Result<(), String> {
    let json = store
        .export_json()
        .map_err(|e| format!("failed to export: {e}"))?;

    match out {
        Some(path) => {
            fs::write(&path, &json)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!("Exported → {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_import(store: &Store, file: &Path) -> Result<(), String> {
    let contents = fs::read_to_string(file)
        .map_err(|e| format!("failed to read {}: {e}", file.display()))?;

    store
        .import_json(&contents)
        .map_err(|e| format!("import rejected, nothing was changed: {e}"))?;

    eprintln!("Import complete");
    Ok(())
}

/// Resolve an exercise reference: exact id, exact name, or unambiguous
/// prefix of either (case-insensitive on names).
fn resolve_exercise(store: &Store, reference: &str) -> Result<Exercise, String> {
    resolve(&store.exercises(), reference, "exercise", |e| {
        (&e.id, &e.name)
    })
}

/// Resolve a training reference the same way.
fn resolve_training(store: &Store, reference: &str) -> Result<Training, String> {
    resolve(&store.trainings(), reference, "training", |t| {
        (&t.id, &t.title)
    })
}

fn resolve<T: Clone>(
    items: &[T],
    reference: &str,
    what: &str,
    keys: impl Fn(&T) -> (&String, &String),
) -> Result<T, String> {
    let needle = reference.to_lowercase();

    if let Some(exact) = items.iter().find(|item| {
        let (id, name) = keys(item);
        id == reference || name.to_lowercase() == needle
    }) {
        return Ok(exact.clone());
    }

    let matches: Vec<&T> = items
        .iter()
        .filter(|item| {
            let (id, name) = keys(item);
            id.starts_with(reference) || name.to_lowercase().starts_with(&needle)
        })
        .collect();

    match matches.len() {
        0 => Err(format!("no {what} matching '{reference}'")),
        1 => Ok(matches[0].clone()),
        n => {
            let names: Vec<&str> = matches.iter().map(|item| keys(item).1.as_str()).collect();
            Err(format!(
                "'{reference}' is ambiguous — matches {n} {what}s: {}",
                names.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use tempfile::TempDir;

    fn seeded_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("data")).unwrap();
        store
            .ensure_defaults(Timestamp::new(1_000_000_000, 0).unwrap())
            .unwrap();
        (dir, store)
    }

    #[test]
    fn resolve_by_exact_id() {
        let (_dir, store) = seeded_store();
        let found = resolve_exercise(&store, "ex_chest_press").unwrap();
        assert_eq!(found.name, "Chest Press");
    }

    #[test]
    fn resolve_by_name_case_insensitive() {
        let (_dir, store) = seeded_store();
        let found = resolve_exercise(&store, "chest press").unwrap();
        assert_eq!(found.id, "ex_chest_press");
    }

    #[test]
    fn resolve_by_unambiguous_prefix() {
        let (_dir, store) = seeded_store();
        let found = resolve_exercise(&store, "ex_rotary").unwrap();
        assert_eq!(found.id, "ex_rotary_torso");
    }

    #[test]
    fn resolve_rejects_ambiguous_prefix() {
        let (_dir, store) = seeded_store();
        // "ex_leg_" matches ex_leg_press, ex_leg_curl, ex_leg_raises_floor.
        let err = resolve_exercise(&store, "ex_leg_").unwrap_err();
        assert!(err.contains("ambiguous"));
    }

    #[test]
    fn resolve_rejects_unknown() {
        let (_dir, store) = seeded_store();
        let err = resolve_training(&store, "tr_nope").unwrap_err();
        assert!(err.contains("no training"));
    }

    #[test]
    fn add_exercise_to_training_is_idempotent() {
        let (_dir, store) = seeded_store();

        cmd_training_add_exercise(&store, "tr_gym1", "ex_band_rows").unwrap();
        cmd_training_add_exercise(&store, "tr_gym1", "ex_band_rows").unwrap();

        let training = store.training("tr_gym1").unwrap();
        let count = training
            .exercise_ids
            .iter()
            .filter(|id| *id == "ex_band_rows")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn archived_exercise_cannot_join_a_plan() {
        let (_dir, store) = seeded_store();
        cmd_exercise_edit(&store, "ex_band_rows", |e| e.archived = true).unwrap();

        let err = cmd_training_add_exercise(&store, "tr_gym1", "ex_band_rows").unwrap_err();
        assert!(err.contains("archived"));
    }

    #[test]
    fn rotation_set_validates_every_slot_before_writing() {
        let (_dir, store) = seeded_store();
        let before = store.rotation().unwrap();

        let err = cmd_rotation_set(
            &store,
            [
                "tr_gym1".into(),
                "tr_bbw1".into(),
                "tr_missing".into(),
                "tr_bbw2".into(),
            ],
        )
        .unwrap_err();

        assert!(err.contains("no training"));
        assert_eq!(store.rotation().unwrap().t3, before.t3);
    }

    #[test]
    fn delete_training_keeps_logs() {
        let (_dir, store) = seeded_store();
        store
            .append_log(
                "tr_gym1",
                "ex_chest_press",
                "40kg",
                crate::model::Difficulty::Ok,
                Timestamp::new(1_000_000_000, 0).unwrap(),
            )
            .unwrap();

        cmd_training_delete(&store, "tr_gym1").unwrap();

        assert!(store.training("tr_gym1").is_none());
        assert_eq!(store.logs().len(), 1);
    }
}
