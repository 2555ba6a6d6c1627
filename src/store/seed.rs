//! First-run seeding of the default catalog, plans, and rotation.
//!
//! Seeding is gated on the meta document carrying the current schema
//! version; anything else (missing, corrupt, older) triggers a full reseed.

use jiff::Timestamp;

use crate::model::{
    Exercise, ExerciseClass, ExerciseMode, LogEntry, Meta, Rotation, SCHEMA_VERSION, Training,
};

use super::{Result, Store};

impl Store {
    /// Seeds the default documents unless the store is already seeded.
    ///
    /// Returns whether seeding happened.
    pub fn ensure_defaults(&self, now: Timestamp) -> Result<bool> {
        if self
            .meta()
            .is_some_and(|meta| meta.version == SCHEMA_VERSION)
        {
            return Ok(false);
        }

        self.save_exercises(&default_exercises())?;
        self.save_trainings(&default_trainings())?;
        self.save_rotation(&default_rotation())?;
        self.save_logs(&Vec::<LogEntry>::new())?;
        self.save_meta(&Meta {
            version: SCHEMA_VERSION,
            created_at: now,
        })?;
        Ok(true)
    }
}

fn exercise(id: &str, name: &str, class: ExerciseClass, mode: ExerciseMode) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        class,
        mode,
        archived: false,
    }
}

fn default_exercises() -> Vec<Exercise> {
    use ExerciseClass::{Core, Legs, Pull, Push};
    use ExerciseMode::{Band, Bodyweight, Machine};

    vec![
        exercise("ex_chest_press", "Chest Press", Push, Machine),
        exercise("ex_shoulder_press", "Shoulder Press", Push, Machine),
        exercise("ex_pushups", "Push-Ups", Push, Bodyweight),
        exercise("ex_band_chest_fly", "Band Chest Fly", Push, Band),
        exercise("ex_lat_pulldown", "Lat Pulldown", Pull, Machine),
        exercise("ex_seated_row", "Seated Row", Pull, Machine),
        exercise("ex_inverted_rows_table", "Inverted Rows", Pull, Bodyweight),
        exercise("ex_band_rows", "Band Rows", Pull, Band),
        exercise("ex_leg_press", "Leg Press", Legs, Machine),
        exercise("ex_leg_curl", "Leg Curl", Legs, Machine),
        exercise(
            "ex_bulgarian_split_squat",
            "Bulgarian Split Squat",
            Legs,
            Bodyweight,
        ),
        exercise("ex_band_hip_thrust", "Band Hip Thrust", Legs, Band),
        exercise("ex_ab_crunch_machine", "Ab Crunch Machine", Core, Machine),
        exercise("ex_rotary_torso", "Rotary Torso", Core, Machine),
        exercise("ex_band_woodchopper", "Band Woodchopper", Core, Band),
        exercise("ex_leg_raises_floor", "Leg Raises", Core, Bodyweight),
    ]
}

fn default_trainings() -> Vec<Training> {
    let training = |id: &str, title: &str, exercise_ids: &[&str]| Training {
        id: id.into(),
        title: title.into(),
        exercise_ids: exercise_ids.iter().map(ToString::to_string).collect(),
    };

    vec![
        training(
            "tr_gym1",
            "Gym 1 – Push & Legs",
            &["ex_chest_press", "ex_shoulder_press", "ex_leg_press", "ex_leg_curl"],
        ),
        training(
            "tr_bbw1",
            "B&BW 1 – Pull & Core",
            &[
                "ex_inverted_rows_table",
                "ex_band_rows",
                "ex_band_woodchopper",
                "ex_leg_raises_floor",
            ],
        ),
        training(
            "tr_gym2",
            "Gym 2 – Pull & Core",
            &["ex_lat_pulldown", "ex_seated_row", "ex_ab_crunch_machine", "ex_rotary_torso"],
        ),
        training(
            "tr_bbw2",
            "B&BW 2 – Push & Legs",
            &[
                "ex_pushups",
                "ex_band_chest_fly",
                "ex_bulgarian_split_squat",
                "ex_band_hip_thrust",
            ],
        ),
    ]
}

fn default_rotation() -> Rotation {
    Rotation {
        t1: "tr_gym1".into(),
        t2: "tr_bbw1".into(),
        t3: "tr_gym2".into(),
        t4: "tr_bbw2".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn test_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("data")).unwrap();
        (dir, store)
    }

    #[test]
    fn seeds_once() {
        let (_dir, store) = test_store();
        let now = Timestamp::new(1_000_000_000, 0).unwrap();

        assert!(store.ensure_defaults(now).unwrap());
        assert!(!store.ensure_defaults(now).unwrap());

        assert_eq!(store.exercises().len(), 16);
        assert_eq!(store.trainings().len(), 4);
        assert_eq!(store.rotation().unwrap().t1, "tr_gym1");
        assert!(store.logs().is_empty());
        assert_eq!(store.meta().unwrap().version, SCHEMA_VERSION);
    }

    #[test]
    fn reseed_does_not_clobber_user_data() {
        let (_dir, store) = test_store();
        let now = Timestamp::new(1_000_000_000, 0).unwrap();
        store.ensure_defaults(now).unwrap();

        store
            .append_log("tr_gym1", "ex_chest_press", "40kg", crate::model::Difficulty::Ok, now)
            .unwrap();
        store.ensure_defaults(now).unwrap();

        assert_eq!(store.logs().len(), 1, "second ensure_defaults must not wipe logs");
    }

    #[test]
    fn every_plan_references_seeded_exercises() {
        let (_dir, store) = test_store();
        store
            .ensure_defaults(Timestamp::new(1_000_000_000, 0).unwrap())
            .unwrap();

        let exercises = store.exercises();
        for training in store.trainings() {
            for id in &training.exercise_ids {
                assert!(
                    exercises.iter().any(|e| &e.id == id),
                    "{} references unknown exercise {id}",
                    training.id
                );
            }
        }
    }

    #[test]
    fn rotation_slots_reference_seeded_trainings() {
        let (_dir, store) = test_store();
        store
            .ensure_defaults(Timestamp::new(1_000_000_000, 0).unwrap())
            .unwrap();

        let rotation = store.rotation().unwrap();
        let trainings = store.trainings();
        for slot in [&rotation.t1, &rotation.t2, &rotation.t3, &rotation.t4] {
            assert!(trainings.iter().any(|t| &t.id == slot));
        }
    }
}
