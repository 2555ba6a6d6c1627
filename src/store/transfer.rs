//! Backup transfer: export and import of the whole store as one document.
//!
//! The backup document carries the five store documents under their own
//! keys. Import accepts any subset of keys; each present key replaces the
//! stored document wholesale, absent keys are left untouched. A document
//! that fails to parse is rejected in full before anything is written.

use serde::{Deserialize, Serialize};

use crate::model::{Exercise, LogEntry, Meta, Rotation, Training};

use super::{Result, Store, StoreError};

/// The export/import document. Also the long-term backup format, so the
/// field order is stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainings: Option<Vec<Training>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<LogEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Store {
    /// Snapshots all five documents into a backup.
    pub fn export(&self) -> Backup {
        Backup {
            exercises: Some(self.exercises()),
            trainings: Some(self.trainings()),
            rotation: self.rotation(),
            logs: Some(self.logs()),
            meta: self.meta(),
        }
    }

    /// Serializes the backup as pretty JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    /// Applies a backup: every present key replaces the stored document.
    pub fn import(&self, backup: &Backup) -> Result<()> {
        if let Some(exercises) = &backup.exercises {
            self.save_exercises(exercises)?;
        }
        if let Some(trainings) = &backup.trainings {
            self.save_trainings(trainings)?;
        }
        if let Some(rotation) = &backup.rotation {
            self.save_rotation(rotation)?;
        }
        if let Some(logs) = &backup.logs {
            self.save_logs(logs)?;
        }
        if let Some(meta) = &backup.meta {
            self.save_meta(meta)?;
        }
        Ok(())
    }

    /// Parses and applies a backup document.
    ///
    /// Parsing happens before any write, so a malformed document leaves the
    /// store untouched.
    pub fn import_json(&self, json: &str) -> Result<()> {
        let backup: Backup =
            serde_json::from_str(json).map_err(StoreError::MalformedImport)?;
        self.import(&backup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use tempfile::TempDir;

    use crate::model::Difficulty;

    fn test_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("data")).unwrap();
        (dir, store)
    }

    fn seeded_store() -> (TempDir, Store) {
        let (dir, store) = test_store();
        let now = Timestamp::new(1_000_000_000, 0).unwrap();
        store.ensure_defaults(now).unwrap();
        store
            .append_log("tr_gym1", "ex_chest_press", "40kg", Difficulty::Hard, now)
            .unwrap();
        (dir, store)
    }

    #[test]
    fn export_import_reexport_is_stable() {
        let (_dir, source) = seeded_store();
        let exported = source.export_json().unwrap();

        let (_dir2, target) = test_store();
        target.import_json(&exported).unwrap();

        assert_eq!(target.export_json().unwrap(), exported);
    }

    #[test]
    fn partial_import_replaces_only_present_keys() {
        let (_dir, store) = seeded_store();
        let logs_before = store.logs();

        store
            .import_json(r#"{"trainings": [{"id": "tr_x", "title": "X", "exerciseIds": []}]}"#)
            .unwrap();

        let trainings = store.trainings();
        assert_eq!(trainings.len(), 1);
        assert_eq!(trainings[0].id, "tr_x");
        // Untouched keys keep their data.
        assert_eq!(store.logs().len(), logs_before.len());
        assert_eq!(store.exercises().len(), 16);
    }

    #[test]
    fn malformed_import_touches_nothing() {
        let (_dir, store) = seeded_store();
        let before = store.export_json().unwrap();

        let err = store.import_json("{\"exercises\": [{\"id\": 7}]").unwrap_err();
        assert!(matches!(err, StoreError::MalformedImport(_)));

        assert_eq!(store.export_json().unwrap(), before);
    }

    #[test]
    fn wrong_shape_is_rejected_in_full() {
        let (_dir, store) = seeded_store();
        let before = store.export_json().unwrap();

        // Parses as JSON but the shape is wrong: logs must be a list.
        let err = store
            .import_json(r#"{"logs": {"oops": true}, "trainings": []}"#)
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedImport(_)));

        // The parse failure precedes any write, so trainings survive too.
        assert_eq!(store.export_json().unwrap(), before);
    }

    #[test]
    fn unknown_top_level_keys_are_tolerated() {
        let (_dir, store) = seeded_store();
        store
            .import_json(r#"{"somethingElse": 1, "rotation": {"t1":"a","t2":"b","t3":"c","t4":"d"}}"#)
            .unwrap();
        assert_eq!(store.rotation().unwrap().t1, "a");
    }

    #[test]
    fn export_document_key_shape() {
        let (_dir, store) = seeded_store();
        let value: serde_json::Value =
            serde_json::from_str(&store.export_json().unwrap()).unwrap();
        let object = value.as_object().unwrap();
        for key in ["exercises", "trainings", "rotation", "logs", "meta"] {
            assert!(object.contains_key(key), "missing {key}");
        }
    }
}
